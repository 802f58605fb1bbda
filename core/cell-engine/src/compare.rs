//! FILENAME: core/cell-engine/src/compare.rs
//! PURPOSE: Type-aware ordering of raw cell values for table sorting.

use std::cmp::Ordering;

use crate::cell::CellValue;

/// Compares two raw values in ascending order.
///
/// Empty sorts before anything defined. Numbers (and money amounts)
/// compare numerically, dates chronologically, text and link labels
/// case-insensitively, booleans `false < true`, lists element-wise.
/// Values of different kinds fall back to a fixed kind order so the
/// comparison stays total even for malformed columns.
pub fn compare_values(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Empty, CellValue::Empty) => Ordering::Equal,
        (CellValue::Empty, _) => Ordering::Less,
        (_, CellValue::Empty) => Ordering::Greater,
        (CellValue::Date(da), CellValue::Date(db)) => da.cmp(db),
        (CellValue::Boolean(ba), CellValue::Boolean(bb)) => ba.cmp(bb),
        (CellValue::List(la), CellValue::List(lb)) => compare_lists(la, lb),
        _ => {
            if let (Some(na), Some(nb)) = (a.as_number(), b.as_number()) {
                return compare_numbers(na, nb);
            }
            if let (Some(ta), Some(tb)) = (text_key(a), text_key(b)) {
                return compare_text(ta, tb);
            }
            a.kind().cmp(&b.kind())
        }
    }
}

/// NaN sorts after every real number and equal to itself.
fn compare_numbers(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

fn text_key(value: &CellValue) -> Option<&str> {
    match value {
        CellValue::Text(s) => Some(s),
        CellValue::Link { url, label } => Some(if label.is_empty() { url } else { label }),
        _ => None,
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    let lower_a = a.chars().flat_map(char::to_lowercase);
    let lower_b = b.chars().flat_map(char::to_lowercase);
    lower_a.cmp(lower_b)
}

fn compare_lists(a: &[CellValue], b: &[CellValue]) -> Ordering {
    for (va, vb) in a.iter().zip(b.iter()) {
        let ordering = compare_values(va, vb);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.len().cmp(&b.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_empty_sorts_first() {
        assert_eq!(compare_values(&CellValue::Empty, &CellValue::Number(-1e9)), Ordering::Less);
        assert_eq!(compare_values(&CellValue::text("a"), &CellValue::Empty), Ordering::Greater);
    }

    #[test]
    fn test_numbers_and_money_compare_numerically() {
        assert_eq!(compare_values(&10.0.into(), &9.0.into()), Ordering::Greater);
        assert_eq!(
            compare_values(&CellValue::money(5.0, "USD"), &CellValue::Number(7.0)),
            Ordering::Less
        );
        assert_eq!(compare_values(&f64::NAN.into(), &1.0.into()), Ordering::Greater);
    }

    #[test]
    fn test_text_is_case_insensitive() {
        assert_eq!(compare_values(&"apple".into(), &"Banana".into()), Ordering::Less);
        assert_eq!(compare_values(&"JUAN".into(), &"juan".into()), Ordering::Equal);
        assert_eq!(
            compare_values(&CellValue::link("/b", "alpha"), &"Beta".into()),
            Ordering::Less
        );
    }

    #[test]
    fn test_dates_and_booleans() {
        let early = NaiveDate::from_ymd_opt(2020, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0)).unwrap();
        let late = NaiveDate::from_ymd_opt(2021, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0)).unwrap();
        assert_eq!(compare_values(&early.into(), &late.into()), Ordering::Less);
        assert_eq!(compare_values(&false.into(), &true.into()), Ordering::Less);
    }

    #[test]
    fn test_mixed_kinds_use_kind_order() {
        assert_eq!(compare_values(&1.0.into(), &"1".into()), Ordering::Less);
        assert_eq!(compare_values(&true.into(), &"z".into()), Ordering::Greater);
    }

    #[test]
    fn test_lists_compare_elementwise() {
        let a = CellValue::List(vec!["a".into(), "b".into()]);
        let b = CellValue::List(vec!["a".into(), "c".into()]);
        let c = CellValue::List(vec!["a".into()]);
        assert_eq!(compare_values(&a, &b), Ordering::Less);
        assert_eq!(compare_values(&c, &a), Ordering::Less);
    }
}
