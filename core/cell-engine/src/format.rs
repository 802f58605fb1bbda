//! FILENAME: core/cell-engine/src/format.rs
//! PURPOSE: Default per-type cell formatting.
//! CONTEXT: Each column declares a DataType; this module turns the raw
//! CellValue into the FormattedValue a table renders. Values that do not
//! fit their declared type are never an error: they fall back to plain
//! string coercion and are displayed as-is.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::data_type::{DataType, FormatterOptions};
use crate::number_format::{format_money, format_number, format_percentage};

/// Default preview length for paragraph cells.
pub const DEFAULT_PARAGRAPH_LENGTH: usize = 100;

const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
const ELLIPSIS: char = '…';

/// The display form of a cell, handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum FormattedValue {
    Text(String),
    Link {
        href: String,
        label: String,
    },
    /// Long text; `preview` is shown until the reader expands to `full`.
    Paragraph {
        preview: String,
        full: String,
        truncated: bool,
    },
    List(Vec<String>),
}

impl FormattedValue {
    pub fn text(s: impl Into<String>) -> Self {
        FormattedValue::Text(s.into())
    }

    /// Single-string form, lists joined with `", "`.
    pub fn plain_text(&self) -> String {
        self.plain_text_with(&FormatterOptions::default())
    }

    /// Single-string form used for search matching. Lists are joined with
    /// the column's `separator`.
    pub fn plain_text_with(&self, options: &FormatterOptions) -> String {
        match self {
            FormattedValue::Text(s) => s.clone(),
            FormattedValue::Link { label, .. } => label.clone(),
            FormattedValue::Paragraph { full, .. } => full.clone(),
            FormattedValue::List(items) => join_list(items, options),
        }
    }
}

impl Default for FormattedValue {
    fn default() -> Self {
        FormattedValue::Text(String::new())
    }
}

/// Format a cell according to its column's data type and options.
pub fn format_value(value: &CellValue, data_type: DataType, options: &FormatterOptions) -> FormattedValue {
    if value.is_empty() {
        return FormattedValue::default();
    }

    match data_type {
        DataType::Text => FormattedValue::Text(value.display_value()),
        DataType::Number => match value {
            CellValue::Number(n) if n.is_finite() => FormattedValue::Text(format_number(*n, options)),
            _ => coerce(value),
        },
        DataType::Money => match value {
            CellValue::Money(m) if m.amount.is_finite() => {
                FormattedValue::Text(format_money(m.amount, Some(&m.currency), options))
            }
            CellValue::Number(n) if n.is_finite() => FormattedValue::Text(format_money(*n, None, options)),
            _ => coerce(value),
        },
        DataType::Financial => format_financial(value, options),
        DataType::Date => match value {
            CellValue::Date(d) => FormattedValue::Text(format_date(d, options)),
            _ => coerce(value),
        },
        DataType::Days => match value {
            CellValue::Number(n) if n.is_finite() => FormattedValue::Text(format_days(*n)),
            _ => coerce(value),
        },
        DataType::Tenure => match value {
            CellValue::Number(n) if n.is_finite() => FormattedValue::Text(format_tenure(*n)),
            _ => coerce(value),
        },
        DataType::Boolean => match value {
            CellValue::Boolean(b) => FormattedValue::Text(format_boolean(*b, options)),
            _ => coerce(value),
        },
        DataType::Link => match value {
            CellValue::Link { url, label } => FormattedValue::Link {
                href: url.clone(),
                label: if label.is_empty() { url.clone() } else { label.clone() },
            },
            CellValue::Text(url) => FormattedValue::Link {
                href: url.clone(),
                label: url.clone(),
            },
            _ => coerce(value),
        },
        DataType::Paragraph => format_paragraph(&value.display_value(), options),
        DataType::List => match value {
            CellValue::List(items) => FormattedValue::List(
                items
                    .iter()
                    .filter(|item| !item.is_empty())
                    .map(|item| format_value(item, DataType::Text, options).plain_text())
                    .collect(),
            ),
            _ => coerce(value),
        },
        DataType::Percent => match value {
            CellValue::Number(n) if n.is_finite() => {
                FormattedValue::Text(format_percentage(*n, options.decimal_places.unwrap_or(0)))
            }
            _ => coerce(value),
        },
    }
}

/// Join a formatted list with the column's separator.
pub fn join_list(items: &[String], options: &FormatterOptions) -> String {
    items.join(options.separator.as_deref().unwrap_or(", "))
}

fn coerce(value: &CellValue) -> FormattedValue {
    log::debug!("falling back to string coercion for {:?}", value);
    FormattedValue::Text(value.display_value())
}

fn format_financial(value: &CellValue, options: &FormatterOptions) -> FormattedValue {
    let selected = match options.selector.as_deref() {
        Some(selector) => match value.select(selector) {
            Some(selected) => selected,
            None => {
                log::warn!("financial selector '{}' matched nothing", selector);
                return coerce(value);
            }
        },
        None => value,
    };

    match selected {
        CellValue::Money(m) if m.amount.is_finite() => {
            FormattedValue::Text(format_money(m.amount, Some(&m.currency), options))
        }
        CellValue::Number(n) if n.is_finite() => FormattedValue::Text(format_money(*n, None, options)),
        CellValue::Empty => FormattedValue::default(),
        other => coerce(other),
    }
}

fn format_date(date: &NaiveDateTime, options: &FormatterOptions) -> String {
    use std::fmt::Write;

    let pattern = options.date_format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT);
    let mut out = String::new();
    // An invalid strftime pattern surfaces as a fmt error rather than a panic.
    if write!(out, "{}", date.format(pattern)).is_err() {
        log::warn!("invalid date format '{}'", pattern);
        return date.format(DEFAULT_DATE_FORMAT).to_string();
    }
    out
}

/// Formats a duration in days: `1 day`, `12 days`.
pub fn format_days(days: f64) -> String {
    let rounded = days.round() as i64;
    if rounded.abs() == 1 {
        format!("{} day", rounded)
    } else {
        format!("{} days", rounded)
    }
}

/// Formats a tenure given in months: `2 yrs 3 mos`, `1 yr`, `5 mos`.
pub fn format_tenure(months: f64) -> String {
    let total = months.round().max(0.0) as i64;
    let years = total / 12;
    let rest = total % 12;

    let mut parts = Vec::new();
    match years {
        0 => {}
        1 => parts.push("1 yr".to_string()),
        n => parts.push(format!("{} yrs", n)),
    }
    match rest {
        0 => {}
        1 => parts.push("1 mo".to_string()),
        n => parts.push(format!("{} mos", n)),
    }

    if parts.is_empty() {
        "0 mos".to_string()
    } else {
        parts.join(" ")
    }
}

fn format_boolean(value: bool, options: &FormatterOptions) -> String {
    let label = if value {
        options.true_label.as_deref().unwrap_or("Yes")
    } else {
        options.false_label.as_deref().unwrap_or("No")
    };
    label.to_string()
}

fn format_paragraph(text: &str, options: &FormatterOptions) -> FormattedValue {
    let limit = options.max_length.unwrap_or(DEFAULT_PARAGRAPH_LENGTH);
    let truncated = text.chars().count() > limit;
    let preview = if truncated {
        let mut preview: String = text.chars().take(limit).collect();
        preview.truncate(preview.trim_end().len());
        preview.push(ELLIPSIS);
        preview
    } else {
        text.to_string()
    };

    FormattedValue::Paragraph {
        preview,
        full: text.to_string(),
        truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn opts() -> FormatterOptions {
        FormatterOptions::default()
    }

    #[test]
    fn test_malformed_money_is_displayed_as_is() {
        let value = CellValue::text("n/a");
        assert_eq!(
            format_value(&value, DataType::Money, &opts()),
            FormattedValue::text("n/a")
        );
    }

    #[test]
    fn test_non_finite_numbers_are_displayed_as_written() {
        for data_type in [DataType::Number, DataType::Money, DataType::Days, DataType::Tenure, DataType::Percent] {
            assert_eq!(
                CellValue::from_json(&serde_json::json!("NaN"), data_type),
                CellValue::text("NaN")
            );
            let cell = CellValue::from_json(&serde_json::json!("-inf"), data_type);
            assert_eq!(format_value(&cell, data_type, &opts()).plain_text(), "-inf");
        }

        let cases = [
            (CellValue::Number(f64::NAN), "NaN"),
            (CellValue::Number(f64::INFINITY), "inf"),
            (CellValue::Number(f64::NEG_INFINITY), "-inf"),
            (CellValue::money(f64::NAN, "USD"), "NaN"),
        ];
        for (cell, expected) in &cases {
            for data_type in [DataType::Number, DataType::Money, DataType::Financial, DataType::Days, DataType::Tenure, DataType::Percent] {
                assert_eq!(
                    format_value(cell, data_type, &opts()).plain_text(),
                    *expected,
                    "{:?} as {:?}",
                    cell,
                    data_type
                );
            }
        }
    }

    #[test]
    fn test_money_and_number() {
        let value = CellValue::money(1234.5, "USD");
        assert_eq!(
            format_value(&value, DataType::Money, &opts()).plain_text(),
            "$1,234.50"
        );
        assert_eq!(
            format_value(&CellValue::Number(9876.0), DataType::Number, &opts()).plain_text(),
            "9,876"
        );
    }

    #[test]
    fn test_financial_selector() {
        let mut fields = BTreeMap::new();
        fields.insert("net".to_string(), CellValue::money(250.0, "EUR"));
        fields.insert("gross".to_string(), CellValue::Number(300.0));
        let value = CellValue::Record(fields);

        let net = opts().with_selector("net");
        assert_eq!(format_value(&value, DataType::Financial, &net).plain_text(), "€250.00");

        let gross = opts().with_selector("gross");
        assert_eq!(format_value(&value, DataType::Financial, &gross).plain_text(), "$300.00");

        let missing = opts().with_selector("tax");
        let fallback = format_value(&value, DataType::Financial, &missing).plain_text();
        assert!(fallback.contains("net"));
    }

    #[test]
    fn test_date_formats() {
        let date = NaiveDate::from_ymd_opt(2023, 11, 5)
            .and_then(|d| d.and_hms_opt(8, 30, 0))
            .unwrap();
        let value = CellValue::Date(date);
        assert_eq!(format_value(&value, DataType::Date, &opts()).plain_text(), "2023-11-05");

        let us = opts().with_date_format("%m/%d/%Y %H:%M");
        assert_eq!(format_value(&value, DataType::Date, &us).plain_text(), "11/05/2023 08:30");
    }

    #[test]
    fn test_days_and_tenure() {
        assert_eq!(format_days(1.0), "1 day");
        assert_eq!(format_days(14.4), "14 days");
        assert_eq!(format_tenure(27.0), "2 yrs 3 mos");
        assert_eq!(format_tenure(12.0), "1 yr");
        assert_eq!(format_tenure(1.0), "1 mo");
        assert_eq!(format_tenure(0.0), "0 mos");
    }

    #[test]
    fn test_boolean_labels() {
        assert_eq!(format_value(&true.into(), DataType::Boolean, &opts()).plain_text(), "Yes");
        assert_eq!(format_value(&false.into(), DataType::Boolean, &opts()).plain_text(), "No");

        let custom = FormatterOptions {
            true_label: Some("Active".to_string()),
            ..Default::default()
        };
        assert_eq!(format_value(&true.into(), DataType::Boolean, &custom).plain_text(), "Active");
    }

    #[test]
    fn test_link_tuple_and_text() {
        let tuple = CellValue::link("https://example.com/u/1", "Juan");
        assert_eq!(
            format_value(&tuple, DataType::Link, &opts()),
            FormattedValue::Link {
                href: "https://example.com/u/1".to_string(),
                label: "Juan".to_string(),
            }
        );

        let bare = CellValue::text("https://example.com");
        match format_value(&bare, DataType::Link, &opts()) {
            FormattedValue::Link { href, label } => assert_eq!(href, label),
            other => panic!("expected link, got {:?}", other),
        }
    }

    #[test]
    fn test_paragraph_truncation() {
        let text = "The quick brown fox jumps over the lazy dog";
        let short = opts().with_max_length(9);
        match format_value(&CellValue::text(text), DataType::Paragraph, &short) {
            FormattedValue::Paragraph { preview, full, truncated } => {
                assert_eq!(preview, "The quick…");
                assert_eq!(full, text);
                assert!(truncated);
            }
            other => panic!("expected paragraph, got {:?}", other),
        }

        match format_value(&CellValue::text("short"), DataType::Paragraph, &opts()) {
            FormattedValue::Paragraph { truncated, .. } => assert!(!truncated),
            other => panic!("expected paragraph, got {:?}", other),
        }
    }

    #[test]
    fn test_list_join() {
        let value = CellValue::List(vec!["red".into(), CellValue::Empty, 3.0.into()]);
        let formatted = format_value(&value, DataType::List, &opts());
        assert_eq!(formatted, FormattedValue::List(vec!["red".to_string(), "3".to_string()]));
        assert_eq!(formatted.plain_text(), "red, 3");

        let piped = opts().with_separator(" | ");
        assert_eq!(join_list(&["a".to_string(), "b".to_string()], &piped), "a | b");
        assert_eq!(format_value(&value, DataType::List, &piped).plain_text_with(&piped), "red | 3");
    }

    #[test]
    fn test_empty_is_blank_for_every_type() {
        for data_type in [DataType::Money, DataType::Link, DataType::Paragraph, DataType::Date] {
            assert_eq!(
                format_value(&CellValue::Empty, data_type, &opts()).plain_text(),
                ""
            );
        }
    }
}
