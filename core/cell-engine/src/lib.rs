//! FILENAME: core/cell-engine/src/lib.rs
//! PURPOSE: Main library entry point for typed table cells.
//! CONTEXT: Re-exports the cell value model, data types, formatting and
//! comparison used by `table-engine`.

pub mod cell;
pub mod compare;
pub mod data_type;
pub mod format;
pub mod json;
pub mod number_format;

// Re-export commonly used types at the crate root
pub use cell::{CellValue, Money};
pub use compare::compare_values;
pub use data_type::{CurrencyPosition, DataType, FormatterOptions, TextAlign};
pub use format::{format_days, format_tenure, format_value, join_list, FormattedValue};
pub use json::{parse_date, row_from_json};
pub use number_format::{format_general, format_money, format_number, format_percentage};

/// One record of cell values, positionally aligned to a column sequence.
pub type Row = Vec<CellValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_formats_and_orders_a_row() {
        let row: Row = vec![CellValue::text("Juan"), CellValue::money(42.0, "USD")];

        let label = format_value(&row[0], DataType::Text, &FormatterOptions::default());
        let amount = format_value(&row[1], DataType::Money, &FormatterOptions::default());
        assert_eq!(label.plain_text(), "Juan");
        assert_eq!(amount.plain_text(), "$42.00");

        assert_eq!(
            compare_values(&row[1], &CellValue::Number(41.0)),
            std::cmp::Ordering::Greater
        );
    }
}
