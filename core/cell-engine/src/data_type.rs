//! FILENAME: core/cell-engine/src/data_type.rs
//! PURPOSE: Declared column data types, alignment and formatter options.
//! CONTEXT: A column's `DataType` decides how every cell in that column is
//! formatted and compared. Options are optional knobs read from JSON
//! table definitions, so every field has a sensible default.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The declared type of a column's values.
///
/// Parsed from the names used in table definitions (`"money"`,
/// `"paragraph"`, ...). Unknown names become [`DataType::Text`], which
/// formats by plain string coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataType {
    #[default]
    Text,
    Number,
    Money,
    Financial,
    Date,
    Days,
    Tenure,
    Boolean,
    Link,
    Paragraph,
    List,
    Percent,
}

impl DataType {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "number" => DataType::Number,
            "money" => DataType::Money,
            "financial" => DataType::Financial,
            "date" => DataType::Date,
            "days" => DataType::Days,
            "tenure" => DataType::Tenure,
            "boolean" => DataType::Boolean,
            "link" => DataType::Link,
            "paragraph" => DataType::Paragraph,
            "list" => DataType::List,
            "percent" => DataType::Percent,
            _ => DataType::Text,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DataType::Text => "text",
            DataType::Number => "number",
            DataType::Money => "money",
            DataType::Financial => "financial",
            DataType::Date => "date",
            DataType::Days => "days",
            DataType::Tenure => "tenure",
            DataType::Boolean => "boolean",
            DataType::Link => "link",
            DataType::Paragraph => "paragraph",
            DataType::List => "list",
            DataType::Percent => "percent",
        }
    }

    /// Types whose values read best right-aligned.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            DataType::Number
                | DataType::Money
                | DataType::Financial
                | DataType::Days
                | DataType::Tenure
                | DataType::Percent
        )
    }
}

impl From<String> for DataType {
    fn from(value: String) -> Self {
        DataType::from_name(&value)
    }
}

impl From<DataType> for String {
    fn from(value: DataType) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text alignment options for cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    #[default]
    General, // Auto: numbers right, text left
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Resolves `General` against the column's data type.
    pub fn resolve(self, data_type: DataType) -> TextAlign {
        match self {
            TextAlign::General if data_type.is_numeric() => TextAlign::Right,
            TextAlign::General => TextAlign::Left,
            other => other,
        }
    }
}

/// Position of currency symbol relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyPosition {
    #[default]
    Before, // $100
    After,  // 100 kr
}

/// Per-column formatting knobs. Every field is optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatterOptions {
    /// Fixed number of decimals for number, money and percent columns.
    pub decimal_places: Option<u8>,

    /// Group thousands with `,` (default on).
    pub thousands_separator: Option<bool>,

    /// Prefix/suffix the currency symbol on money columns (default on).
    pub show_currency: Option<bool>,

    /// Currency code overriding the one carried by the value.
    pub currency: Option<String>,

    /// Dotted path into a compound value (financial columns).
    pub selector: Option<String>,

    /// chrono strftime pattern for date columns.
    pub date_format: Option<String>,

    /// Preview length for paragraph columns, in characters.
    pub max_length: Option<usize>,

    /// Item separator for list columns.
    pub separator: Option<String>,

    pub true_label: Option<String>,
    pub false_label: Option<String>,
}

impl FormatterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decimal_places(mut self, decimal_places: u8) -> Self {
        self.decimal_places = Some(decimal_places);
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_show_currency(mut self, show: bool) -> Self {
        self.show_currency = Some(show);
        self
    }

    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_falls_back_to_text() {
        assert_eq!(DataType::from_name("sparkline"), DataType::Text);
        assert_eq!(DataType::from_name(" Money "), DataType::Money);
    }

    #[test]
    fn test_data_type_serde_uses_names() {
        let parsed: DataType = serde_json::from_str("\"paragraph\"").unwrap();
        assert_eq!(parsed, DataType::Paragraph);

        let unknown: DataType = serde_json::from_str("\"gauge\"").unwrap();
        assert_eq!(unknown, DataType::Text);

        assert_eq!(serde_json::to_string(&DataType::Days).unwrap(), "\"days\"");
    }

    #[test]
    fn test_general_alignment_follows_type() {
        assert_eq!(TextAlign::General.resolve(DataType::Money), TextAlign::Right);
        assert_eq!(TextAlign::General.resolve(DataType::Link), TextAlign::Left);
        assert_eq!(TextAlign::Center.resolve(DataType::Money), TextAlign::Center);
    }

    #[test]
    fn test_options_deserialize_camel_case() {
        let options: FormatterOptions =
            serde_json::from_str(r#"{"showCurrency": false, "decimalPlaces": 1}"#).unwrap();
        assert_eq!(options.show_currency, Some(false));
        assert_eq!(options.decimal_places, Some(1));
        assert_eq!(options.currency, None);
    }
}
