//! FILENAME: core/cell-engine/src/number_format.rs
//! PURPOSE: Number formatting utilities for displaying cell values.
//! CONTEXT: Turns raw numeric values into display strings for number,
//! money and percent columns according to the column's FormatterOptions.

use crate::data_type::{CurrencyPosition, FormatterOptions};

/// Default decimals for money columns.
pub const MONEY_DECIMAL_PLACES: u8 = 2;

/// Format a number column value.
pub fn format_number(value: f64, options: &FormatterOptions) -> String {
    let separator = options.thousands_separator.unwrap_or(true);
    match options.decimal_places {
        Some(places) => format_decimal(value, places, separator),
        None => {
            let general = format_general(value);
            if separator && !general.contains('e') {
                add_thousands_separator(&general)
            } else {
                general
            }
        }
    }
}

/// Format a money amount. `currency` is the ISO code carried by the value;
/// the options may override it or hide the symbol entirely.
pub fn format_money(amount: f64, currency: Option<&str>, options: &FormatterOptions) -> String {
    let places = options.decimal_places.unwrap_or(MONEY_DECIMAL_PLACES);
    let code = options.currency.as_deref().or(currency);

    if !options.show_currency.unwrap_or(true) {
        let formatted = add_thousands_separator(&format!("{:.prec$}", amount.abs(), prec = places as usize));
        return if amount < 0.0 {
            format!("({})", formatted)
        } else {
            formatted
        };
    }

    let (symbol, position) = currency_symbol(code.unwrap_or("USD"));
    format_currency(amount, places, &symbol, position)
}

/// Maps an ISO currency code to its display symbol and placement.
pub fn currency_symbol(code: &str) -> (String, CurrencyPosition) {
    match code.trim().to_ascii_uppercase().as_str() {
        "USD" | "CAD" | "AUD" | "MXN" => ("$".to_string(), CurrencyPosition::Before),
        "EUR" => ("€".to_string(), CurrencyPosition::Before),
        "GBP" => ("£".to_string(), CurrencyPosition::Before),
        "JPY" | "CNY" => ("¥".to_string(), CurrencyPosition::Before),
        "SEK" | "NOK" | "DKK" => (" kr".to_string(), CurrencyPosition::After),
        "" => (String::new(), CurrencyPosition::Before),
        other => (format!("{} ", other), CurrencyPosition::Before),
    }
}

/// Format a number in general format (auto-detect best representation).
pub fn format_general(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let abs_value = value.abs();

    // Use scientific notation for very large or very small numbers
    if abs_value >= 1e15 || abs_value < 1e-4 {
        return format!("{:e}", value);
    }

    // For integers, don't show decimal point
    if value.fract() == 0.0 {
        return format!("{:.0}", value);
    }

    // For decimals, show up to 10 digits but trim trailing zeros
    let formatted = format!("{:.10}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Format a number with specified decimal places and optional thousands separator.
pub fn format_decimal(value: f64, decimal_places: u8, use_thousands_separator: bool) -> String {
    let rounded = format!("{:.prec$}", value, prec = decimal_places as usize);

    if use_thousands_separator {
        add_thousands_separator(&rounded)
    } else {
        rounded
    }
}

/// Add thousands separators to a numeric string.
pub fn add_thousands_separator(s: &str) -> String {
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (s, None),
    };

    let negative = integer_part.starts_with('-');
    let digits: String = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::new();
    let len = digits.len();

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    if negative {
        result = format!("-{}", result);
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}

/// Format a number as currency. Negative amounts are shown in parentheses.
pub fn format_currency(
    value: f64,
    decimal_places: u8,
    symbol: &str,
    position: CurrencyPosition,
) -> String {
    let formatted = add_thousands_separator(&format!("{:.prec$}", value.abs(), prec = decimal_places as usize));

    let with_symbol = match position {
        CurrencyPosition::Before => format!("{}{}", symbol, formatted),
        CurrencyPosition::After => format!("{}{}", formatted, symbol),
    };

    if value < 0.0 {
        format!("({})", with_symbol)
    } else {
        with_symbol
    }
}

/// Format a fraction as percentage.
pub fn format_percentage(value: f64, decimal_places: u8) -> String {
    let percentage = value * 100.0;
    format!("{:.prec$}%", percentage, prec = decimal_places as usize)
}
