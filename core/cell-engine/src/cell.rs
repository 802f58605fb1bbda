//! FILENAME: core/cell-engine/src/cell.rs
//! PURPOSE: Defines the raw value held by a single table cell.
//! CONTEXT: Rows are owned by the caller and arrive as `Vec<CellValue>`.
//! The engine never mutates them; it only reads values to search, sort,
//! format and export.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A monetary amount tagged with its ISO currency code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    pub amount: f64,
    pub currency: String,
}

impl Money {
    pub fn new(amount: f64, currency: impl Into<String>) -> Self {
        Money {
            amount,
            currency: currency.into(),
        }
    }
}

/// Represents the raw data within a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
    Date(NaiveDateTime),
    /// A hyperlink; the `[url, label]` tuple form.
    Link { url: String, label: String },
    List(Vec<CellValue>),
    Money(Money),
    /// Compound value (e.g. a financial breakdown) addressed by selector.
    Record(BTreeMap<String, CellValue>),
}

/// Coarse classification used to order values of different kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum ValueKind {
    Empty,
    Number,
    Date,
    Text,
    Boolean,
    List,
    Record,
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn link(url: impl Into<String>, label: impl Into<String>) -> Self {
        CellValue::Link {
            url: url.into(),
            label: label.into(),
        }
    }

    pub fn money(amount: f64, currency: impl Into<String>) -> Self {
        CellValue::Money(Money::new(amount, currency))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Numeric view of the value: plain numbers and money amounts.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Money(m) => Some(m.amount),
            _ => None,
        }
    }

    /// Walks a dotted selector (`"revenue.net"`) into nested records.
    pub fn select(&self, selector: &str) -> Option<&CellValue> {
        let mut current = self;
        for part in selector.split('.').filter(|p| !p.is_empty()) {
            match current {
                CellValue::Record(fields) => current = fields.get(part)?,
                _ => return None,
            }
        }
        Some(current)
    }

    pub(crate) fn kind(&self) -> ValueKind {
        match self {
            CellValue::Empty => ValueKind::Empty,
            CellValue::Number(_) | CellValue::Money(_) => ValueKind::Number,
            CellValue::Date(_) => ValueKind::Date,
            CellValue::Text(_) | CellValue::Link { .. } => ValueKind::Text,
            CellValue::Boolean(_) => ValueKind::Boolean,
            CellValue::List(_) => ValueKind::List,
            CellValue::Record(_) => ValueKind::Record,
        }
    }

    /// Returns the value as plain text without any type-specific formatting.
    /// This is the fallback for malformed cells and the basis of CSV export.
    pub fn display_value(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => crate::number_format::format_general(*n),
            CellValue::Text(s) => s.clone(),
            CellValue::Boolean(b) => b.to_string(),
            CellValue::Date(d) => {
                if d.num_seconds_from_midnight() == 0 {
                    d.format("%Y-%m-%d").to_string()
                } else {
                    d.format("%Y-%m-%d %H:%M:%S").to_string()
                }
            }
            CellValue::Link { url, .. } => url.clone(),
            CellValue::List(items) => items
                .iter()
                .map(CellValue::display_value)
                .collect::<Vec<_>>()
                .join("; "),
            CellValue::Money(m) => crate::number_format::format_general(m.amount),
            CellValue::Record(_) => self.to_json().to_string(),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::Date(value)
    }
}

impl From<Money> for CellValue {
    fn from(value: Money) -> Self {
        CellValue::Money(value)
    }
}
