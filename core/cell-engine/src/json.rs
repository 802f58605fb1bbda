//! FILENAME: core/cell-engine/src/json.rs
//! PURPOSE: Conversion between loosely typed JSON rows and CellValue.
//! CONTEXT: Dashboard data usually arrives as JSON arrays whose slots hold
//! whatever the backend produced. The column's DataType decides how each
//! slot is read; anything that does not fit is kept as text.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::cell::{CellValue, Money};
use crate::data_type::DataType;

impl CellValue {
    /// Reads one JSON slot as a cell of the given column type.
    pub fn from_json(value: &Value, data_type: DataType) -> CellValue {
        match value {
            Value::Null => CellValue::Empty,
            Value::Bool(b) => CellValue::Boolean(*b),
            Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or(CellValue::Empty),
            Value::String(s) => string_cell(s, data_type),
            Value::Array(items) => {
                if data_type == DataType::Link {
                    if let [Value::String(url), Value::String(label)] = items.as_slice() {
                        return CellValue::link(url.clone(), label.clone());
                    }
                }
                CellValue::List(items.iter().map(natural).collect())
            }
            Value::Object(fields) => object_cell(fields),
        }
    }

    /// Plain JSON form (no enum tags), used for record display and export.
    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Empty => Value::Null,
            CellValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            CellValue::Text(s) => Value::String(s.clone()),
            CellValue::Boolean(b) => Value::Bool(*b),
            CellValue::Date(_) => Value::String(self.display_value()),
            CellValue::Link { url, label } => {
                Value::Array(vec![Value::String(url.clone()), Value::String(label.clone())])
            }
            CellValue::List(items) => Value::Array(items.iter().map(CellValue::to_json).collect()),
            CellValue::Money(m) => {
                let mut fields = Map::new();
                fields.insert(
                    "amount".to_string(),
                    serde_json::Number::from_f64(m.amount)
                        .map(Value::Number)
                        .unwrap_or(Value::Null),
                );
                fields.insert("currency".to_string(), Value::String(m.currency.clone()));
                Value::Object(fields)
            }
            CellValue::Record(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

/// Reads a JSON row positionally against the declared column types.
/// Missing trailing slots become `Empty`.
pub fn row_from_json(values: &[Value], data_types: &[DataType]) -> Vec<CellValue> {
    data_types
        .iter()
        .enumerate()
        .map(|(i, data_type)| {
            values
                .get(i)
                .map(|v| CellValue::from_json(v, *data_type))
                .unwrap_or_default()
        })
        .collect()
}

/// Parses the date shapes dashboards commonly send: RFC 3339 timestamps,
/// `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` and bare `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, pattern) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn string_cell(s: &str, data_type: DataType) -> CellValue {
    match data_type {
        DataType::Date => parse_date(s)
            .map(CellValue::Date)
            .unwrap_or_else(|| CellValue::text(s)),
        DataType::Number | DataType::Money | DataType::Days | DataType::Tenure | DataType::Percent => {
            // "NaN" and "inf" parse as f64; they stay text.
            match s.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => CellValue::Number(n),
                _ => CellValue::text(s),
            }
        }
        _ => CellValue::text(s),
    }
}

fn object_cell(fields: &Map<String, Value>) -> CellValue {
    if let (Some(amount), Some(Value::String(currency))) =
        (fields.get("amount").and_then(Value::as_f64), fields.get("currency"))
    {
        if fields.len() == 2 {
            return CellValue::Money(Money::new(amount, currency.clone()));
        }
    }

    let record: BTreeMap<String, CellValue> = fields
        .iter()
        .map(|(k, v)| (k.clone(), natural(v)))
        .collect();
    CellValue::Record(record)
}

/// Conversion for nested values, which carry no declared type.
fn natural(value: &Value) -> CellValue {
    CellValue::from_json(value, DataType::Text)
}
