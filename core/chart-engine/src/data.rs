//! FILENAME: core/chart-engine/src/data.rs
//! PURPOSE: Chart input points.
//! CONTEXT: A point carries an ordinal `index` (the x position) and one
//! optional value per series key. Missing and null values mean "no datum
//! here", never zero.

use log::debug;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ChartError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub index: usize,
    #[serde(default)]
    pub values: FxHashMap<String, Option<f64>>,
}

impl DataPoint {
    pub fn new(index: usize) -> Self {
        DataPoint {
            index,
            values: FxHashMap::default(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Option<f64>>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// The series value if it is present, non-null and finite.
    pub fn value(&self, key: &str) -> Option<f64> {
        self.values
            .get(key)
            .copied()
            .flatten()
            .filter(|v| v.is_finite())
    }

    pub fn is_defined(&self, key: &str) -> bool {
        self.value(key).is_some()
    }
}

/// Builds a single-series sequence with indices `0..values.len()`.
pub fn series(key: &str, values: &[Option<f64>]) -> Vec<DataPoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| DataPoint::new(i).with(key, *v))
        .collect()
}

/// Reads points from the flat JSON shape dashboards send:
/// `[{"index": 0, "sales": 3, "cost": null}, ...]`.
///
/// `index` defaults to the array position. Numeric fields become values,
/// `null` becomes an explicit gap, anything else is skipped.
pub fn points_from_json(json: &str) -> Result<Vec<DataPoint>, ChartError> {
    let parsed: Value = serde_json::from_str(json)?;
    let items = parsed.as_array().ok_or(ChartError::NotAnArray)?;

    let points = items
        .iter()
        .enumerate()
        .map(|(position, item)| {
            let mut point = DataPoint::new(position);
            let Some(fields) = item.as_object() else {
                debug!("Skipping non-object data point at {}", position);
                return point;
            };
            for (key, value) in fields {
                match (key.as_str(), value) {
                    ("index", Value::Number(n)) => {
                        if let Some(index) = n.as_u64() {
                            point.index = index as usize;
                        }
                    }
                    (_, Value::Number(n)) => {
                        point.values.insert(key.clone(), n.as_f64());
                    }
                    (_, Value::Null) => {
                        point.values.insert(key.clone(), None);
                    }
                    _ => debug!("Ignoring non-numeric field '{}' at {}", key, position),
                }
            }
            point
        })
        .collect();

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_requires_finite_number() {
        let point = DataPoint::new(0)
            .with("a", 1.0)
            .with("b", None::<f64>)
            .with("c", f64::NAN);
        assert_eq!(point.value("a"), Some(1.0));
        assert_eq!(point.value("b"), None);
        assert_eq!(point.value("c"), None);
        assert_eq!(point.value("missing"), None);
    }

    #[test]
    fn test_points_from_json() {
        let points = points_from_json(
            r#"[{"sales": 1, "label": "Jan"}, {"index": 5, "sales": null}, 3]"#,
        )
        .unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].value("sales"), Some(1.0));
        assert!(!points[0].values.contains_key("label"));
        assert_eq!(points[1].index, 5);
        assert!(!points[1].is_defined("sales"));
        assert_eq!(points[2], DataPoint::new(2));
    }

    #[test]
    fn test_points_from_json_rejects_non_array() {
        assert!(matches!(points_from_json("{}"), Err(ChartError::NotAnArray)));
        assert!(matches!(points_from_json("[1,"), Err(ChartError::InvalidConfig(_))));
    }
}
