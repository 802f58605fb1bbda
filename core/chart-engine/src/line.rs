//! FILENAME: core/chart-engine/src/line.rs
//! PURPOSE: Line path generation for one series, with gap handling.
//! CONTEXT: A point is defined for a series when its value is present and
//! finite. With `connect_nulls` the gaps are bridged by a single path;
//! without it every maximal run of defined points becomes its own segment
//! with its own curve fit.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::curve::Curve;
use crate::data::DataPoint;
use crate::path::PathBuilder;
use crate::scale::Scale;

/// Stroke passed through untouched to every segment of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StrokeStyle {
    pub color: String,
    pub width: f64,
    pub dash_array: Option<String>,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        StrokeStyle {
            color: "#3366cc".to_string(),
            width: 2.0,
            dash_array: None,
        }
    }
}

impl StrokeStyle {
    pub fn solid(color: impl Into<String>, width: f64) -> Self {
        StrokeStyle {
            color: color.into(),
            width,
            dash_array: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathSegment {
    /// `"{data_key}-{first index}"`; unique within a series.
    pub key: String,
    /// SVG path data.
    pub path: String,
    pub stroke: StrokeStyle,
    /// Indices of the points this segment passes through.
    pub indices: Vec<usize>,
}

/// Curve plus the two pixel mappings for one series.
#[derive(Debug, Clone)]
pub struct LineGenerator<X, Y> {
    pub curve: Curve,
    pub x_scale: X,
    pub y_scale: Y,
    pub data_key: String,
}

impl<X: Scale, Y: Scale> LineGenerator<X, Y> {
    pub fn new(curve_name: &str, x_scale: X, y_scale: Y, data_key: impl Into<String>) -> Self {
        LineGenerator {
            curve: Curve::from_name(curve_name),
            x_scale,
            y_scale,
            data_key: data_key.into(),
        }
    }

    /// `(index, value)` if the point is defined for this series.
    fn defined(&self, point: &DataPoint) -> Option<(usize, f64)> {
        point.value(&self.data_key).map(|v| (point.index, v))
    }

    /// Path data through the given run of defined points.
    pub fn path(&self, run: &[(usize, f64)]) -> String {
        let pixels: Vec<(f64, f64)> = run
            .iter()
            .map(|&(index, value)| (self.x_scale.apply(index as f64), self.y_scale.apply(value)))
            .collect();
        let mut path = PathBuilder::new();
        self.curve.write(&pixels, &mut path);
        path.finish()
    }

    fn segment(&self, run: &[(usize, f64)], stroke: &StrokeStyle) -> Option<PathSegment> {
        let &(first, _) = run.first()?;
        Some(PathSegment {
            key: format!("{}-{}", self.data_key, first),
            path: self.path(run),
            stroke: stroke.clone(),
            indices: run.iter().map(|&(index, _)| index).collect(),
        })
    }
}

/// Renders one series into path segments, in index order.
pub fn render_segments<X: Scale, Y: Scale>(
    generator: &LineGenerator<X, Y>,
    data: &[DataPoint],
    stroke: &StrokeStyle,
    connect_nulls: bool,
) -> Vec<PathSegment> {
    let segments: Vec<PathSegment> = if connect_nulls {
        let defined: Vec<(usize, f64)> = data.iter().filter_map(|p| generator.defined(p)).collect();
        generator.segment(&defined, stroke).into_iter().collect()
    } else {
        let mut segments = Vec::new();
        let mut run: Vec<(usize, f64)> = Vec::new();
        for point in data {
            match generator.defined(point) {
                Some(value) => run.push(value),
                None => {
                    segments.extend(generator.segment(&run, stroke));
                    run.clear();
                }
            }
        }
        segments.extend(generator.segment(&run, stroke));
        segments
    };

    debug!(
        "Series '{}': {} point(s) -> {} segment(s)",
        generator.data_key,
        data.len(),
        segments.len()
    );
    segments
}
