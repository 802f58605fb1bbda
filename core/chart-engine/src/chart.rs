//! FILENAME: core/chart-engine/src/chart.rs
//! PURPOSE: Line chart composition from a serializable configuration.
//! CONTEXT: Derives bounds over the configured series, lays out the plot
//! area inside the margins, renders every series and returns the y-axis
//! ticks with their pixel positions. Drawing the result is up to the
//! caller.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::curve::Curve;
use crate::data::DataPoint;
use crate::error::ChartError;
use crate::line::{render_segments, LineGenerator, PathSegment, StrokeStyle};
use crate::scale::{derive_bounds_for, AxisBounds, LinearScale, Scale};

const DEFAULT_TICK_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Margin {
            top: 10.0,
            right: 10.0,
            bottom: 30.0,
            left: 40.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesConfig {
    pub data_key: String,
    /// Curve name; unknown names render as linear.
    #[serde(default = "default_curve")]
    pub curve: String,
    #[serde(default)]
    pub stroke: StrokeStyle,
    #[serde(default)]
    pub connect_nulls: bool,
}

fn default_curve() -> String {
    Curve::Linear.name().to_string()
}

impl SeriesConfig {
    pub fn new(data_key: impl Into<String>) -> Self {
        SeriesConfig {
            data_key: data_key.into(),
            curve: default_curve(),
            stroke: StrokeStyle::default(),
            connect_nulls: false,
        }
    }

    pub fn with_curve(mut self, curve: impl Into<String>) -> Self {
        self.curve = curve.into();
        self
    }

    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn connecting_nulls(mut self) -> Self {
        self.connect_nulls = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineChartConfig {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub margin: Margin,
    pub series: Vec<SeriesConfig>,
    #[serde(default = "default_tick_count")]
    pub tick_count: usize,
}

fn default_tick_count() -> usize {
    DEFAULT_TICK_COUNT
}

impl LineChartConfig {
    pub fn new(width: f64, height: f64, series: Vec<SeriesConfig>) -> Self {
        LineChartConfig {
            width,
            height,
            margin: Margin::default(),
            series,
            tick_count: DEFAULT_TICK_COUNT,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        Ok(serde_json::from_str(json)?)
    }
}

// ============================================================================
// OUTPUT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisTick {
    pub value: f64,
    /// Pixel y of the tick line.
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesView {
    pub data_key: String,
    pub segments: Vec<PathSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineChartView {
    pub width: f64,
    pub height: f64,
    pub bounds: AxisBounds,
    pub y_ticks: Vec<AxisTick>,
    pub series: Vec<SeriesView>,
}

// ============================================================================
// COMPOSER
// ============================================================================

pub fn render_line_chart(config: &LineChartConfig, data: &[DataPoint]) -> LineChartView {
    let keys: Vec<&str> = config.series.iter().map(|s| s.data_key.as_str()).collect();
    let bounds = derive_bounds_for(data, &keys);

    let margin = config.margin;
    let first = data.iter().map(|p| p.index).min().unwrap_or(0) as f64;
    let last = data.iter().map(|p| p.index).max().unwrap_or(0) as f64;

    let x_scale = LinearScale::new((first, last), (margin.left, config.width - margin.right));
    let y_scale = LinearScale::new(
        (bounds.min_value, bounds.max_value),
        (config.height - margin.bottom, margin.top),
    );

    let y_ticks = bounds
        .ticks(config.tick_count)
        .into_iter()
        .map(|value| AxisTick {
            value,
            position: y_scale.apply(value),
        })
        .collect();

    let series: Vec<SeriesView> = config
        .series
        .iter()
        .map(|s| {
            let generator = LineGenerator::new(&s.curve, x_scale, y_scale, s.data_key.clone());
            SeriesView {
                data_key: s.data_key.clone(),
                segments: render_segments(&generator, data, &s.stroke, s.connect_nulls),
            }
        })
        .collect();

    debug!(
        "Line chart {}x{}: {} series, bounds [{}, {}]",
        config.width,
        config.height,
        series.len(),
        bounds.min_value,
        bounds.max_value
    );

    LineChartView {
        width: config.width,
        height: config.height,
        bounds,
        y_ticks,
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::series;

    #[test]
    fn test_config_defaults_from_json() {
        let config = LineChartConfig::from_json(
            r#"{"width": 400, "height": 200, "series": [{"dataKey": "sales"}]}"#,
        )
        .unwrap();
        assert_eq!(config.tick_count, 5);
        assert_eq!(config.margin, Margin::default());
        assert_eq!(config.series[0], SeriesConfig::new("sales"));
    }

    #[test]
    fn test_bad_config_is_an_error() {
        assert!(LineChartConfig::from_json(r#"{"width": "wide"}"#).is_err());
    }

    #[test]
    fn test_render_layout() {
        let mut config = LineChartConfig::new(140.0, 120.0, vec![SeriesConfig::new("v")]);
        config.margin = Margin {
            top: 10.0,
            right: 20.0,
            bottom: 10.0,
            left: 20.0,
        };
        config.tick_count = 2;

        let data = series("v", &[Some(0.0), Some(10.0), Some(15.0)]);
        let view = render_line_chart(&config, &data);

        assert_eq!(view.bounds.max_value, 15.0);
        assert_eq!(
            view.y_ticks,
            vec![
                AxisTick { value: 0.0, position: 110.0 },
                AxisTick { value: 15.0, position: 10.0 },
            ]
        );
        assert_eq!(view.series[0].segments[0].path, "M20,110L70,43.333L120,10");
    }
}
