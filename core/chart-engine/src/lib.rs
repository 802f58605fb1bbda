//! FILENAME: core/chart-engine/src/lib.rs
//! Chart subsystem: axis bounds, scales and SVG line paths.
//!
//! Everything here is a pure computation over caller-owned points; the
//! output is path data and tick positions for a rendering layer.
//!
//! Layers:
//! - `data`: Input points and JSON loading
//! - `scale`: Bounds derivation and pixel scales
//! - `curve` / `path`: Interpolation and SVG path data
//! - `line`: Per-series segments with gap handling
//! - `chart`: Line chart composition from configuration

pub mod chart;
pub mod curve;
pub mod data;
pub mod error;
pub mod line;
pub mod path;
pub mod scale;

pub use chart::{render_line_chart, AxisTick, LineChartConfig, LineChartView, Margin, SeriesConfig, SeriesView};
pub use curve::Curve;
pub use data::{points_from_json, series, DataPoint};
pub use error::ChartError;
pub use line::{render_segments, LineGenerator, PathSegment, StrokeStyle};
pub use path::PathBuilder;
pub use scale::{derive_bounds, derive_bounds_for, nice_ceiling, nice_step, AxisBounds, LinearScale, Scale};
