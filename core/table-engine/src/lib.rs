//! FILENAME: core/table-engine/src/lib.rs
//! Table subsystem: search, sort, format and export of tabular data.
//!
//! The engine is a pure function of its inputs. Callers hold the raw rows
//! and the view state and re-project whenever either changes.
//!
//! Layers:
//! - `definition`: Serializable column model (what the table IS)
//! - `render`: Custom cell renderers
//! - `footer`: Footer reducers and declarative aggregates
//! - `engine`: Projection engine (HOW we calculate)
//! - `view`: Renderable output (WHAT we display)
//! - `state`: Search/sort view state and its reducer
//! - `export`: CSV export

pub mod definition;
pub mod engine;
pub mod error;
pub mod export;
pub mod footer;
pub mod render;
pub mod state;
pub mod view;

pub use definition::*;
pub use engine::{matches_search, project, project_with_footer, sort_keys, SortKey, SortState, TableCalculator};
pub use error::{ExportError, TableError};
pub use export::{export_csv, export_csv_to_path, export_csv_to_writer, CsvOptions};
pub use footer::{Aggregation, ColumnAggregates, FooterDefinition, FooterReducer, FooterScope};
pub use render::{CellPosition, CellRenderer, CustomRenderer, RenderContext};
pub use state::{TableAction, TableViewState};
pub use view::*;

pub use cell_engine::{CellValue, DataType, FormattedValue, FormatterOptions, Row, TextAlign};
