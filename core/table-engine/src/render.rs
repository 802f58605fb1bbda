//! FILENAME: core/table-engine/src/render.rs
//! PURPOSE: Custom cell renderers that override default formatting.
//! CONTEXT: A column may carry a renderer; when present it fully replaces
//! the default formatted value for that column. The renderer sees the
//! column, the cell position, the raw and formatted value, and the whole
//! raw dataset so it can look up sibling cells.

use std::fmt;
use std::sync::Arc;

use cell_engine::{CellValue, FormattedValue, Row};
use serde::{Deserialize, Serialize};

use crate::definition::Column;

/// Where a cell sits. `row_index` indexes the caller's raw data, not the
/// visible order, so it stays valid across search and sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellPosition {
    pub column_index: usize,
    pub row_index: usize,
}

/// Everything a renderer may look at for one cell.
pub struct RenderContext<'a> {
    pub column: &'a Column,
    pub position: CellPosition,
    pub value: &'a CellValue,
    pub formatted: &'a FormattedValue,
    pub data: &'a [Row],
}

impl<'a> RenderContext<'a> {
    /// The raw value of another column in the same row.
    pub fn sibling(&self, column_index: usize) -> Option<&'a CellValue> {
        self.data
            .get(self.position.row_index)
            .and_then(|row| row.get(column_index))
    }
}

pub trait CellRenderer: Send + Sync {
    fn render(&self, ctx: &RenderContext<'_>) -> FormattedValue;
}

impl<F> CellRenderer for F
where
    F: Fn(&RenderContext<'_>) -> FormattedValue + Send + Sync,
{
    fn render(&self, ctx: &RenderContext<'_>) -> FormattedValue {
        self(ctx)
    }
}

/// Shared handle to a column's renderer.
#[derive(Clone)]
pub struct CustomRenderer(Arc<dyn CellRenderer>);

impl CustomRenderer {
    pub fn new(renderer: impl CellRenderer + 'static) -> Self {
        CustomRenderer(Arc::new(renderer))
    }

    pub fn render(&self, ctx: &RenderContext<'_>) -> FormattedValue {
        self.0.render(ctx)
    }
}

impl fmt::Debug for CustomRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomRenderer(..)")
    }
}
