//! FILENAME: core/table-engine/src/view.rs
//! Table View - Renderable output for the frontend.
//!
//! A view is a snapshot: headers with their sort indicators, the visible
//! rows in display order with formatted cells, and an optional footer.
//! Every visible row remembers its index in the raw data so callers can
//! map interactions back to source records.

use cell_engine::{FormattedValue, Row, TextAlign};
use serde::{Deserialize, Serialize};

use crate::definition::SortDirection;

// ============================================================================
// HEADER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderCell {
    pub label: String,
    pub text_align: TextAlign,
    /// False for columns excluded from sorting; clicks are ignored.
    pub sortable: bool,
    /// Direction of this column if it is an active sort key.
    pub sort_direction: Option<SortDirection>,
    /// Position among active sort keys (0 = primary).
    pub sort_priority: Option<usize>,
}

// ============================================================================
// BODY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewCell {
    pub value: FormattedValue,
    pub text_align: TextAlign,
}

impl ViewCell {
    pub fn text(&self) -> String {
        self.value.plain_text()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRow {
    /// Index of this row in the raw data.
    pub source_index: usize,
    pub cells: Vec<ViewCell>,
}

impl ViewRow {
    pub fn texts(&self) -> Vec<String> {
        self.cells.iter().map(ViewCell::text).collect()
    }
}

// ============================================================================
// TABLE VIEW
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<ViewRow>,
    /// Formatted footer cells, if a reducer was supplied.
    pub footer: Option<Vec<ViewCell>>,
    /// Raw footer values as returned by the reducer.
    #[serde(skip)]
    pub footer_values: Option<Row>,
    /// Number of raw rows before search.
    pub total_count: usize,
}

impl TableView {
    /// Raw-data indices of the visible rows, in display order.
    pub fn row_order(&self) -> Vec<usize> {
        self.rows.iter().map(|r| r.source_index).collect()
    }

    /// The raw rows behind the view, in display order.
    pub fn visible_rows<'d>(&self, data: &'d [Row]) -> Vec<&'d Row> {
        self.rows
            .iter()
            .filter_map(|r| data.get(r.source_index))
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.rows.len()
    }
}
