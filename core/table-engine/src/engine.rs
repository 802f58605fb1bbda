//! FILENAME: core/table-engine/src/engine.rs
//! Table Calculation Engine
//!
//! Turns columns + raw rows + view state into a `TableView`:
//! 1. Search: keep rows where a searchable column's formatted text
//!    contains the term (case-insensitive).
//! 2. Sort: stable composite sort over the clicked column and every
//!    column carrying a `sort_order`.
//! 3. Format: default formatting per data type, replaced by the column's
//!    custom renderer when one is set.
//! 4. Footer: optional reducer over the visible or the raw rows.

use std::cmp::Ordering;

use cell_engine::{compare_values, CellValue, FormattedValue, Row};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::definition::{Column, SortDirection, TableDefinition};
use crate::footer::{FooterReducer, FooterScope};
use crate::render::{CellPosition, RenderContext};
use crate::view::{HeaderCell, TableView, ViewCell, ViewRow};

static EMPTY_CELL: CellValue = CellValue::Empty;

/// Missing trailing cells read as empty.
pub(crate) fn cell_at(row: &Row, column_index: usize) -> &CellValue {
    row.get(column_index).unwrap_or(&EMPTY_CELL)
}

// ============================================================================
// SORT STATE
// ============================================================================

/// The column the user clicked, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    pub column_index: usize,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column_index: usize, direction: SortDirection) -> Self {
        SortState {
            column_index,
            direction,
        }
    }
}

/// One active key of the composite comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub column_index: usize,
    pub direction: SortDirection,
}

pub type SortKeys = SmallVec<[SortKey; 4]>;

/// Builds the ordered key list: the clicked column first (if sortable),
/// then declared `sort_order` columns by ascending priority. Ties in
/// `sort_order` keep declaration order.
pub fn sort_keys(columns: &[Column], sort: Option<SortState>) -> SortKeys {
    let mut keys = SortKeys::new();

    if let Some(state) = sort {
        match columns.get(state.column_index) {
            Some(column) if column.is_sortable() => keys.push(SortKey {
                column_index: state.column_index,
                direction: state.direction,
            }),
            Some(column) => warn!("Ignoring sort on excluded column '{}'", column.label),
            None => warn!("Ignoring sort on unknown column index {}", state.column_index),
        }
    }

    let mut declared: Vec<(u32, usize)> = columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_sortable())
        .filter_map(|(i, c)| c.sort_order.map(|order| (order, i)))
        .collect();
    declared.sort();

    for (_, column_index) in declared {
        if keys.iter().any(|k| k.column_index == column_index) {
            continue;
        }
        keys.push(SortKey {
            column_index,
            direction: columns[column_index].sort_direction.unwrap_or_default(),
        });
    }

    keys
}

/// Compares two rows key by key; the first non-equal key decides.
fn compare_rows(columns: &[Column], keys: &[SortKey], a: &Row, b: &Row) -> Ordering {
    for key in keys {
        let column = &columns[key.column_index];
        let va = column.sort_value(cell_at(a, key.column_index));
        let vb = column.sort_value(cell_at(b, key.column_index));

        let ordering = key.direction.apply(compare_values(va, vb));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// True when any searchable column's formatted text contains `needle`.
/// `needle` must already be lowercased.
pub fn matches_search(columns: &[Column], row: &Row, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_searchable())
        .any(|(i, c)| {
            c.search_text(cell_at(row, i))
                .to_lowercase()
                .contains(needle)
        })
}

// ============================================================================
// TABLE CALCULATOR
// ============================================================================

pub struct TableCalculator<'a> {
    columns: &'a [Column],
    data: &'a [Row],

    /// Lowercased search term.
    needle: String,

    sort: Option<SortState>,

    footer: Option<(&'a dyn FooterReducer, FooterScope)>,

    /// Raw-data indices of visible rows, in display order.
    order: Vec<usize>,

    keys: SortKeys,
}

impl<'a> TableCalculator<'a> {
    pub fn new(
        columns: &'a [Column],
        data: &'a [Row],
        search_term: &str,
        sort: Option<SortState>,
    ) -> Self {
        TableCalculator {
            columns,
            data,
            needle: search_term.to_lowercase(),
            sort,
            footer: None,
            order: Vec::new(),
            keys: SortKeys::new(),
        }
    }

    pub fn with_footer(mut self, reducer: &'a dyn FooterReducer, scope: FooterScope) -> Self {
        self.footer = Some((reducer, scope));
        self
    }

    /// Executes the full calculation and returns the rendered view.
    pub fn calculate(&mut self) -> TableView {
        // Step 1: Search
        self.apply_search();

        // Step 2: Resolve sort keys
        self.keys = sort_keys(self.columns, self.sort);

        // Step 3: Stable sort
        self.apply_sort();

        debug!(
            "Projected {} of {} rows with {} sort key(s)",
            self.order.len(),
            self.data.len(),
            self.keys.len()
        );

        // Step 4: Generate the view
        self.generate_view()
    }

    // ========================================================================
    // SEARCH / SORT
    // ========================================================================

    fn apply_search(&mut self) {
        let columns = self.columns;
        let needle = self.needle.as_str();
        self.order = self
            .data
            .iter()
            .enumerate()
            .filter(|(_, row)| matches_search(columns, row, needle))
            .map(|(i, _)| i)
            .collect();
    }

    fn apply_sort(&mut self) {
        if self.keys.is_empty() {
            return;
        }
        let columns = self.columns;
        let data = self.data;
        let keys = &self.keys;
        self.order
            .sort_by(|&a, &b| compare_rows(columns, keys, &data[a], &data[b]));
    }

    // ========================================================================
    // VIEW GENERATION
    // ========================================================================

    fn generate_view(&self) -> TableView {
        let footer_values = self.compute_footer();
        let footer = footer_values.as_ref().map(|values| self.format_footer(values));

        TableView {
            headers: self.generate_headers(),
            rows: self.order.iter().map(|&i| self.generate_row(i)).collect(),
            footer,
            footer_values,
            total_count: self.data.len(),
        }
    }

    fn generate_headers(&self) -> Vec<HeaderCell> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let active = self.keys.iter().position(|k| k.column_index == i);
                HeaderCell {
                    label: column.label.clone(),
                    text_align: column.resolved_align(),
                    sortable: column.is_sortable(),
                    sort_direction: active.map(|p| self.keys[p].direction),
                    sort_priority: active,
                }
            })
            .collect()
    }

    fn generate_row(&self, row_index: usize) -> ViewRow {
        let row = &self.data[row_index];
        let cells = self
            .columns
            .iter()
            .enumerate()
            .map(|(column_index, column)| {
                let value = cell_at(row, column_index);
                let formatted = column.format(value);
                let value = match &column.render {
                    Some(renderer) => renderer.render(&RenderContext {
                        column,
                        position: CellPosition {
                            column_index,
                            row_index,
                        },
                        value,
                        formatted: &formatted,
                        data: self.data,
                    }),
                    None => formatted,
                };
                ViewCell {
                    value,
                    text_align: column.resolved_align(),
                }
            })
            .collect();

        ViewRow {
            source_index: row_index,
            cells,
        }
    }

    fn compute_footer(&self) -> Option<Row> {
        let (reducer, scope) = self.footer?;
        let rows: Vec<&Row> = match scope {
            FooterScope::Visible => self.order.iter().map(|&i| &self.data[i]).collect(),
            FooterScope::All => self.data.iter().collect(),
        };
        debug!("Computing footer over {} row(s) ({:?})", rows.len(), scope);
        Some(reducer.reduce(&rows))
    }

    fn format_footer(&self, values: &Row) -> Vec<ViewCell> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| ViewCell {
                value: match cell_at(values, i) {
                    CellValue::Empty => FormattedValue::default(),
                    value => column.format(value),
                },
                text_align: column.resolved_align(),
            })
            .collect()
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Projects raw data into a view without a footer.
pub fn project(
    columns: &[Column],
    data: &[Row],
    search_term: &str,
    sort: Option<SortState>,
) -> TableView {
    TableCalculator::new(columns, data, search_term, sort).calculate()
}

/// Projects raw data and appends a footer computed by `reducer` over
/// the rows selected by `scope`.
pub fn project_with_footer(
    columns: &[Column],
    data: &[Row],
    search_term: &str,
    sort: Option<SortState>,
    reducer: &dyn FooterReducer,
    scope: FooterScope,
) -> TableView {
    TableCalculator::new(columns, data, search_term, sort)
        .with_footer(reducer, scope)
        .calculate()
}

impl TableDefinition {
    /// Projects with the definition's own footer, if it declares one.
    pub fn project(&self, data: &[Row], search_term: &str, sort: Option<SortState>) -> TableView {
        match &self.footer {
            Some(footer) => {
                let reducer = footer.reducer();
                project_with_footer(&self.columns, data, search_term, sort, &reducer, footer.scope)
            }
            None => project(&self.columns, data, search_term, sort),
        }
    }
}
