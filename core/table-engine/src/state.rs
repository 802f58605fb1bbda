//! FILENAME: core/table-engine/src/state.rs
//! PURPOSE: Ephemeral view state (search term + clicked sort column).
//! CONTEXT: The state is a value; every user interaction produces a new
//! state through `reduce`, and the view is recomputed from scratch with
//! `project`. Nothing here is persisted.

use cell_engine::Row;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::definition::{Column, SortDirection};
use crate::engine::{self, SortState};
use crate::view::TableView;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableViewState {
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub sort: Option<SortState>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    SetSearch(String),
    /// A click on the header of the column at this index.
    ClickHeader(usize),
    ClearSort,
}

impl TableViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one interaction and returns the next state.
    pub fn reduce(&self, columns: &[Column], action: TableAction) -> TableViewState {
        match action {
            TableAction::SetSearch(term) => TableViewState {
                search_term: term,
                sort: self.sort,
            },
            TableAction::ClickHeader(column_index) => {
                let column = match columns.get(column_index) {
                    Some(column) if column.is_sortable() => column,
                    _ => {
                        debug!("Header click on column {} ignored", column_index);
                        return self.clone();
                    }
                };

                let direction = match self.sort {
                    Some(current) if current.column_index == column_index => {
                        current.direction.toggled()
                    }
                    _ => column.sort_direction.unwrap_or(SortDirection::Asc),
                };

                TableViewState {
                    search_term: self.search_term.clone(),
                    sort: Some(SortState::new(column_index, direction)),
                }
            }
            TableAction::ClearSort => TableViewState {
                search_term: self.search_term.clone(),
                sort: None,
            },
        }
    }

    pub fn project(&self, columns: &[Column], data: &[Row]) -> TableView {
        engine::project(columns, data, &self.search_term, self.sort)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cell_engine::DataType;

    fn columns() -> Vec<Column> {
        vec![
            Column::text("Name"),
            Column::new("Age", DataType::Number).with_sort(1, SortDirection::Desc),
            Column::text("Notes").without_sort(),
        ]
    }

    #[test]
    fn test_click_same_header_toggles() {
        let columns = columns();
        let state = TableViewState::new().reduce(&columns, TableAction::ClickHeader(0));
        assert_eq!(state.sort, Some(SortState::new(0, SortDirection::Asc)));

        let state = state.reduce(&columns, TableAction::ClickHeader(0));
        assert_eq!(state.sort, Some(SortState::new(0, SortDirection::Desc)));
    }

    #[test]
    fn test_click_new_header_uses_declared_direction() {
        let columns = columns();
        let state = TableViewState::new()
            .reduce(&columns, TableAction::ClickHeader(0))
            .reduce(&columns, TableAction::ClickHeader(1));
        assert_eq!(state.sort, Some(SortState::new(1, SortDirection::Desc)));
    }

    #[test]
    fn test_excluded_and_unknown_clicks_are_ignored() {
        let columns = columns();
        let state = TableViewState::new().reduce(&columns, TableAction::ClickHeader(0));
        assert_eq!(state.reduce(&columns, TableAction::ClickHeader(2)), state);
        assert_eq!(state.reduce(&columns, TableAction::ClickHeader(7)), state);
    }

    #[test]
    fn test_search_and_clear_keep_the_other_half() {
        let columns = columns();
        let state = TableViewState::new()
            .reduce(&columns, TableAction::ClickHeader(0))
            .reduce(&columns, TableAction::SetSearch("ju".to_string()));
        assert_eq!(state.search_term, "ju");
        assert!(state.sort.is_some());

        let cleared = state.reduce(&columns, TableAction::ClearSort);
        assert_eq!(cleared.search_term, "ju");
        assert_eq!(cleared.sort, None);
    }
}
