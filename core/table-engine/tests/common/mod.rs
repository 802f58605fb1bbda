//! FILENAME: core/table-engine/tests/common/mod.rs
//! Fixtures for table-engine integration tests.

#![allow(dead_code)]

use cell_engine::row_from_json;
use serde_json::json;
use table_engine::{CellValue, Column, DataType, Row, TableDefinition};

/// Column indices of the people fixture.
pub const NAME: usize = 0;
pub const AGE: usize = 1;
pub const TEAM: usize = 2;
pub const SALARY: usize = 3;
pub const STARTED: usize = 4;
pub const NOTES: usize = 5;

/// A small staff table loaded the way a caller would: definition and
/// rows from JSON.
pub struct PeopleFixture {
    pub definition: TableDefinition,
    pub data: Vec<Row>,
}

impl PeopleFixture {
    pub fn new() -> Self {
        Self::with_definition_json(
            r#"{
                "name": "Staff",
                "columns": [
                    {"label": "Name"},
                    {"label": "Age", "dataType": "number"},
                    {"label": "Team"},
                    {"label": "Salary", "dataType": "money"},
                    {"label": "Started", "dataType": "date"},
                    {"label": "Notes", "dataType": "paragraph", "disableSearch": true, "excludeFromSort": true}
                ]
            }"#,
        )
    }

    pub fn with_definition_json(json: &str) -> Self {
        let definition = TableDefinition::from_json(json).expect("fixture definition");
        let data = people_rows(&definition);
        PeopleFixture { definition, data }
    }

    pub fn columns(&self) -> &[Column] {
        &self.definition.columns
    }

    /// Values of one column in the given row order, as plain text.
    pub fn column_texts(&self, order: &[usize], column_index: usize) -> Vec<String> {
        order
            .iter()
            .map(|&i| self.data[i][column_index].display_value())
            .collect()
    }
}

fn people_rows(definition: &TableDefinition) -> Vec<Row> {
    let types: Vec<DataType> = definition.data_types();
    let raw = json!([
        ["Juan Perez", 30, "Core", {"amount": 5200, "currency": "USD"}, "2020-03-01", "Owns the billing service."],
        ["Ana Lopez", 50, "Core", {"amount": 7100, "currency": "USD"}, "2012-07-15", "Team lead, joined via the Juarez office."],
        ["Marcus Lee", 10, "Data", {"amount": 900, "currency": "USD"}, "2023-01-09", null],
        ["Doe, John", null, "Data", {"amount": 4300, "currency": "USD"}, "2019-11-20", "Part time"],
        ["Zoe Kim", 30, "Web", {"amount": 6100, "currency": "USD"}, "2018-05-02", ""]
    ]);

    raw.as_array()
        .map(|rows| {
            rows.iter()
                .filter_map(|row| row.as_array())
                .map(|values| row_from_json(values, &types))
                .collect()
        })
        .unwrap_or_default()
}

/// Rows of `n` numbered records for size-sensitive tests.
pub fn numbered_rows(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| {
            vec![
                CellValue::text(format!("Item {}", i)),
                CellValue::Number((i % 7) as f64),
            ]
        })
        .collect()
}
