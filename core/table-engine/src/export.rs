//! FILENAME: core/table-engine/src/export.rs
//! PURPOSE: CSV export of the visible rows of a table view.
//! CONTEXT: Exports raw values, not formatted ones: a money cell writes
//! its amount, a link its URL, a list its items joined by "; ", a record
//! its JSON. Custom renderers never run. Quoting follows RFC 4180.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use cell_engine::Row;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::definition::{Column, TableDefinition};
use crate::engine::cell_at;
use crate::error::ExportError;
use crate::view::TableView;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CsvOptions {
    pub delimiter: char,
    pub include_headers: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: ',',
            include_headers: true,
        }
    }
}

impl CsvOptions {
    fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            warn!("Non-ASCII CSV delimiter {:?}, using ','", self.delimiter);
            b','
        }
    }
}

/// Writes the view's rows (in view order) to any writer.
pub fn export_csv_to_writer<W: Write>(
    writer: W,
    columns: &[Column],
    data: &[Row],
    view: &TableView,
    options: &CsvOptions,
) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(options.delimiter_byte())
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    if options.include_headers {
        wtr.write_record(columns.iter().map(|c| c.label.as_str()))?;
    }

    for row in view.visible_rows(data) {
        let record: Vec<String> = (0..columns.len())
            .map(|i| cell_at(row, i).display_value())
            .collect();
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    debug!("Exported {} row(s) to CSV", view.visible_count());
    Ok(())
}

/// Exports to an in-memory string.
pub fn export_csv(
    columns: &[Column],
    data: &[Row],
    view: &TableView,
    options: &CsvOptions,
) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    export_csv_to_writer(&mut buffer, columns, data, view, options)?;
    Ok(String::from_utf8(buffer)?)
}

/// Exports to a file, creating or truncating it.
pub fn export_csv_to_path(
    path: impl AsRef<Path>,
    columns: &[Column],
    data: &[Row],
    view: &TableView,
    options: &CsvOptions,
) -> Result<(), ExportError> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    export_csv_to_writer(&mut writer, columns, data, view, options)?;
    writer.flush()?;
    Ok(())
}

impl TableDefinition {
    /// Exports with the definition's own CSV options.
    pub fn export_csv(&self, data: &[Row], view: &TableView) -> Result<String, ExportError> {
        export_csv(&self.columns, data, view, &self.export)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::project;
    use cell_engine::{CellValue, DataType};

    #[test]
    fn test_quotes_commas_quotes_and_newlines() {
        let columns = vec![Column::text("Name"), Column::text("Note")];
        let data: Vec<Row> = vec![vec![
            CellValue::text("Doe, John"),
            CellValue::text("said \"hi\"\nthen left"),
        ]];
        let view = project(&columns, &data, "", None);
        let csv = export_csv(&columns, &data, &view, &CsvOptions::default()).unwrap();
        assert_eq!(
            csv,
            "Name,Note\n\"Doe, John\",\"said \"\"hi\"\"\nthen left\"\n"
        );
    }

    #[test]
    fn test_raw_values_not_formatted() {
        let columns = vec![
            Column::new("Site", DataType::Link),
            Column::new("Tags", DataType::List),
            Column::new("Pay", DataType::Money),
        ];
        let data: Vec<Row> = vec![vec![
            CellValue::link("https://example.com", "Example"),
            CellValue::List(vec!["a".into(), "b".into()]),
            CellValue::money(1234.5, "EUR"),
        ]];
        let view = project(&columns, &data, "", None);
        let options = CsvOptions {
            delimiter: ';',
            include_headers: false,
        };
        let csv = export_csv(&columns, &data, &view, &options).unwrap();
        assert_eq!(csv, "https://example.com;\"a; b\";1234.5\n");
    }
}
