//! FILENAME: core/table-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Invalid table definition: {0}")]
    InvalidDefinition(#[from] serde_json::Error),

    #[error("Duplicate column label: {0}")]
    DuplicateLabel(String),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
