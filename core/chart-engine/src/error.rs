//! FILENAME: core/chart-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Invalid chart configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("Expected a JSON array of data points")]
    NotAnArray,
}
