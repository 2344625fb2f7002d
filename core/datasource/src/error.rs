//! FILENAME: core/datasource/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("Visible column key not found among columns: {0}")]
    UnknownColumnKey(String),

    #[error("Duplicate column key: {0}")]
    DuplicateColumnKey(String),

    #[error("Invalid data source options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}
