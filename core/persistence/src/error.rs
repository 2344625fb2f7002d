//! FILENAME: core/persistence/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XLSX write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("XLSX read error: {0}")]
    XlsxRead(#[from] calamine::XlsxError),

    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),

    #[error("Grid too large for a worksheet: {rows} rows x {cols} columns")]
    GridTooLarge { rows: usize, cols: usize },

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),
}
