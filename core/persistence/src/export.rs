//! FILENAME: core/persistence/src/export.rs
//! PURPOSE: The one-shot export operation.
//! CONTEXT: Reads the stored state synchronously, builds the grid, encodes
//! it and hands the bytes to a sink. The live sort is never consulted, so
//! an export does not depend on what the user currently has sorted.

use datasource::logging::{log_debug, log_enter, log_exit, log_info, log_warn};
use datasource::{DataSource, ViewState};

use crate::sink::DownloadSink;
use crate::xlsx_writer::encode_xlsx;
use crate::{ExportError, ExportGrid, FILE_EXTENSION, SHEET_NAME};

/// Export the state as `<file_name>.xlsx` through `sink`.
pub fn export_xlsx(
    state: &ViewState,
    file_name: &str,
    sink: &dyn DownloadSink,
) -> Result<(), ExportError> {
    log_enter!("EXPORT", "export_xlsx", "file_name={}", file_name);

    if let Err(e) = validate_file_name(file_name) {
        log_warn!("EXPORT", "{}", e);
        return Err(e);
    }

    let grid = ExportGrid::from_state(state);
    log_debug!(
        "EXPORT",
        "grid rows={} cols={}",
        grid.data_len(),
        grid.width()
    );

    let bytes = encode_xlsx(&grid, SHEET_NAME)?;
    let size = bytes.len();
    let target = format!("{}.{}", file_name, FILE_EXTENSION);
    sink.deliver(&target, bytes)?;
    log_info!("EXPORT", "delivered {} ({} bytes)", target, size);

    log_exit!("EXPORT", "export_xlsx");
    Ok(())
}

fn validate_file_name(file_name: &str) -> Result<(), ExportError> {
    let invalid = file_name.trim().is_empty()
        || file_name
            .chars()
            .any(|c| c == '/' || c == '\\' || c == '\0')
        || file_name == "."
        || file_name == "..";
    if invalid {
        Err(ExportError::InvalidFileName(file_name.to_string()))
    } else {
        Ok(())
    }
}

/// `export` on the data source itself.
pub trait XlsxExport {
    fn export(&self, file_name: &str, sink: &dyn DownloadSink) -> Result<(), ExportError>;
}

impl XlsxExport for DataSource {
    fn export(&self, file_name: &str, sink: &dyn DownloadSink) -> Result<(), ExportError> {
        export_xlsx(&self.state(), file_name, sink)
    }
}
