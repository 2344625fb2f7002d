//! FILENAME: core/persistence/src/xlsx_writer.rs

use crate::{ExportError, ExportGrid, GridCell};
use rust_xlsxwriter::{Workbook as XlsxWorkbook, Worksheet};
use std::path::Path;

/// Largest row index and column count a worksheet accepts.
const MAX_ROWS: usize = 1_048_576;
const MAX_COLS: usize = 16_384;

/// Encodes the grid as a single-sheet workbook and returns the file bytes.
pub fn encode_xlsx(grid: &ExportGrid, sheet_name: &str) -> Result<Vec<u8>, ExportError> {
    let mut xlsx = build_workbook(grid, sheet_name)?;
    Ok(xlsx.save_to_buffer()?)
}

/// Encodes the grid and writes it to `path`.
pub fn save_xlsx(grid: &ExportGrid, sheet_name: &str, path: &Path) -> Result<(), ExportError> {
    let mut xlsx = build_workbook(grid, sheet_name)?;
    xlsx.save(path)?;
    Ok(())
}

fn build_workbook(grid: &ExportGrid, sheet_name: &str) -> Result<XlsxWorkbook, ExportError> {
    let (rows, cols) = (grid.rows.len(), grid.width());
    if rows > MAX_ROWS || cols > MAX_COLS {
        return Err(ExportError::GridTooLarge { rows, cols });
    }

    let mut xlsx = XlsxWorkbook::new();
    let worksheet = xlsx.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (row_idx, row) in grid.rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            // Bounds checked above
            write_cell(worksheet, row_idx as u32, col_idx as u16, cell)?;
        }
    }

    Ok(xlsx)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &GridCell,
) -> Result<(), ExportError> {
    match cell {
        GridCell::Empty => {}
        GridCell::Text(s) => {
            worksheet.write_string(row, col, s)?;
        }
        GridCell::Number(n) => {
            worksheet.write_number(row, col, *n)?;
        }
        GridCell::Boolean(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SHEET_NAME;

    #[test]
    fn test_encode_produces_zip_container() {
        let grid = ExportGrid {
            rows: vec![vec![GridCell::from("Name")], vec![GridCell::from("A")]],
        };
        let bytes = encode_xlsx(&grid, SHEET_NAME).unwrap();
        // XLSX is a ZIP archive
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_save_then_load() {
        let grid = ExportGrid {
            rows: vec![
                vec![GridCell::from("N"), GridCell::from("Ok")],
                vec![GridCell::Number(4.0), GridCell::Boolean(false)],
            ],
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.xlsx");
        save_xlsx(&grid, SHEET_NAME, &path).unwrap();

        let loaded = crate::load_grid(&path, SHEET_NAME).unwrap();
        assert_eq!(loaded, grid);
    }

    #[test]
    fn test_encode_empty_grid() {
        let grid = ExportGrid { rows: vec![Vec::new()] };
        let bytes = encode_xlsx(&grid, SHEET_NAME).unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_too_many_columns_rejected() {
        let grid = ExportGrid {
            rows: vec![vec![GridCell::Empty; MAX_COLS + 1]],
        };
        let err = encode_xlsx(&grid, SHEET_NAME).unwrap_err();
        assert!(matches!(err, ExportError::GridTooLarge { cols, .. } if cols == MAX_COLS + 1));
    }

    #[test]
    fn test_invalid_sheet_name_rejected() {
        let grid = ExportGrid::default();
        let err = encode_xlsx(&grid, "bad[name]").unwrap_err();
        assert!(matches!(err, ExportError::XlsxWrite(_)));
    }
}
