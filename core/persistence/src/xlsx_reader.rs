// FILENAME: core/persistence/src/xlsx_reader.rs

use crate::{ExportError, ExportGrid, GridCell};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::io::Cursor;
use std::path::Path;

/// Reads one sheet of an exported workbook back into a grid.
pub fn read_grid(bytes: &[u8], sheet_name: &str) -> Result<ExportGrid, ExportError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    range_to_grid(&mut workbook, sheet_name)
}

pub fn load_grid(path: &Path, sheet_name: &str) -> Result<ExportGrid, ExportError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    range_to_grid(&mut workbook, sheet_name)
}

fn range_to_grid<RS>(workbook: &mut Xlsx<RS>, sheet_name: &str) -> Result<ExportGrid, ExportError>
where
    RS: std::io::Read + std::io::Seek,
{
    if !workbook.sheet_names().iter().any(|name| name == sheet_name) {
        return Err(ExportError::SheetNotFound(sheet_name.to_string()));
    }

    let range: Range<Data> = workbook.worksheet_range(sheet_name)?;

    // Ranges start at the first used cell; exports always start at A1,
    // so pad back to the origin.
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let width = start_col as usize + range.width();
    let mut rows: Vec<Vec<GridCell>> = (0..start_row)
        .map(|_| vec![GridCell::Empty; width])
        .collect();

    for row in range.rows() {
        let mut cells: Vec<GridCell> = (0..start_col).map(|_| GridCell::Empty).collect();
        cells.extend(row.iter().map(data_to_cell));
        rows.push(cells);
    }

    if rows.is_empty() {
        rows.push(Vec::new());
    }

    Ok(ExportGrid { rows })
}

fn data_to_cell(data: &Data) -> GridCell {
    match data {
        Data::Empty => GridCell::Empty,
        Data::String(s) => GridCell::Text(s.clone()),
        Data::Float(f) => GridCell::Number(*f),
        Data::Int(i) => GridCell::Number(*i as f64),
        Data::Bool(b) => GridCell::Boolean(*b),
        Data::Error(e) => GridCell::Text(format!("{:?}", e)),
        Data::DateTime(dt) => GridCell::Number(dt.as_f64()),
        Data::DateTimeIso(s) => GridCell::Text(s.clone()),
        Data::DurationIso(s) => GridCell::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xlsx_writer::encode_xlsx;
    use crate::SHEET_NAME;

    #[test]
    fn test_leading_blank_rows_keep_grid_width() {
        let grid = ExportGrid {
            rows: vec![
                vec![GridCell::Empty, GridCell::Empty],
                vec![GridCell::Empty, GridCell::Empty],
                vec![GridCell::from("x"), GridCell::Number(2.0)],
            ],
        };
        let bytes = encode_xlsx(&grid, SHEET_NAME).unwrap();

        let read = read_grid(&bytes, SHEET_NAME).unwrap();
        assert_eq!(read.rows.len(), 3);
        assert!(read.rows.iter().all(|row| row.len() == 2));
        assert_eq!(read.rows[2], vec![GridCell::from("x"), GridCell::Number(2.0)]);
    }

    #[test]
    fn test_data_to_cell_kinds() {
        assert_eq!(data_to_cell(&Data::Empty), GridCell::Empty);
        assert_eq!(data_to_cell(&Data::Int(3)), GridCell::Number(3.0));
        assert_eq!(data_to_cell(&Data::Bool(true)), GridCell::Boolean(true));
        assert_eq!(
            data_to_cell(&Data::String("a".to_string())),
            GridCell::from("a")
        );
    }
}
