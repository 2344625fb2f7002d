//! FILENAME: core/persistence/src/lib.rs
//! Table Export Module
//!
//! Turns the stored contents of a data source into a header-plus-rows grid
//! and writes it as a single-sheet XLSX workbook.

mod error;
mod export;
mod sink;
mod xlsx_reader;
mod xlsx_writer;

pub use error::ExportError;
pub use export::{export_xlsx, XlsxExport};
pub use sink::{DirectorySink, DownloadSink, MemorySink};
pub use xlsx_reader::{load_grid, read_grid};
pub use xlsx_writer::{encode_xlsx, save_xlsx};

use chrono::NaiveDateTime;
use datasource::{RowValue, ViewState};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Name of the one worksheet in every exported workbook.
pub const SHEET_NAME: &str = "Taulukko";

/// File extension appended to export file names.
pub const FILE_EXTENSION: &str = "xlsx";

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
const MIDNIGHT_SUFFIX: &str = " 00:00";

// ============================================================================
// GRID
// ============================================================================

/// One exported cell.
#[derive(Debug, Clone, PartialEq)]
pub enum GridCell {
    Empty,
    Text(String),
    Number(f64),
    Boolean(bool),
}

impl GridCell {
    pub fn text(s: impl Into<String>) -> Self {
        GridCell::Text(s.into())
    }
}

impl From<&str> for GridCell {
    fn from(value: &str) -> Self {
        GridCell::Text(value.to_string())
    }
}

/// Header row followed by data rows. Row 0 is always the header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportGrid {
    pub rows: Vec<Vec<GridCell>>,
}

impl ExportGrid {
    /// Builds the grid from stored rows (never the sorted view) in
    /// column declaration order. Summaries are not exported.
    pub fn from_state(state: &ViewState) -> Self {
        let columns = state.columns();

        let header: Vec<GridCell> = columns
            .iter()
            .map(|col| GridCell::Text(col.label().to_string()))
            .collect();

        let mut rows = Vec::with_capacity(state.rows().len() + 1);
        rows.push(header);

        for row in state.rows() {
            rows.push(
                columns
                    .iter()
                    .map(|col| normalize_value(row.get(col.key())))
                    .collect(),
            );
        }

        ExportGrid { rows }
    }

    pub fn header(&self) -> &[GridCell] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of data rows (header excluded).
    pub fn data_len(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

// ============================================================================
// VALUE NORMALIZATION
// ============================================================================

/// Maps a row value to its exported cell. Dates become text; everything
/// else keeps its kind.
pub fn normalize_value(value: &RowValue) -> GridCell {
    match value {
        RowValue::Missing | RowValue::Null => GridCell::Empty,
        RowValue::Boolean(b) => GridCell::Boolean(*b),
        RowValue::Number(n) if n.is_finite() => GridCell::Number(*n),
        RowValue::Number(n) => GridCell::Text(non_finite_text(*n).to_string()),
        RowValue::Text(s) => GridCell::Text(s.clone()),
        RowValue::Date(dt) => GridCell::Text(format_date(dt)),
    }
}

/// `YYYY-MM-DD HH:mm`, or just `YYYY-MM-DD` when the time reads 00:00.
pub fn format_date(dt: &NaiveDateTime) -> String {
    let text = dt.format(DATE_TIME_FORMAT).to_string();
    match text.strip_suffix(MIDNIGHT_SUFFIX) {
        Some(date) => date.to_string(),
        None => text,
    }
}

fn non_finite_text(n: f64) -> &'static str {
    if n.is_nan() {
        "NaN"
    } else if n > 0.0 {
        "Infinity"
    } else {
        "-Infinity"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use datasource::{ColumnDescriptor, Row};

    fn dt(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_format_date_midnight_truncated() {
        assert_eq!(format_date(&dt(0, 0, 0)), "2024-01-02");
    }

    #[test]
    fn test_format_date_keeps_time() {
        assert_eq!(format_date(&dt(8, 30, 0)), "2024-01-02 08:30");
        assert_eq!(format_date(&dt(0, 1, 0)), "2024-01-02 00:01");
    }

    #[test]
    fn test_format_date_seconds_ignored() {
        // Only hours and minutes are formatted, so 00:00:45 still truncates
        assert_eq!(format_date(&dt(0, 0, 45)), "2024-01-02");
    }

    #[test]
    fn test_normalize_passes_other_kinds_through() {
        assert_eq!(normalize_value(&RowValue::Missing), GridCell::Empty);
        assert_eq!(normalize_value(&RowValue::Null), GridCell::Empty);
        assert_eq!(normalize_value(&RowValue::Number(1.5)), GridCell::Number(1.5));
        assert_eq!(normalize_value(&RowValue::Boolean(true)), GridCell::Boolean(true));
        assert_eq!(normalize_value(&RowValue::from("x")), GridCell::text("x"));
        assert_eq!(
            normalize_value(&RowValue::Number(f64::NEG_INFINITY)),
            GridCell::text("-Infinity")
        );
    }

    #[test]
    fn test_grid_header_and_rows() {
        let state = ViewState::new(
            vec![
                ColumnDescriptor::new("name", "Name"),
                ColumnDescriptor::new("d", "Date"),
            ],
            vec![Row::new().with("name", "A").with("d", dt(0, 0, 0))],
            vec!["Summary line".to_string()],
            None,
        )
        .unwrap();

        let grid = ExportGrid::from_state(&state);
        assert_eq!(
            grid.rows,
            vec![
                vec![GridCell::from("Name"), GridCell::from("Date")],
                vec![GridCell::from("A"), GridCell::from("2024-01-02")],
            ]
        );
    }

    #[test]
    fn test_grid_ignores_visible_keys() {
        let state = ViewState::new(
            vec![ColumnDescriptor::new("a", "A"), ColumnDescriptor::new("b", "B")],
            vec![Row::new().with("a", 1).with("b", 2)],
            Vec::new(),
            Some(vec!["b".to_string()]),
        )
        .unwrap();

        let grid = ExportGrid::from_state(&state);
        assert_eq!(grid.header(), &[GridCell::from("A"), GridCell::from("B")]);
        assert_eq!(grid.rows[1], vec![GridCell::Number(1.0), GridCell::Number(2.0)]);
    }

    #[test]
    fn test_grid_missing_values_blank() {
        let state = ViewState::new(
            vec![ColumnDescriptor::new("a", "A"), ColumnDescriptor::new("b", "B")],
            vec![Row::new().with("a", "only a")],
            Vec::new(),
            None,
        )
        .unwrap();
        let grid = ExportGrid::from_state(&state);
        assert_eq!(grid.rows[1], vec![GridCell::from("only a"), GridCell::Empty]);
    }

    #[test]
    fn test_grid_empty_columns_and_rows() {
        let grid = ExportGrid::from_state(&ViewState::empty());
        assert_eq!(grid.rows, vec![Vec::<GridCell>::new()]);
        assert_eq!(grid.width(), 0);
        assert_eq!(grid.data_len(), 0);

        let state = ViewState::new(
            vec![ColumnDescriptor::new("a", "A")],
            Vec::new(),
            Vec::new(),
            None,
        )
        .unwrap();
        let grid = ExportGrid::from_state(&state);
        assert_eq!(grid.rows, vec![vec![GridCell::from("A")]]);
    }

    #[test]
    fn test_grid_rows_without_columns_are_empty() {
        let state = ViewState::new(Vec::new(), vec![Row::new().with("a", 1)], Vec::new(), None)
            .unwrap();
        let grid = ExportGrid::from_state(&state);
        assert_eq!(grid.rows, vec![Vec::new(), Vec::new()]);
    }
}
