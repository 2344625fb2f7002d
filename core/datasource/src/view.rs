//! FILENAME: core/datasource/src/view.rs
//! PURPOSE: The immutable view state and the sorted snapshot over it.
//! CONTEXT: A `ViewState` is built and validated in one step and never
//! mutated afterwards; the store swaps whole states. A `Snapshot` pairs a
//! state with an index order, so sorting never copies or moves rows.

use std::collections::HashSet;
use std::rc::Rc;

use crate::column::ColumnDescriptor;
use crate::error::DataSourceError;
use crate::value::Row;

// ============================================================================
// VIEW STATE
// ============================================================================

/// Columns, rows, summary lines and visible column order, held together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    columns: Vec<ColumnDescriptor>,
    rows: Vec<Row>,
    summaries: Vec<String>,
    visible_keys: Vec<String>,
}

impl ViewState {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a validated state. `visible_keys` defaults to every column
    /// key in declared order; when given, each key must name a column.
    pub fn new(
        columns: Vec<ColumnDescriptor>,
        rows: Vec<Row>,
        summaries: Vec<String>,
        visible_keys: Option<Vec<String>>,
    ) -> Result<Self, DataSourceError> {
        let visible_keys = {
            let mut keys = HashSet::with_capacity(columns.len());
            for col in &columns {
                if !keys.insert(col.key()) {
                    return Err(DataSourceError::DuplicateColumnKey(col.key().to_string()));
                }
            }

            match visible_keys {
                Some(visible) => {
                    if let Some(unknown) = visible.iter().find(|k| !keys.contains(k.as_str())) {
                        return Err(DataSourceError::UnknownColumnKey(unknown.clone()));
                    }
                    visible
                }
                None => columns.iter().map(|c| c.key().to_string()).collect(),
            }
        };

        Ok(ViewState {
            columns,
            rows,
            summaries,
            visible_keys,
        })
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Rows in stored (producer) order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn summaries(&self) -> &[String] {
        &self.summaries
    }

    pub fn visible_keys(&self) -> &[String] {
        &self.visible_keys
    }

    pub fn column(&self, key: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.key() == key)
    }

    /// Column descriptors in display order.
    pub fn visible_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> + '_ {
        self.visible_keys.iter().filter_map(move |key| self.column(key))
    }
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// An ordered, read-only view over the rows of one `ViewState`.
#[derive(Debug, Clone)]
pub struct Snapshot {
    state: Rc<ViewState>,
    order: Vec<usize>,
}

impl Snapshot {
    pub(crate) fn new(state: Rc<ViewState>, order: Vec<usize>) -> Self {
        debug_assert_eq!(order.len(), state.rows().len());
        Snapshot { state, order }
    }

    /// The state the snapshot was derived from.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.order.get(index).map(|&i| &self.state.rows()[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row> + '_ {
        self.order.iter().map(move |&i| &self.state.rows()[i])
    }

    /// Positions of the displayed rows within the stored row sequence.
    pub fn indices(&self) -> &[usize] {
        &self.order
    }

    pub fn to_rows(&self) -> Vec<Row> {
        self.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("name", "Name"),
            ColumnDescriptor::new("weight", "Weight"),
            ColumnDescriptor::new("height", "Height"),
        ]
    }

    #[test]
    fn test_visible_keys_default_to_column_order() {
        let state = ViewState::new(cols(), Vec::new(), Vec::new(), None).unwrap();
        assert_eq!(state.visible_keys(), ["name", "weight", "height"]);
    }

    #[test]
    fn test_visible_keys_reorder_and_subset() {
        let visible = vec!["height".to_string(), "name".to_string()];
        let state = ViewState::new(cols(), Vec::new(), Vec::new(), Some(visible)).unwrap();
        let labels: Vec<&str> = state.visible_columns().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["Height", "Name"]);
        assert_eq!(state.columns().len(), 3);
    }

    #[test]
    fn test_unknown_visible_key_rejected() {
        let visible = vec!["name".to_string(), "age".to_string()];
        let err = ViewState::new(cols(), Vec::new(), Vec::new(), Some(visible)).unwrap_err();
        assert!(matches!(err, DataSourceError::UnknownColumnKey(ref k) if k == "age"));
    }

    #[test]
    fn test_duplicate_column_key_rejected() {
        let mut columns = cols();
        columns.push(ColumnDescriptor::new("name", "Other name"));
        let err = ViewState::new(columns, Vec::new(), Vec::new(), None).unwrap_err();
        assert!(matches!(err, DataSourceError::DuplicateColumnKey(ref k) if k == "name"));
    }

    #[test]
    fn test_snapshot_reads_through_order() {
        let rows = vec![
            Row::new().with("name", "a"),
            Row::new().with("name", "b"),
            Row::new().with("name", "c"),
        ];
        let state = Rc::new(ViewState::new(cols(), rows, Vec::new(), None).unwrap());
        let snap = Snapshot::new(Rc::clone(&state), vec![2, 0, 1]);

        let names: Vec<&str> = snap.iter().map(|r| r.get("name").as_text().unwrap()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
        assert_eq!(snap.get(0).unwrap().get("name").as_text(), Some("c"));
        assert!(snap.get(3).is_none());
        // Stored order untouched
        assert_eq!(state.rows()[0].get("name").as_text(), Some("a"));
    }
}
