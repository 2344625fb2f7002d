//! FILENAME: core/datasource/src/lib.rs
//! PURPOSE: Main library entry point for the table data source.
//! CONTEXT: Re-exports public types and modules for use by other crates.
//!
//! Layers:
//! - `column`, `value`: what a table is made of
//! - `view`: the immutable state and sorted snapshots over it
//! - `sort`, `sort_control`: how the live view is ordered
//! - `source`: the reactive store tying it together
//! - `layout`: height rule for hosts that render the table

pub mod logging;

pub mod column;
pub mod error;
pub mod layout;
pub mod options;
pub mod sort;
pub mod sort_control;
pub mod source;
pub mod subscription;
pub mod value;
pub mod view;

// Re-export commonly used types at the crate root
pub use column::{ColumnDescriptor, ValueKind};
pub use error::DataSourceError;
pub use layout::{compute_height, BoxSpacing, ContainerMetrics};
pub use options::SourceOptions;
pub use sort::{sorted_order, ComparatorMode, SortDirection, SortSpec};
pub use sort_control::{SortControl, SortState};
pub use source::DataSource;
pub use subscription::{ListenerSet, Subscription};
pub use value::{Row, RowValue};
pub use view::{Snapshot, ViewState};

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn it_sorts_live_view_from_control() {
        let source = DataSource::new();
        let sort = Rc::new(SortState::new());
        source.attach_sort(sort.clone());

        source
            .set_data(
                vec![ColumnDescriptor::new("n", "N")],
                vec![
                    Row::new().with("n", 3),
                    Row::new().with("n", 1),
                    Row::new().with("n", 2),
                ],
            )
            .unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = source.connect(move |snap| {
            let values: Vec<f64> = snap.iter().filter_map(|r| r.get("n").to_number()).collect();
            sink.borrow_mut().push(values);
        });

        sort.sort_by("n", SortDirection::Asc);
        sort.toggle("n");

        assert_eq!(
            *seen.borrow(),
            vec![vec![3.0, 1.0, 2.0], vec![1.0, 2.0, 3.0], vec![3.0, 2.0, 1.0]]
        );
    }
}
