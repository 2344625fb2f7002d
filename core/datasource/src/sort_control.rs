//! FILENAME: core/datasource/src/sort_control.rs
//! PURPOSE: The sort control seam and a ready-made control.
//! CONTEXT: The data source only needs two things from whatever drives
//! sorting (a header widget, a keyboard command, a test): the current
//! `SortSpec`, and a change notification. `SortState` is the in-process
//! control that header clicks can be routed to.

use std::cell::RefCell;

use crate::logging::log_debug;
use crate::sort::{SortDirection, SortSpec};
use crate::subscription::{ListenerSet, Subscription};

/// Anything that can report "the user changed the sort".
pub trait SortControl {
    /// Current active key and direction.
    fn sort_spec(&self) -> SortSpec;

    /// Register a change listener. Released when the guard is dropped.
    fn subscribe_changes(&self, listener: Box<dyn Fn()>) -> Subscription;
}

/// Sort key and direction with change notification.
#[derive(Default)]
pub struct SortState {
    spec: RefCell<SortSpec>,
    changes: ListenerSet<SortSpec>,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spec(spec: SortSpec) -> Self {
        SortState {
            spec: RefCell::new(spec),
            changes: ListenerSet::new(),
        }
    }

    pub fn spec(&self) -> SortSpec {
        self.spec.borrow().clone()
    }

    /// Replace the spec and notify listeners. Every call reports a change,
    /// even when the spec is unchanged.
    pub fn set_spec(&self, spec: SortSpec) {
        log_debug!(
            "SORT",
            "sort change active={:?} direction={}",
            spec.active,
            spec.direction
        );
        *self.spec.borrow_mut() = spec.clone();
        self.changes.notify(&spec);
    }

    pub fn sort_by(&self, key: impl Into<String>, direction: SortDirection) {
        self.set_spec(SortSpec::new(key, direction));
    }

    pub fn clear(&self) {
        self.set_spec(SortSpec::none());
    }

    /// Header-click cycling: a new key starts ascending, then descending,
    /// then the sort is cleared.
    pub fn toggle(&self, key: &str) {
        let current = self.spec();
        let next = match (current.active.as_deref(), current.direction) {
            (Some(active), SortDirection::Asc) if active == key => {
                SortSpec::new(key, SortDirection::Desc)
            }
            (Some(active), SortDirection::Desc) if active == key => SortSpec::none(),
            _ => SortSpec::new(key, SortDirection::Asc),
        };
        self.set_spec(next);
    }

    pub fn listener_count(&self) -> usize {
        self.changes.len()
    }
}

impl SortControl for SortState {
    fn sort_spec(&self) -> SortSpec {
        self.spec()
    }

    fn subscribe_changes(&self, listener: Box<dyn Fn()>) -> Subscription {
        self.changes.subscribe(move |_| listener())
    }
}
