//! FILENAME: core/datasource/src/source.rs
//! PURPOSE: The reactive table data source.
//! CONTEXT: Holds one immutable `ViewState` behind an `Rc` and swaps it
//! wholesale on `next()`. Two channels leave the store:
//! - state listeners get the whole `ViewState` after every `next()`;
//! - connected observers get a freshly sorted `Snapshot` after every
//!   `next()` and every change reported by the bound sort control.
//! No `RefCell` borrow is held while listeners run, so a listener may call
//! back into the store.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::column::ColumnDescriptor;
use crate::error::DataSourceError;
use crate::logging::{log_debug, log_warn};
use crate::options::SourceOptions;
use crate::sort::{sorted_order, SortSpec};
use crate::sort_control::SortControl;
use crate::subscription::{ListenerSet, Subscription};
use crate::value::Row;
use crate::view::{Snapshot, ViewState};

struct Inner {
    options: SourceOptions,
    state: RefCell<Rc<ViewState>>,
    sort: RefCell<Option<Rc<dyn SortControl>>>,
    /// Listener registered on `sort`; at most one at a time.
    sort_binding: RefCell<Option<Subscription>>,
    state_listeners: ListenerSet<ViewState>,
    snapshot_listeners: ListenerSet<Snapshot>,
}

impl Inner {
    fn current_state(&self) -> Rc<ViewState> {
        Rc::clone(&self.state.borrow())
    }

    fn current_sort(&self) -> SortSpec {
        let control = self.sort.borrow().clone();
        control.map(|c| c.sort_spec()).unwrap_or_default()
    }

    fn snapshot(&self) -> Snapshot {
        let state = self.current_state();
        let spec = self.current_sort();
        let order = sorted_order(state.rows(), &spec, self.options.comparator);
        Snapshot::new(state, order)
    }

    /// Recompute and push one snapshot to every connected observer.
    fn emit_view_changed(&self) {
        if self.snapshot_listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        log_debug!("SOURCE", "view changed rows={}", snapshot.len());
        self.snapshot_listeners.notify(&snapshot);
    }
}

/// Reactive, render-agnostic table data source.
///
/// Cloning yields another handle to the same store.
#[derive(Clone)]
pub struct DataSource {
    inner: Rc<Inner>,
}

impl DataSource {
    pub fn new() -> Self {
        Self::with_options(SourceOptions::default())
    }

    pub fn with_options(options: SourceOptions) -> Self {
        DataSource {
            inner: Rc::new(Inner {
                options,
                state: RefCell::new(Rc::new(ViewState::empty())),
                sort: RefCell::new(None),
                sort_binding: RefCell::new(None),
                state_listeners: ListenerSet::new(),
                snapshot_listeners: ListenerSet::new(),
            }),
        }
    }

    pub fn options(&self) -> &SourceOptions {
        &self.inner.options
    }

    // ========================================================================
    // PRODUCER SIDE
    // ========================================================================

    /// Replace columns, rows, summary lines and visible column order in one
    /// step. `visible_keys` defaults to every column key in declared order.
    /// On error the previous state is kept and nothing is emitted.
    pub fn next(
        &self,
        columns: Vec<ColumnDescriptor>,
        rows: Vec<Row>,
        summaries: Vec<String>,
        visible_keys: Option<Vec<String>>,
    ) -> Result<(), DataSourceError> {
        let state = match ViewState::new(columns, rows, summaries, visible_keys) {
            Ok(state) => Rc::new(state),
            Err(e) => {
                log_warn!("SOURCE", "next rejected: {}", e);
                return Err(e);
            }
        };

        log_debug!(
            "SOURCE",
            "next columns={} rows={} summaries={} visible={}",
            state.columns().len(),
            state.rows().len(),
            state.summaries().len(),
            state.visible_keys().len()
        );

        *self.inner.state.borrow_mut() = Rc::clone(&state);
        self.inner.state_listeners.notify(&state);
        self.inner.emit_view_changed();
        Ok(())
    }

    /// `next` with no summaries and all columns visible.
    pub fn set_data(
        &self,
        columns: Vec<ColumnDescriptor>,
        rows: Vec<Row>,
    ) -> Result<(), DataSourceError> {
        self.next(columns, rows, Vec::new(), None)
    }

    // ========================================================================
    // SORT BINDING
    // ========================================================================

    /// Bind a sort control, releasing any previous binding first.
    pub fn attach_sort(&self, control: Rc<dyn SortControl>) {
        log_debug!("SOURCE", "attach sort control");
        *self.inner.sort.borrow_mut() = Some(control);
        self.bind_sort();
    }

    /// Drop the sort control and its binding. No-op when none is attached.
    pub fn detach_sort(&self) {
        self.unbind_sort();
        if self.inner.sort.borrow_mut().take().is_some() {
            log_debug!("SOURCE", "detach sort control");
        }
    }

    pub fn sort_spec(&self) -> SortSpec {
        self.inner.current_sort()
    }

    pub fn is_sort_bound(&self) -> bool {
        self.inner.sort_binding.borrow().is_some()
    }

    fn bind_sort(&self) {
        self.unbind_sort();

        let control = match self.inner.sort.borrow().clone() {
            Some(control) => control,
            None => return,
        };

        let weak: Weak<Inner> = Rc::downgrade(&self.inner);
        let binding = control.subscribe_changes(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.emit_view_changed();
            }
        }));
        *self.inner.sort_binding.borrow_mut() = Some(binding);
    }

    fn unbind_sort(&self) {
        // Release outside the borrow; the control may call back.
        let previous = self.inner.sort_binding.borrow_mut().take();
        drop(previous);
    }

    // ========================================================================
    // CONSUMER SIDE
    // ========================================================================

    /// Bind the sort listener and start receiving sorted snapshots.
    /// The current snapshot is delivered immediately.
    pub fn connect(&self, observer: impl Fn(&Snapshot) + 'static) -> Subscription {
        log_debug!("SOURCE", "connect");
        self.bind_sort();

        let observer = Rc::new(observer);
        let forward = Rc::clone(&observer);
        let subscription = self
            .inner
            .snapshot_listeners
            .subscribe(move |snapshot| (*forward)(snapshot));

        // The initial snapshot goes to the new observer only.
        (*observer)(&self.inner.snapshot());
        subscription
    }

    /// Release the sort binding. State is kept; safe to call repeatedly.
    pub fn disconnect(&self) {
        if self.is_sort_bound() {
            log_debug!("SOURCE", "disconnect");
        }
        self.unbind_sort();
    }

    /// Observe every state replacement.
    pub fn subscribe_state(&self, observer: impl Fn(&ViewState) + 'static) -> Subscription {
        self.inner.state_listeners.subscribe(observer)
    }

    /// The rows as currently displayed, sorted by the bound control.
    pub fn snapshot(&self) -> Snapshot {
        self.inner.snapshot()
    }

    /// Current state; rows in stored order.
    pub fn state(&self) -> Rc<ViewState> {
        self.inner.current_state()
    }

    pub fn columns(&self) -> Vec<ColumnDescriptor> {
        self.state().columns().to_vec()
    }

    pub fn summaries(&self) -> Vec<String> {
        self.state().summaries().to_vec()
    }

    pub fn visible_keys(&self) -> Vec<String> {
        self.state().visible_keys().to_vec()
    }

    pub fn visible_columns(&self) -> Vec<ColumnDescriptor> {
        self.state().visible_columns().cloned().collect()
    }
}

impl Default for DataSource {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("DataSource")
            .field("options", &self.inner.options)
            .field("columns", &state.columns().len())
            .field("rows", &state.rows().len())
            .field("sort_bound", &self.is_sort_bound())
            .finish()
    }
}
