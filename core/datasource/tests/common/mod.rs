//! FILENAME: tests/common/mod.rs
//! Shared helpers for data source integration tests.

#![allow(dead_code)]

use datasource::{ColumnDescriptor, DataSource, Row, Snapshot, Subscription};
use std::cell::RefCell;
use std::rc::Rc;

pub fn columns(keys: &[&str]) -> Vec<ColumnDescriptor> {
    keys.iter()
        .map(|k| ColumnDescriptor::new(*k, k.to_uppercase()))
        .collect()
}

/// Rows with one value under `key`, tagged with their stored position as `id`.
pub fn keyed_rows<V: Into<datasource::RowValue> + Clone>(key: &str, values: &[V]) -> Vec<Row> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| Row::new().with(key, v.clone()).with("id", i as i64))
        .collect()
}

pub fn ids(snapshot: &Snapshot) -> Vec<i64> {
    snapshot
        .iter()
        .map(|r| r.get("id").to_number().map(|n| n as i64).unwrap_or(-1))
        .collect()
}

/// Records the id order of every snapshot an observer receives.
pub struct Recorder {
    pub emissions: Rc<RefCell<Vec<Vec<i64>>>>,
    pub subscription: Subscription,
}

impl Recorder {
    pub fn connect(source: &DataSource) -> Self {
        let emissions = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&emissions);
        let subscription = source.connect(move |snap| sink.borrow_mut().push(ids(snap)));
        Recorder {
            emissions,
            subscription,
        }
    }

    pub fn count(&self) -> usize {
        self.emissions.borrow().len()
    }

    pub fn last(&self) -> Vec<i64> {
        self.emissions.borrow().last().cloned().unwrap_or_default()
    }
}
