//! FILENAME: core/persistence/src/sink.rs
//! PURPOSE: Where encoded workbooks are handed off.
//! CONTEXT: Export ends by passing `<name>.xlsx` and its bytes to a sink.
//! Hosts decide what "download" means: write to a directory, stream to a
//! client, or keep the bytes in memory.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::ExportError;

pub trait DownloadSink {
    /// Take ownership of one finished file.
    fn deliver(&self, file_name: &str, bytes: Vec<u8>) -> Result<(), ExportError>;
}

/// Writes delivered files into a directory, replacing existing ones.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectorySink { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&self, file_name: &str, bytes: Vec<u8>) -> Result<(), ExportError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(file_name), bytes)?;
        Ok(())
    }
}

/// Keeps delivered files in memory, in delivery order.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: RefCell<Vec<(String, Vec<u8>)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> Vec<(String, Vec<u8>)> {
        self.files.borrow().clone()
    }

    pub fn last(&self) -> Option<(String, Vec<u8>)> {
        self.files.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.files.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.borrow().is_empty()
    }
}

impl DownloadSink for MemorySink {
    fn deliver(&self, file_name: &str, bytes: Vec<u8>) -> Result<(), ExportError> {
        self.files.borrow_mut().push((file_name.to_string(), bytes));
        Ok(())
    }
}
