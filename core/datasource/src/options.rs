//! FILENAME: core/datasource/src/options.rs
//! Data source configuration, loadable from JSON.

use serde::{Deserialize, Serialize};

use crate::error::DataSourceError;
use crate::sort::ComparatorMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceOptions {
    /// Comparator applied to the live view. `Legacy` unless opted out.
    pub comparator: ComparatorMode,
}

impl SourceOptions {
    pub fn stable() -> Self {
        SourceOptions {
            comparator: ComparatorMode::Stable,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, DataSourceError> {
        Ok(serde_json::from_str(json)?)
    }
}
