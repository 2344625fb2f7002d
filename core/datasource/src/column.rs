//! FILENAME: core/datasource/src/column.rs
//! PURPOSE: Describes a single column of the data source.
//! CONTEXT: A descriptor carries the row key it reads, the header label,
//! the declared value kind and optional opaque display metadata. The
//! sort path only uses the key; export uses both key and label.

use serde::{Deserialize, Serialize};

/// Declared kind of the values stored under a column key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Number,
    #[default]
    Auto,
}

/// Immutable description of one column. Fields are read through
/// accessors; the builder methods consume and return a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Row key this column reads. Unique among the columns of one view.
    key: String,
    /// Display name, also used as the exported header cell.
    label: String,
    #[serde(rename = "type", default)]
    value_kind: ValueKind,
    /// Renderer-specific styling, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    style: Option<serde_json::Value>,
}

impl ColumnDescriptor {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        ColumnDescriptor {
            key: key.into(),
            label: label.into(),
            value_kind: ValueKind::Auto,
            style: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value_kind(&self) -> ValueKind {
        self.value_kind
    }

    pub fn style(&self) -> Option<&serde_json::Value> {
        self.style.as_ref()
    }

    pub fn with_value_kind(mut self, kind: ValueKind) -> Self {
        self.value_kind = kind;
        self
    }

    pub fn with_style(mut self, style: serde_json::Value) -> Self {
        self.style = Some(style);
        self
    }
}
