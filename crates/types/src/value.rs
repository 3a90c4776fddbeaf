//! Caller-supplied values for a fill, keyed by field name.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A flat field-name → value mapping, built once per fill from the
/// caller's data object and read-only while filling. Absence of a key
/// means the field received no data and is left for the blanking pass.
pub type ValueMap = BTreeMap<String, FieldValue>;

/// The raw value behind one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// A scalar string.
    Text(String),
    /// A flat list of scalars, rendered as a single spliced row.
    TextList(Vec<String>),
    /// A list of rows, each spliced against the field's headers.
    TextRows(Vec<Vec<String>>),
    /// A materialized local image file.
    Image(PathBuf),
    /// A list of structured records for dynamic-row expansion.
    Records(Vec<BTreeMap<String, String>>),
}

impl FieldValue {
    /// Short value-shape name used in error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::TextList(_) => "text list",
            FieldValue::TextRows(_) => "text rows",
            FieldValue::Image(_) => "image",
            FieldValue::Records(_) => "records",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}
