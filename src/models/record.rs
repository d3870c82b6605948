//! Row access for table records.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::value::Value;
use crate::error::Result;

/// A row that can be addressed by column key.
///
/// Implementations return [`Value::Empty`] for keys they do not carry;
/// a missing field is never a lookup failure.
pub trait Row {
    fn cell(&self, key: &str) -> Value;
}

impl<R: Row + ?Sized> Row for &R {
    fn cell(&self, key: &str) -> Value {
        (**self).cell(key)
    }
}

/// Untyped record decoded from a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "serde_json::Map<String, serde_json::Value>")]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a field, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Borrow a field if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Number of fields carried.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Row for Record {
    fn cell(&self, key: &str) -> Value {
        self.fields.get(key).cloned().unwrap_or_default()
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Record {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            fields: map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Decode a JSON array of objects into records.
pub fn records_from_json(json: &str) -> Result<Vec<Record>> {
    Ok(serde_json::from_str(json)?)
}

/// Read a JSON dataset file.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path)?;
    records_from_json(&content)
}
