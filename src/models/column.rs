//! Column descriptors and the validated column set.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::record::Row;
use super::value::Value;
use crate::error::{AppError, Result};

/// Custom cell renderer: receives the cell value and the whole record.
pub type Renderer<R> = Arc<dyn Fn(&Value, &R) -> String + Send + Sync>;

/// Static metadata describing how a column is displayed, sorted and filtered.
pub struct Column<R> {
    pub key: String,
    pub title: String,
    pub sortable: bool,
    pub filterable: bool,
    render: Option<Renderer<R>>,
}

impl<R> Column<R> {
    /// Create a plain column. Sorting and filtering are opt-in.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            sortable: false,
            filterable: false,
            render: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Attach a renderer used for display instead of the raw value text.
    pub fn render(mut self, f: impl Fn(&Value, &R) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(f));
        self
    }
}

impl<R: Row> Column<R> {
    /// Display text for this column's cell of `record`.
    pub fn display(&self, record: &R) -> String {
        let value = record.cell(&self.key);
        match &self.render {
            Some(render) => render(&value, record),
            None => value.to_string(),
        }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            title: self.title.clone(),
            sortable: self.sortable,
            filterable: self.filterable,
            render: self.render.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("render", &self.render.is_some())
            .finish()
    }
}

/// Serializable column descriptor as written in config files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub filterable: bool,
}

impl ColumnSpec {
    pub fn new(key: &str, title: &str, sortable: bool, filterable: bool) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            sortable,
            filterable,
        }
    }
}

impl<R> From<&ColumnSpec> for Column<R> {
    fn from(spec: &ColumnSpec) -> Self {
        let title = if spec.title.is_empty() { &spec.key } else { &spec.title };
        Self {
            key: spec.key.clone(),
            title: title.clone(),
            sortable: spec.sortable,
            filterable: spec.filterable,
            render: None,
        }
    }
}

/// Check that every key is non-empty and unique.
pub fn validate_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for key in keys {
        if key.trim().is_empty() {
            return Err(AppError::validation("Column key cannot be empty"));
        }
        if !seen.insert(key) {
            return Err(AppError::DuplicateColumnKey(key.to_string()));
        }
    }
    Ok(())
}

/// Ordered set of columns with unique keys.
///
/// Column order is display order.
pub struct ColumnSet<R> {
    columns: Vec<Column<R>>,
}

impl<R> ColumnSet<R> {
    /// Validate and build a column set.
    ///
    /// Rejects empty keys and duplicate keys.
    pub fn new(columns: Vec<Column<R>>) -> Result<Self> {
        validate_keys(columns.iter().map(|c| c.key.as_str()))?;
        Ok(Self { columns })
    }

    /// Build a column set from config descriptors.
    pub fn from_specs(specs: &[ColumnSpec]) -> Result<Self> {
        Self::new(specs.iter().map(Column::from).collect())
    }

    pub fn get(&self, key: &str) -> Option<&Column<R>> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column<R>> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn is_sortable(&self, key: &str) -> bool {
        self.get(key).is_some_and(|c| c.sortable)
    }

    pub fn is_filterable(&self, key: &str) -> bool {
        self.get(key).is_some_and(|c| c.filterable)
    }
}

impl<R> Clone for ColumnSet<R> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
        }
    }
}

impl<R> fmt::Debug for ColumnSet<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.columns).finish()
    }
}

impl<'a, R> IntoIterator for &'a ColumnSet<R> {
    type Item = &'a Column<R>;
    type IntoIter = std::slice::Iter<'a, Column<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
