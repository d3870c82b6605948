//! Host-owned table state: sort, filters and page.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current sort. `field: None` keeps dataset order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortState {
    /// No sort applied.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn by(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: Some(field.into()),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::by(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::by(field, SortDirection::Desc)
    }

    pub fn is_active(&self) -> bool {
        self.field.is_some()
    }

    /// Header-click behavior: the active field flips direction,
    /// any other field becomes active in ascending order.
    pub fn toggle(&mut self, field: &str) {
        if self.field.as_deref() == Some(field) {
            self.direction = self.direction.toggled();
        } else {
            self.field = Some(field.to_string());
            self.direction = SortDirection::Asc;
        }
    }
}

/// Per-column filter strings, matched as case-insensitive substrings.
///
/// An empty string is the same as no entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState {
    filters: BTreeMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter for a column. An empty value clears it.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.is_empty() {
            self.filters.remove(&key);
        } else {
            self.filters.insert(key, value);
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.filters.remove(key)
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }

    /// Non-empty filters as `(column key, filter string)`.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True when no filter is active.
    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.active().count()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut state = Self::new();
        for (k, v) in iter {
            state.set(k, v);
        }
        state
    }
}

/// Requested page and page size.
///
/// `page_size` is validated at construction; `current_page` is only a
/// request and gets clamped against the filtered row count when paginating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    page_size: usize,
}

impl PageState {
    /// Create a page state. A page size of 0 is a configuration error.
    pub fn new(current_page: usize, page_size: usize) -> Result<Self> {
        if page_size < 1 {
            return Err(AppError::InvalidPageSize(page_size));
        }
        Ok(Self {
            current_page: current_page.max(1),
            page_size,
        })
    }

    /// Page 1 with the given size.
    pub fn first(page_size: usize) -> Result<Self> {
        Self::new(1, page_size)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Request a page. Values below 1 become 1.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Change the page size and go back to page 1.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if page_size < 1 {
            return Err(AppError::InvalidPageSize(page_size));
        }
        self.page_size = page_size;
        self.current_page = 1;
        Ok(())
    }
}
