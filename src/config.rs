//! Configuration management module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::column::{ColumnSpec, validate_keys};
use crate::models::{ColumnSet, Row, SortState};
use crate::ui::TableScreen;

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub table: TableSettings,
    /// Initial sort applied when the table opens.
    #[serde(default)]
    pub sort: SortState,
    #[serde(default = "default_columns")]
    pub columns: Vec<ColumnSpec>,
}

/// Pagination and empty-state settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSettings {
    /// Rows per page (default: 10).
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Page buttons shown by the paginator (default: 5).
    #[serde(default = "default_max_visible_pages")]
    pub max_visible_pages: usize,
    /// Text shown when no rows match.
    #[serde(default = "default_empty_message")]
    pub empty_message: String,
}

fn default_page_size() -> usize {
    10
}

fn default_max_visible_pages() -> usize {
    5
}

fn default_empty_message() -> String {
    "No records found".to_string()
}

/// Patient list layout.
fn default_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("id", "ID", true, false),
        ColumnSpec::new("name", "Name", true, true),
        ColumnSpec::new("ward", "Ward", true, true),
        ColumnSpec::new("doctor", "Doctor", true, true),
        ColumnSpec::new("admitted", "Admitted", true, true),
        ColumnSpec::new("status", "Status", false, true),
    ]
}

impl AppConfig {
    /// Get config file path (same directory as executable).
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("table.toml")
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(config) => ConfigLoadResult::Loaded(config),
                Err(e) => ConfigLoadResult::Invalid(e),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Parse and validate config text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str::<AppConfig>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table.page_size < 1 {
            return Err(ConfigError::Validation("Page size must be at least 1".to_string()));
        }
        if self.table.max_visible_pages < 1 {
            return Err(ConfigError::Validation(
                "Max visible pages must be at least 1".to_string(),
            ));
        }
        if self.columns.is_empty() {
            return Err(ConfigError::Validation("At least one column is required".to_string()));
        }
        validate_keys(self.columns.iter().map(|c| c.key.as_str()))
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        if let Some(field) = self.sort.field.as_deref() {
            match self.columns.iter().find(|c| c.key == field) {
                None => {
                    return Err(ConfigError::Validation(format!(
                        "Sort field '{field}' is not a column"
                    )));
                }
                Some(column) if !column.sortable => {
                    return Err(ConfigError::Validation(format!(
                        "Sort field '{field}' is not sortable"
                    )));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Build a screen with this config's columns, page size and initial sort.
    pub fn build_screen<R: Row>(&self) -> crate::Result<TableScreen<R>> {
        let columns = ColumnSet::from_specs(&self.columns)?;
        let mut screen = TableScreen::new(columns, self.table.page_size, self.table.max_visible_pages)?;
        screen.set_sort(self.sort.clone())?;
        Ok(screen)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            table: TableSettings::default(),
            sort: SortState::asc("name"),
            columns: default_columns(),
        }
    }
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_visible_pages: default_max_visible_pages(),
            empty_message: default_empty_message(),
        }
    }
}
