//! Error types and handling.

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Two column descriptors share the same key
    #[error("Duplicate column key: {0}")]
    DuplicateColumnKey(String),

    /// Page size must be at least 1
    #[error("Invalid page size: {0} (must be at least 1)")]
    InvalidPageSize(usize),

    /// Paginator window must show at least one page
    #[error("Invalid max visible pages: {0} (must be at least 1)")]
    InvalidMaxVisible(usize),

    /// Column key not present in the column set
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Sort requested on a column that is not sortable
    #[error("Column is not sortable: {0}")]
    NotSortable(String),

    /// Filter requested on a column that is not filterable
    #[error("Column is not filterable: {0}")]
    NotFilterable(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a validation error with message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an unknown column error
    pub fn unknown_column(key: impl Into<String>) -> Self {
        Self::UnknownColumn(key.into())
    }

    /// True for errors that indicate a programming mistake in table setup.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::DuplicateColumnKey(_) | Self::InvalidPageSize(_) | Self::InvalidMaxVisible(_)
        )
    }
}
