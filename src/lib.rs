pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod ui;

pub use engine::{PageWindow, TableView, compute_page_window, derive_visible_rows};
pub use error::{AppError, Result};
pub use models::{Column, ColumnSet, FilterState, PageState, Record, Row, SortDirection, SortState, Value};
pub use ui::{TableScreen, TableSnapshot};
