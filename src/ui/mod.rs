//! Host screen state and its text rendering.

pub mod grid;
pub mod screen;

pub use grid::{render_pager, render_table, status_line};
pub use screen::{TableScreen, TableSnapshot};
