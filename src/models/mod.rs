//! Data model: cell values, rows, column descriptors and host-owned state.

pub mod column;
pub mod record;
pub mod state;
pub mod value;

pub use column::{Column, ColumnSet, ColumnSpec, Renderer};
pub use record::{Record, Row, load_records, records_from_json};
pub use state::{FilterState, PageState, SortDirection, SortState};
pub use value::Value;
