//! Host screen state for a data table.
//!
//! The screen owns the dataset and the sort, filter and page state. The
//! engine is re-run on every [`TableScreen::snapshot`] call, so derived
//! rows, page count and paginator window always come from the same inputs.

use tracing::{debug, warn};

use crate::engine::{PageWindow, TableView, compute_page_window, derive_visible_rows, total_pages, validate_max_visible};
use crate::error::{AppError, Result};
use crate::models::{ColumnSet, FilterState, PageState, Row, SortState};

/// Everything a table view needs for one render, derived together.
#[derive(Debug)]
pub struct TableSnapshot<'a, R> {
    pub view: TableView<'a, R>,
    pub window: PageWindow,
}

/// Table state owned by a screen.
#[derive(Debug)]
pub struct TableScreen<R> {
    data: Vec<R>,
    columns: ColumnSet<R>,
    sort: SortState,
    filters: FilterState,
    page: PageState,
    max_visible: usize,
}

impl<R: Row> TableScreen<R> {
    /// Create an empty screen. Page size and paginator width must be at least 1.
    pub fn new(columns: ColumnSet<R>, page_size: usize, max_visible: usize) -> Result<Self> {
        Ok(Self {
            data: Vec::new(),
            columns,
            sort: SortState::none(),
            filters: FilterState::new(),
            page: PageState::first(page_size)?,
            max_visible: validate_max_visible(max_visible)?,
        })
    }

    /// Builder-style dataset setter.
    pub fn with_data(mut self, data: Vec<R>) -> Self {
        self.set_data(data);
        self
    }

    /// Replace the dataset. A change in row count sends the view back to page 1.
    pub fn set_data(&mut self, data: Vec<R>) {
        if data.len() != self.data.len() {
            debug!("Dataset size changed {} -> {}, page reset", self.data.len(), data.len());
            self.page.reset();
        }
        self.data = data;
    }

    pub fn data(&self) -> &[R] {
        &self.data
    }

    pub fn columns(&self) -> &ColumnSet<R> {
        &self.columns
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn page_state(&self) -> &PageState {
        &self.page
    }

    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    /// Set the sort directly. Only sortable columns are accepted.
    pub fn set_sort(&mut self, sort: SortState) -> Result<()> {
        if let Some(field) = sort.field.as_deref() {
            self.ensure_sortable(field)?;
        }
        debug!("Sort set: {:?} {}", sort.field, sort.direction);
        self.sort = sort;
        Ok(())
    }

    /// Header click on `field`: toggles direction or switches column.
    ///
    /// The current page is kept and clamped on the next snapshot.
    pub fn on_sort_change(&mut self, field: &str) -> Result<()> {
        self.ensure_sortable(field)?;
        self.sort.toggle(field);
        debug!("Sort changed: {field} {}", self.sort.direction);
        Ok(())
    }

    /// Update the filter for one column and go back to page 1.
    pub fn on_filter_change(&mut self, key: &str, value: &str) -> Result<()> {
        match self.columns.get(key) {
            None => {
                warn!("Filter rejected, unknown column: {key}");
                return Err(AppError::unknown_column(key));
            }
            Some(column) if !column.filterable => {
                warn!("Filter rejected, column not filterable: {key}");
                return Err(AppError::NotFilterable(key.to_string()));
            }
            Some(_) => {}
        }
        self.filters.set(key, value);
        self.page.reset();
        debug!("Filter changed: {key}={value:?}, page reset");
        Ok(())
    }

    /// Drop every filter and go back to page 1.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.page.reset();
        debug!("Filters cleared, page reset");
    }

    /// Jump to a page, clamped into the current page range.
    pub fn on_page_change(&mut self, page: usize) {
        let target = page.clamp(1, self.total_pages());
        self.page.set_page(target);
        debug!("Page changed: requested {page}, now {target}");
    }

    pub fn next_page(&mut self) {
        self.on_page_change(self.current_page() + 1);
    }

    pub fn prev_page(&mut self) {
        self.on_page_change(self.current_page().saturating_sub(1));
    }

    pub fn first_page(&mut self) {
        self.on_page_change(1);
    }

    pub fn last_page(&mut self) {
        self.on_page_change(self.total_pages());
    }

    /// Change rows per page and go back to page 1.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        self.page.set_page_size(page_size)?;
        debug!("Page size changed: {page_size}, page reset");
        Ok(())
    }

    /// Requested page clamped against the current filtered row count.
    pub fn current_page(&self) -> usize {
        self.page.current_page().clamp(1, self.total_pages())
    }

    /// Page count for the current filters.
    pub fn total_pages(&self) -> usize {
        let filtered = crate::engine::filter(&self.data, &self.filters, &self.columns);
        total_pages(filtered.len(), self.page.page_size())
    }

    /// Derive rows, page count and paginator window in one pass.
    pub fn snapshot(&self) -> TableSnapshot<'_, R> {
        let view = derive_visible_rows(&self.data, &self.columns, &self.sort, &self.filters, &self.page);
        let window = compute_page_window(view.effective_page, view.total_pages, self.max_visible);
        TableSnapshot { view, window }
    }

    fn ensure_sortable(&self, field: &str) -> Result<()> {
        match self.columns.get(field) {
            None => {
                warn!("Sort rejected, unknown column: {field}");
                Err(AppError::unknown_column(field))
            }
            Some(column) if !column.sortable => {
                warn!("Sort rejected, column not sortable: {field}");
                Err(AppError::NotSortable(field.to_string()))
            }
            Some(_) => Ok(()),
        }
    }
}
