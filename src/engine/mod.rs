//! Table derivation pipeline: sort, then filter, then paginate.
//!
//! Every function here is pure. The source dataset is only borrowed; each
//! stage returns a new sequence of references into it. Data conditions such
//! as an unknown sort field, a filter with no matches or an out-of-range page
//! never produce an error, they degrade to an empty or clamped result.

pub mod window;

#[cfg(test)]
mod tests;

use std::cmp::Reverse;

use tracing::trace;

use crate::models::{ColumnSet, FilterState, PageState, Row, SortDirection, SortState};

pub use window::{PageWindow, compute_page_window, validate_max_visible};

/// One page of an already ordered and filtered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'s, T> {
    pub rows: &'s [T],
    pub total_pages: usize,
    pub effective_page: usize,
}

/// Result of running the whole pipeline once.
#[derive(Debug)]
pub struct TableView<'a, R> {
    /// Rows to display on the effective page.
    pub rows: Vec<&'a R>,
    /// `ceil(filtered_count / page_size)`, at least 1.
    pub total_pages: usize,
    /// Requested page clamped into `[1, total_pages]`.
    pub effective_page: usize,
    /// Rows left after filtering.
    pub filtered_count: usize,
    /// Rows in the source dataset.
    pub total_count: usize,
    pub page_size: usize,
}

impl<R> TableView<'_, R> {
    /// True when nothing is left to show on this page.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether a paginator control is needed at all.
    pub fn has_pagination(&self) -> bool {
        self.total_pages > 1
    }

    /// 1-based position of the first visible row in the filtered sequence, 0 when empty.
    pub fn first_row_number(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            (self.effective_page - 1) * self.page_size + 1
        }
    }

    /// 1-based position of the last visible row, 0 when empty.
    pub fn last_row_number(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            self.first_row_number() + self.rows.len() - 1
        }
    }
}

/// Field to sort by, if the sort state names a sortable column.
fn active_sort_field<'s, R>(sort_state: &'s SortState, columns: &ColumnSet<R>) -> Option<&'s str> {
    let field = sort_state.field.as_deref()?;
    if columns.is_sortable(field) {
        Some(field)
    } else {
        trace!("Ignoring sort on unknown or non-sortable field: {field}");
        None
    }
}

/// Order records by the sort field.
///
/// Stable in both directions: records with equal values keep their input
/// order. Descending reverses the comparison, not the output, so equal groups
/// are not flipped. With no field, or a field that is unknown or not sortable,
/// input order is returned unchanged.
pub fn sort<'a, R, I>(records: I, sort_state: &SortState, columns: &ColumnSet<R>) -> Vec<&'a R>
where
    R: Row + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut rows: Vec<&'a R> = records.into_iter().collect();
    let Some(field) = active_sort_field(sort_state, columns) else {
        return rows;
    };

    match sort_state.direction {
        SortDirection::Asc => rows.sort_by_cached_key(|r| r.cell(field)),
        SortDirection::Desc => rows.sort_by_cached_key(|r| Reverse(r.cell(field))),
    }
    rows
}

/// Keep records matching every active filter.
///
/// Each filter is a case-insensitive substring test on the stringified cell.
/// Filters keyed by a column that is unknown or not filterable are ignored.
/// An absent cell matches as the empty string.
pub fn filter<'a, R, I>(records: I, filter_state: &FilterState, columns: &ColumnSet<R>) -> Vec<&'a R>
where
    R: Row + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let active: Vec<(&str, String)> = filter_state
        .active()
        .filter(|(key, _)| columns.is_filterable(key))
        .map(|(key, needle)| (key, needle.to_lowercase()))
        .collect();

    if active.is_empty() {
        return records.into_iter().collect();
    }

    records
        .into_iter()
        .filter(|record| {
            active
                .iter()
                .all(|(key, needle)| record.cell(key).contains_lowercase(needle))
        })
        .collect()
}

/// Number of pages for `count` rows, never less than 1.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Slice out the requested page, clamping it into range.
pub fn paginate<'s, T>(records: &'s [T], page_state: &PageState) -> Page<'s, T> {
    let page_size = page_state.page_size();
    let total_pages = total_pages(records.len(), page_size);
    let effective_page = page_state.current_page().clamp(1, total_pages);

    let start = ((effective_page - 1) * page_size).min(records.len());
    let end = (start + page_size).min(records.len());

    Page {
        rows: &records[start..end],
        total_pages,
        effective_page,
    }
}

/// Run the full pipeline: sort, then filter, then paginate.
///
/// Sorting happens before filtering so tie-breaks follow the unfiltered
/// relative order.
pub fn derive_visible_rows<'a, R: Row>(
    dataset: &'a [R],
    columns: &ColumnSet<R>,
    sort_state: &SortState,
    filter_state: &FilterState,
    page_state: &PageState,
) -> TableView<'a, R> {
    let sorted = sort(dataset, sort_state, columns);
    let filtered = filter(sorted, filter_state, columns);
    let page = paginate(&filtered, page_state);

    trace!(
        "Derived page {}/{}: {} of {} rows after filtering",
        page.effective_page,
        page.total_pages,
        filtered.len(),
        dataset.len()
    );

    TableView {
        rows: page.rows.to_vec(),
        total_pages: page.total_pages,
        effective_page: page.effective_page,
        filtered_count: filtered.len(),
        total_count: dataset.len(),
        page_size: page_state.page_size(),
    }
}
