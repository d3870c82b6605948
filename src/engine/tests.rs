//! Unit tests for the derivation pipeline.

use serde_json::json;

use super::{compute_page_window, derive_visible_rows, filter, paginate, sort, total_pages};
use crate::models::{Column, ColumnSet, FilterState, PageState, Record, Row, SortState, Value};

fn columns() -> ColumnSet<Record> {
    ColumnSet::new(vec![
        Column::new("name", "Name").sortable().filterable(),
        Column::new("ward", "Ward").sortable().filterable(),
        Column::new("age", "Age").sortable().filterable(),
        Column::new("notes", "Notes"),
    ])
    .unwrap()
}

fn patients() -> Vec<Record> {
    serde_json::from_value(json!([
        {"id": 1, "name": "Grace", "ward": "B", "age": 71},
        {"id": 2, "name": "Anna", "ward": "A", "age": 34},
        {"id": 3, "name": "Emma", "ward": "C", "age": 8},
        {"id": 4, "name": "Brian", "ward": "A", "age": 55},
        {"id": 5, "name": "Felix", "ward": "B", "age": 34, "notes": "allergic"},
        {"id": 6, "name": "Chloe", "ward": "C", "age": 19},
        {"id": 7, "name": "David", "ward": "A"}
    ]))
    .unwrap()
}

fn ids<R: Row>(rows: &[&R]) -> Vec<i64> {
    rows.iter()
        .map(|r| match r.cell("id") {
            Value::Int(id) => id,
            other => panic!("unexpected id {other:?}"),
        })
        .collect()
}

fn names<R: Row>(rows: &[&R]) -> Vec<String> {
    cells(rows, "name")
}

fn cells<R: Row>(rows: &[&R], key: &str) -> Vec<String> {
    rows.iter().map(|r| r.cell(key).to_string()).collect()
}

#[test]
fn test_no_sort_keeps_input_order() {
    let data = patients();
    let sorted = sort(&data, &SortState::none(), &columns());
    assert_eq!(ids(&sorted), vec![1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn test_unknown_or_non_sortable_field_keeps_input_order() {
    let data = patients();
    assert_eq!(ids(&sort(&data, &SortState::asc("missing"), &columns())), vec![1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(ids(&sort(&data, &SortState::desc("notes"), &columns())), vec![1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn test_sort_by_text() {
    let data = patients();
    let sorted = sort(&data, &SortState::asc("name"), &columns());
    assert_eq!(names(&sorted), ["Anna", "Brian", "Chloe", "David", "Emma", "Felix", "Grace"]);
}

#[test]
fn test_sort_by_number_puts_missing_first() {
    let data = patients();
    let sorted = sort(&data, &SortState::asc("age"), &columns());
    // David has no age; Anna and Felix tie at 34 and keep input order.
    assert_eq!(ids(&sorted), vec![7, 3, 6, 2, 5, 4, 1]);
}

#[test]
fn test_sort_is_stable_ascending() {
    let data = patients();
    let sorted = sort(&data, &SortState::asc("ward"), &columns());
    assert_eq!(ids(&sorted), vec![2, 4, 7, 1, 5, 3, 6]);
}

#[test]
fn test_sort_is_stable_descending() {
    let data = patients();
    let sorted = sort(&data, &SortState::desc("ward"), &columns());
    // Equal wards keep input order rather than being reversed.
    assert_eq!(ids(&sorted), vec![3, 6, 1, 5, 2, 4, 7]);
}

#[test]
fn test_desc_equals_reversed_asc_when_keys_unique() {
    let data = patients();
    let asc = sort(&data, &SortState::asc("name"), &columns());
    let desc = sort(&data, &SortState::desc("name"), &columns());
    let mut reversed = ids(&asc);
    reversed.reverse();
    assert_eq!(ids(&desc), reversed);
}

#[test]
fn test_desc_differs_from_reversed_asc_with_duplicates() {
    let data = patients();
    let asc = sort(&data, &SortState::asc("ward"), &columns());
    let desc = sort(&data, &SortState::desc("ward"), &columns());
    let mut reversed = ids(&asc);
    reversed.reverse();
    assert_ne!(ids(&desc), reversed);
}

#[test]
fn test_sort_does_not_mutate_source() {
    let data = patients();
    let before = data.clone();
    let _ = sort(&data, &SortState::desc("age"), &columns());
    let _ = filter(&data, &FilterState::new().with("name", "a"), &columns());
    assert_eq!(data, before);
}

#[test]
fn test_filter_is_case_insensitive_substring() {
    let data = patients();
    let filtered = filter(&data, &FilterState::new().with("name", "AN"), &columns());
    assert_eq!(names(&filtered), ["Anna", "Brian"]);
}

#[test]
fn test_filter_stringifies_numbers() {
    let data = patients();
    let filtered = filter(&data, &FilterState::new().with("age", "34"), &columns());
    assert_eq!(ids(&filtered), vec![2, 5]);
}

#[test]
fn test_filter_missing_value_matches_as_empty() {
    let data = patients();
    let filtered = filter(&data, &FilterState::new().with("age", "1"), &columns());
    // 71 and 19 contain "1"; David has no age and never matches.
    assert_eq!(ids(&filtered), vec![1, 6]);
}

#[test]
fn test_empty_filter_is_identity() {
    let data = patients();
    let filtered = filter(&data, &FilterState::new().with("name", ""), &columns());
    assert_eq!(ids(&filtered), vec![1, 2, 3, 4, 5, 6, 7]);
    let filtered = filter(&data, &FilterState::new(), &columns());
    assert_eq!(filtered.len(), data.len());
}

#[test]
fn test_filter_on_unknown_or_non_filterable_column_is_ignored() {
    let data = patients();
    let filters = FilterState::new().with("notes", "allergic").with("room", "12");
    assert_eq!(filter(&data, &filters, &columns()).len(), 7);
}

#[test]
fn test_filter_result_is_subset() {
    let data = patients();
    for needle in ["a", "e", "zz", "B", "3"] {
        let filtered = filter(&data, &FilterState::new().with("name", needle), &columns());
        assert!(filtered.len() <= data.len());
        assert!(filtered.iter().all(|r| data.iter().any(|d| std::ptr::eq(*r, d))));
    }
}

#[test]
fn test_filters_compose_with_and() {
    let data = patients();
    let cols = columns();
    let step = filter(&data, &FilterState::new().with("ward", "a"), &cols);
    let chained = filter(step, &FilterState::new().with("name", "an"), &cols);
    let combined = filter(&data, &FilterState::new().with("ward", "a").with("name", "an"), &cols);
    assert_eq!(ids(&chained), ids(&combined));
    assert_eq!(ids(&combined), vec![2, 4]);
}

#[test]
fn test_filter_with_no_matches_is_empty() {
    let data = patients();
    let filtered = filter(&data, &FilterState::new().with("name", "zzz"), &columns());
    assert!(filtered.is_empty());
}

#[test]
fn test_total_pages_minimum_one() {
    assert_eq!(total_pages(0, 10), 1);
    assert_eq!(total_pages(10, 10), 1);
    assert_eq!(total_pages(11, 10), 2);
    assert_eq!(total_pages(7, 3), 3);
}

#[test]
fn test_paginate_last_page_is_short() {
    let items: Vec<u32> = (1..=7).collect();
    let page = paginate(&items, &PageState::new(3, 3).unwrap());
    assert_eq!(page.rows, &[7]);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.effective_page, 3);
}

#[test]
fn test_paginate_clamps_to_last_page() {
    let items: Vec<u32> = (1..=7).collect();
    let page = paginate(&items, &PageState::new(9999, 3).unwrap());
    assert_eq!(page.effective_page, 3);
    assert_eq!(page.rows, &[7]);
}

#[test]
fn test_paginate_empty_input() {
    let items: Vec<u32> = Vec::new();
    let page = paginate(&items, &PageState::new(4, 3).unwrap());
    assert!(page.rows.is_empty());
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.effective_page, 1);
}

#[test]
fn test_pages_cover_sequence_exactly() {
    let items: Vec<u32> = (1..=23).collect();
    for size in 1..=25 {
        let total = total_pages(items.len(), size);
        let mut rebuilt = Vec::new();
        for p in 1..=total {
            rebuilt.extend_from_slice(paginate(&items, &PageState::new(p, size).unwrap()).rows);
        }
        assert_eq!(rebuilt, items, "page size {size}");
    }
}

#[test]
fn test_sort_before_filter_tie_break() {
    // Ties under the sort key must follow unfiltered input order.
    let data = patients();
    let view = derive_visible_rows(
        &data,
        &columns(),
        &SortState::desc("ward"),
        &FilterState::new().with("ward", "a"),
        &PageState::first(10).unwrap(),
    );
    assert_eq!(ids(&view.rows), vec![2, 4, 7]);
}

#[test]
fn test_scenario_first_page_sorted_by_name() {
    let data = patients();
    let view = derive_visible_rows(
        &data,
        &columns(),
        &SortState::asc("name"),
        &FilterState::new(),
        &PageState::new(1, 3).unwrap(),
    );
    assert_eq!(names(&view.rows), ["Anna", "Brian", "Chloe"]);
    assert_eq!(view.total_pages, 3);
    assert_eq!(view.effective_page, 1);
    assert_eq!(view.filtered_count, 7);
    assert_eq!(view.first_row_number(), 1);
    assert_eq!(view.last_row_number(), 3);
}

#[test]
fn test_scenario_filter_collapses_to_single_page() {
    let data = patients();
    let view = derive_visible_rows(
        &data,
        &columns(),
        &SortState::asc("name"),
        &FilterState::new().with("name", "an"),
        &PageState::new(3, 3).unwrap(),
    );
    assert_eq!(names(&view.rows), ["Anna", "Brian"]);
    assert_eq!(view.total_pages, 1);
    assert_eq!(view.effective_page, 1);
    assert!(!view.has_pagination());
    assert!(compute_page_window(view.effective_page, view.total_pages, 5).is_empty());
}

#[test]
fn test_empty_dataset_view() {
    let data: Vec<Record> = Vec::new();
    let view = derive_visible_rows(
        &data,
        &columns(),
        &SortState::asc("name"),
        &FilterState::new(),
        &PageState::new(2, 3).unwrap(),
    );
    assert!(view.is_empty());
    assert_eq!(view.total_pages, 1);
    assert_eq!(view.effective_page, 1);
    assert_eq!(view.first_row_number(), 0);
    assert_eq!(view.last_row_number(), 0);
}

#[test]
fn test_derive_is_idempotent() {
    let data = patients();
    let cols = columns();
    let sort_state = SortState::desc("age");
    let filters = FilterState::new().with("ward", "b");
    let page = PageState::new(1, 1).unwrap();
    let first = derive_visible_rows(&data, &cols, &sort_state, &filters, &page);
    let second = derive_visible_rows(&data, &cols, &sort_state, &filters, &page);
    assert_eq!(ids(&first.rows), ids(&second.rows));
    assert_eq!(first.total_pages, second.total_pages);
    assert_eq!(ids(&first.rows), vec![1]);
    assert_eq!(first.total_pages, 2);
}

#[test]
fn test_date_shaped_strings_sort_and_filter_as_text() {
    let cols = ColumnSet::new(vec![Column::new("note", "Note").sortable().filterable()]).unwrap();
    let data: Vec<Record> = serde_json::from_value(json!([
        {"note": "2025-01-01"},
        {"note": "1 week follow-up"},
        {"note": "2025-1-5"}
    ]))
    .unwrap();
    let sorted = sort(&data, &SortState::asc("note"), &cols);
    assert_eq!(cells(&sorted, "note"), ["1 week follow-up", "2025-01-01", "2025-1-5"]);

    let filtered = filter(&data, &FilterState::new().with("note", "2025-1-5"), &cols);
    assert_eq!(cells(&filtered, "note"), ["2025-1-5"]);

    let filtered = filter(&data, &FilterState::new().with("note", "2025-0"), &cols);
    assert_eq!(cells(&filtered, "note"), ["2025-01-01"]);
}
