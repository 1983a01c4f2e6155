//! Integration tests for the filter → sort → paginate → status pipeline

mod common;

use common::catalogue;
use listview::prelude::*;
use std::borrow::Cow;

fn search(term: &str) -> FilterCriteria {
    FilterCriteria::new(["name", "sku"]).with_search(term)
}

fn ids<T: ListItem>(items: &[T]) -> Vec<String> {
    items.iter().map(|item| item.item_id().to_string()).collect()
}

// ============================================================================
// Filter
// ============================================================================

#[test]
fn test_filter_is_idempotent() {
    let items = catalogue();
    let criteria = search("lamp").with_equals("category", "lighting");

    let once = filter(&items, &criteria).into_owned();
    let twice = filter(&once, &criteria).into_owned();

    assert_eq!(ids(&once), ids(&twice));
}

#[test]
fn test_empty_criteria_return_input_unchanged() {
    let items = catalogue();
    let result = filter(&items, &FilterCriteria::new(["name"]));

    assert!(matches!(result, Cow::Borrowed(_)));
    assert_eq!(ids(&result), ids(&items));
}

#[test]
fn test_filter_does_not_mutate_input() {
    let items = catalogue();
    let before = ids(&items);
    let _ = filter(&items, &search("chair"));
    assert_eq!(ids(&items), before);
}

#[test]
fn test_filter_from_query_json_with_range() {
    let items = catalogue();
    let criteria = FilterCriteria::from_json(
        ["name"],
        &serde_json::json!({"category": "lighting", "price>=": 40}),
    )
    .unwrap();

    let result = filter(&items, &criteria);
    let prices: Vec<f64> = result.iter().filter_map(|p| p.price).collect();

    assert_eq!(prices.len(), 3);
    assert!(prices.iter().all(|p| *p >= 40.0));
}

// ============================================================================
// Sort
// ============================================================================

#[test]
fn test_sort_without_key_is_identity() {
    let items = catalogue();
    let sorted = sort(&items, &SortSpec::none());
    assert_eq!(ids(&sorted), ids(&items));
}

#[test]
fn test_sort_is_stable_for_equal_keys() {
    let items = catalogue();
    let by_category = sort(&items, &SortSpec::asc("category", SortKind::Text));

    // within each category, original relative order survives
    for category in ["lighting", "seating"] {
        let expected: Vec<String> = items
            .iter()
            .filter(|p| p.category.as_deref() == Some(category))
            .map(|p| p.id.clone())
            .collect();
        let actual: Vec<String> = by_category
            .iter()
            .filter(|p| p.category.as_deref() == Some(category))
            .map(|p| p.id.clone())
            .collect();
        assert_eq!(actual, expected);
    }
}

#[test]
fn test_numeric_sort_is_not_lexicographic() {
    let items = vec![
        Record::new("a").with("price", "100"),
        Record::new("b").with("price", 9.5),
        Record::new("c").with("price", 25_i64),
    ];
    let sorted = sort(&items, &SortSpec::asc("price", SortKind::Numeric));
    assert_eq!(ids(&sorted), vec!["b", "c", "a"]);
}

#[test]
fn test_missing_values_sort_lowest() {
    let items = vec![
        Record::new("a").with("created_at", "2024-03-01T00:00:00Z"),
        Record::new("b"),
        Record::new("c").with("created_at", "2024-01-01T00:00:00Z"),
    ];

    let asc = sort(&items, &SortSpec::asc("created_at", SortKind::Date));
    assert_eq!(ids(&asc), vec!["b", "c", "a"]);

    let desc = sort(&items, &SortSpec::desc("created_at", SortKind::Date));
    assert_eq!(ids(&desc), vec!["a", "c", "b"]);
}

// ============================================================================
// Paginate
// ============================================================================

#[test]
fn test_pages_partition_the_input() {
    for len in [0_usize, 1, 9, 10, 11, 23, 40] {
        let items: Vec<usize> = (0..len).collect();
        for size in [1_usize, 3, 10, 25] {
            let pages = paginate(&items, PageState::new(size, 1)).meta.total_pages;
            assert_eq!(pages, len.div_ceil(size).max(1));

            let collected: Vec<usize> = (1..=pages)
                .flat_map(|page| paginate(&items, PageState::new(size, page)).items.to_vec())
                .collect();
            assert_eq!(collected, items, "len={len} size={size}");
        }
    }
}

#[test]
fn test_out_of_range_page_is_clamped() {
    let items: Vec<usize> = (0..23).collect();
    let last = paginate(&items, PageState::new(10, 3));
    let beyond = paginate(&items, PageState::new(10, 3 + 5));

    assert_eq!(beyond.items, last.items);
    assert_eq!(beyond.meta.page, 3);
    assert!(beyond.was_clamped());
    assert_eq!((beyond.meta.from, beyond.meta.to), (21, 23));
}

// ============================================================================
// Status
// ============================================================================

#[test]
fn test_loading_wins_over_error() {
    let status = resolve_status::<Product>(true, Some("any error"), Vec::new(), 0);
    assert_eq!(status, ViewStatus::Loading);
}

#[test]
fn test_error_wins_over_empty_and_ready() {
    let status = resolve_status(false, Some("boom"), vec![1, 2], 2);
    assert_eq!(status, ViewStatus::Error("boom".to_string()));
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_search_then_price_desc_scenario() {
    let items = catalogue();
    assert_eq!(items.len(), 23);

    let filtered = filter(&items, &search("lamp"));
    let sorted = sort(&filtered, &SortSpec::desc("price", SortKind::Numeric));
    let page = paginate(&sorted, PageState::new(10, 1));

    assert_eq!(sorted.len(), 7);
    assert_eq!(page.meta.total_pages, 1);
    assert_eq!(page.items.len(), 7);

    let prices: Vec<f64> = page.items.iter().filter_map(|p| p.price).collect();
    assert_eq!(prices, vec![99.0, 60.0, 48.0, 35.0, 19.99, 12.5, 7.25]);
}

#[test]
fn test_empty_source_scenario() {
    let mut view = ListView::new(ListViewsConfig::default_config().views[0].clone());
    let render = view.render(&SourceSnapshot::<Product>::ready(Vec::new()));

    assert_eq!(render.status, ViewStatus::Empty);
    assert_eq!(render.empty_kind, Some(EmptyKind::NoData));
    assert_eq!((render.pagination.from, render.pagination.to), (0, 0));
    assert_eq!(render.pagination.total_pages, 1);
    assert_eq!(render.summary(), "Showing 0-0 of 0");
}
