//! Integration tests for list views over a source adapter with item actions

mod common;

use common::{catalogue, loaded, reviews, runner};
use listview::prelude::*;

fn products_view() -> ListView {
    let config = ListViewsConfig::default_config();
    ListView::new(config.require_view("products").unwrap().clone())
}

// ============================================================================
// View state
// ============================================================================

#[tokio::test]
async fn test_render_search_and_sort() {
    let store = Arc::new(InMemoryDataSource::new(catalogue()));
    let source = loaded(&store).await;

    let mut view = products_view();
    view.set_search("LAMP");
    view.set_sort(Some("price"), SortDirection::Desc).unwrap();
    let render = view.render(&source.snapshot().unwrap());

    assert!(render.status.is_ready());
    assert_eq!(render.filtered_count, 7);
    assert_eq!(render.source_count, 23);
    let first = render.rows(|p| p.price);
    assert_eq!(first[0], Some(99.0));
    assert_eq!(render.summary(), "Showing 1-7 of 7");
}

#[tokio::test]
async fn test_paging_through_results() {
    let store = Arc::new(InMemoryDataSource::new(catalogue()));
    let source = loaded(&store).await;
    let snapshot = source.snapshot().unwrap();

    let mut view = products_view();
    view.set_sort(Some("name"), SortDirection::Asc).unwrap();

    let mut seen = Vec::new();
    loop {
        let render = view.render(&snapshot);
        seen.extend(render.rows(|p| p.id.clone()));
        if !render.pagination.has_next {
            break;
        }
        view.next_page();
    }
    assert_eq!(seen.len(), 23);

    // past the end stays on the last page
    view.next_page();
    let render = view.render(&snapshot);
    assert_eq!(render.pagination.page, 3);
    assert_eq!(view.page_state().current_page(), 3);
}

#[tokio::test]
async fn test_page_size_change_keeps_first_visible_item() {
    let store = Arc::new(InMemoryDataSource::new(catalogue()));
    let snapshot = loaded(&store).await.snapshot().unwrap();

    let mut view = products_view();
    view.set_sort(Some("name"), SortDirection::Asc).unwrap();
    view.set_page(3);
    let before = view.render(&snapshot).rows(|p| p.id.clone());

    view.set_page_size(5);
    let after = view.render(&snapshot);

    assert_eq!(after.pagination.page, 5);
    assert_eq!(after.rows(|p| p.id.clone())[0], before[0]);
}

#[tokio::test]
async fn test_no_matches_empty_state() {
    let store = Arc::new(InMemoryDataSource::new(catalogue()));
    let snapshot = loaded(&store).await.snapshot().unwrap();

    let mut view = products_view();
    view.set_search("sofa");
    let render = view.render(&snapshot);

    assert_eq!(render.status, ViewStatus::Empty);
    assert_eq!(render.empty_kind, Some(EmptyKind::NoMatches));

    view.reset();
    assert!(view.render(&snapshot).status.is_ready());
}

#[tokio::test]
async fn test_apply_query_params() {
    let store = Arc::new(InMemoryDataSource::new(catalogue()));
    let snapshot = loaded(&store).await.snapshot().unwrap();

    let params: QueryParams = serde_json::from_value(serde_json::json!({
        "page": 2,
        "limit": 3,
        "filter": r#"{"category": "seating"}"#,
        "sort": "price:asc"
    }))
    .unwrap();

    let mut view = products_view();
    view.apply_query(&params).unwrap();
    let render = view.render(&snapshot);

    assert_eq!(render.filtered_count, 16);
    assert_eq!(render.pagination.page, 2);
    assert_eq!(render.pagination.limit, 3);
    assert_eq!(render.rows(|p| p.price), vec![Some(105.0), Some(107.0), Some(108.0)]);
}

#[test]
fn test_apply_query_rejects_unknown_sort_key() {
    let params = QueryParams {
        sort: Some("weight:asc".to_string()),
        ..QueryParams::default()
    };
    let err = products_view().apply_query(&params).unwrap_err();
    assert_eq!(err.error_code(), "UNKNOWN_SORT_KEY");
}

// ============================================================================
// Source adapter
// ============================================================================

#[tokio::test]
async fn test_fetch_failure_keeps_previous_items() {
    let store = Arc::new(InMemoryDataSource::new(catalogue()));
    let source = loaded(&store).await;

    store.fail_next_fetch("service unavailable").unwrap();
    assert!(source.refetch().await.is_err());

    let snapshot = source.snapshot().unwrap();
    assert_eq!(snapshot.items.len(), 23);
    assert_eq!(snapshot.error.as_deref(), Some("service unavailable"));

    let render = products_view().render(&snapshot);
    assert_eq!(render.status.error(), Some("service unavailable"));

    // retry clears the error
    source.refetch().await.unwrap();
    assert_eq!(source.snapshot().unwrap().error, None);
}

// ============================================================================
// Actions
// ============================================================================

#[tokio::test]
async fn test_failed_action_notifies_and_leaves_list_untouched() {
    let store = Arc::new(InMemoryDataSource::new(catalogue()));
    let source = loaded(&store).await;
    let notifier = Arc::new(MemoryNotifier::new());
    let runner = runner(&store, &source, &notifier);

    store.fail_actions(Some("network error")).unwrap();
    let err = runner.run(ActionKind::Delete, "p01").await.unwrap_err();

    assert!(matches!(err, ListViewError::Action(ActionError::Failed { .. })));
    assert_eq!(source.snapshot().unwrap().items.len(), 23);

    let notes = notifier.take();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotificationLevel::Error);
    assert!(notes[0].message.contains("network error"));
}

#[tokio::test]
async fn test_delete_refetches() {
    let store = Arc::new(InMemoryDataSource::new(catalogue()));
    let source = loaded(&store).await;
    let notifier = Arc::new(MemoryNotifier::new());
    let runner = runner(&store, &source, &notifier);

    runner.run(ActionKind::Delete, "p01").await.unwrap();

    let snapshot = source.snapshot().unwrap();
    assert_eq!(snapshot.items.len(), 22);
    assert!(snapshot.items.iter().all(|p| p.id != "p01"));
    assert_eq!(notifier.take()[0].level, NotificationLevel::Success);
}

#[tokio::test]
async fn test_optimistic_removal() {
    let store = Arc::new(InMemoryDataSource::new(catalogue()));
    let source = loaded(&store).await;
    let notifier = Arc::new(MemoryNotifier::new());
    let runner = runner(&store, &source, &notifier).with_policy(UpdatePolicy::Optimistic);

    // a refetch would pick up this failure
    store.fail_next_fetch("refetch not expected").unwrap();
    runner.run(ActionKind::Delete, "p02").await.unwrap();

    let snapshot = source.snapshot().unwrap();
    assert_eq!(snapshot.items.len(), 22);
    assert_eq!(snapshot.error, None);
}

#[tokio::test]
async fn test_duplicate_appears_after_refetch() {
    let store = Arc::new(InMemoryDataSource::new(catalogue()));
    let source = loaded(&store).await;
    let notifier = Arc::new(MemoryNotifier::new());
    let runner = runner(&store, &source, &notifier).with_policy(UpdatePolicy::Optimistic);

    runner.run(ActionKind::Duplicate, "p00").await.unwrap();

    let snapshot = source.snapshot().unwrap();
    assert_eq!(snapshot.items.len(), 24);
    assert_eq!(snapshot.items[1].name, "Desk Lamp 0 (copy)");
}

#[tokio::test]
async fn test_review_moderation() {
    let store = Arc::new(InMemoryDataSource::new(reviews()));
    let source = loaded(&store).await;
    let notifier = Arc::new(MemoryNotifier::new());
    let runner = runner(&store, &source, &notifier);

    runner.run(ActionKind::Approve, "r2").await.unwrap();

    let config = ListViewsConfig::default_config();
    let mut view = ListView::new(config.require_view("reviews").unwrap().clone());
    view.set_filter("status", "approved").unwrap();
    let render = view.render(&source.snapshot().unwrap());

    assert_eq!(render.rows(|r| r.id.clone()), vec!["r2".to_string()]);
    assert_eq!(notifier.take()[0].message, "Review approved");
}
