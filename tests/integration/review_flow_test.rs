//! Weekly Review Integration Tests
//!
//! Generates reviews from metric and completion history persisted in the
//! SQLite collection store and checks persistence, event emission and
//! listing order.

use std::sync::Arc;

use chrono::{Duration, Utc};

use skyforge_core::models::business::{DirectiveCompletionLog, MetricRecord};
use skyforge_core::models::memory::EventType;
use skyforge_core::models::review::FocusArea;
use skyforge_core::services::memory::MemoryService;
use skyforge_core::services::review::ReviewService;
use skyforge_core::storage::kv::{DurableStore, SqliteStore};
use skyforge_core::storage::repository::{keys, CollectionStore};
use skyforge_core::utils::dates::days_ago_string;

fn open_services() -> (CollectionStore, Arc<MemoryService>, ReviewService) {
    let store: Arc<dyn DurableStore> =
        Arc::new(SqliteStore::open_in_memory().expect("in-memory store"));
    let collections = CollectionStore::new(store);
    let memory = Arc::new(MemoryService::with_collections(collections.clone()));
    let review = ReviewService::new(collections.clone(), Arc::clone(&memory));
    (collections, memory, review)
}

fn record(project_id: &str, days_ago: i64) -> MetricRecord {
    MetricRecord::new(project_id, days_ago_string(days_ago))
}

fn completion(project_id: &str, days_ago: i64) -> DirectiveCompletionLog {
    let mut log = DirectiveCompletionLog::new("d1", project_id, "Post one reel", "content");
    log.completed_at = Utc::now() - Duration::days(days_ago);
    log
}

#[test]
fn test_generate_and_store_persists_review() {
    let (collections, _memory, review_service) = open_services();
    let metrics = vec![
        record("p1", 2).with_counts(50, 5, 2, 1, 1),
        record("p1", 9).with_counts(100, 10, 2, 1, 2),
    ];
    collections.save_list(keys::METRICS, &metrics).unwrap();
    let logs = vec![completion("p1", 0), completion("p1", 1), completion("p1", 2)];
    collections.save_list(keys::COMPLETION_LOGS, &logs).unwrap();

    let review = review_service.generate_and_store("p1").unwrap();

    assert_eq!(review.metrics_totals.views, 50);
    assert_eq!(review.metrics_prior.views, 100);
    assert_eq!(review.deltas.views, -50);
    assert_eq!(review.directives_completed, 3);
    assert_eq!(review.streak, 3);

    let stored = review_service.reviews_for_project("p1").unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, review.id);
}

#[test]
fn test_review_generation_logs_event() {
    let (collections, memory, review_service) = open_services();
    let metrics = vec![
        record("p1", 1).with_counts(30, 3, 1, 0, 0),
        record("p1", 8).with_counts(40, 4, 1, 0, 1),
    ];
    collections.save_list(keys::METRICS, &metrics).unwrap();

    let review = review_service.generate_and_store("p1").unwrap();

    let events = memory.project_events("p1").unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, EventType::ReviewGenerated);
    assert_eq!(
        events[0].metadata.get("reviewId").and_then(|v| v.as_str()),
        Some(review.id.as_str())
    );
}

#[test]
fn test_reviews_listed_newest_first() {
    let (_collections, _memory, review_service) = open_services();

    let first = review_service.generate_and_store("p1").unwrap();
    let second = review_service.generate_and_store("p1").unwrap();
    review_service.generate_and_store("p2").unwrap();

    let stored = review_service.reviews_for_project("p1").unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].id, second.id);
    assert_eq!(stored[1].id, first.id);
    assert!(stored[0].created_at >= stored[1].created_at);
}

#[test]
fn test_empty_history_recommends_audience_building() {
    let (_collections, _memory, review_service) = open_services();

    let review = review_service.generate_and_store("p1").unwrap();

    assert!(review.bottleneck_current.is_none());
    assert_eq!(review.deltas.views, 0);
    assert_eq!(review.streak, 0);
    assert_eq!(review.next_week_focus.len(), 1);
    assert_eq!(review.next_week_focus[0].focus_area, FocusArea::AudienceBuilding);
}
