//! Diagnosis Pipeline Integration Tests
//!
//! Exercises the metric path the way the embedding app drives it: records
//! persisted through the SQLite collection store, loaded back, aggregated
//! into week windows, diagnosed, and rolled into execution statistics.

use std::sync::Arc;

use chrono::{Duration, Utc};

use skyforge_core::models::business::{
    BottleneckCategory, DirectiveCompletionLog, MetricRecord,
};
use skyforge_core::services::execution::{
    aggregate_period, compute_execution_stats, diagnose_bottleneck,
};
use skyforge_core::storage::kv::{DurableStore, SqliteStore};
use skyforge_core::storage::repository::{keys, CollectionStore};
use skyforge_core::utils::dates::days_ago_string;

fn open_collections() -> CollectionStore {
    let store: Arc<dyn DurableStore> =
        Arc::new(SqliteStore::open_in_memory().expect("in-memory store"));
    CollectionStore::new(store)
}

fn record(project_id: &str, days_ago: i64) -> MetricRecord {
    MetricRecord::new(project_id, days_ago_string(days_ago))
}

fn completion(project_id: &str, days_ago: i64) -> DirectiveCompletionLog {
    let mut log = DirectiveCompletionLog::new("d1", project_id, "Post one reel", "content");
    log.completed_at = Utc::now() - Duration::days(days_ago);
    log
}

fn project_metrics(collections: &CollectionStore, project_id: &str) -> Vec<MetricRecord> {
    let all: Vec<MetricRecord> = collections.load_list(keys::METRICS).unwrap();
    all.into_iter()
        .filter(|r| r.project_id == project_id)
        .collect()
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn test_metric_records_round_trip() {
    let collections = open_collections();
    let records = vec![
        record("p1", 0).with_counts(12, 3, 1, 0, 1).with_notes("story day"),
        record("p1", 1).with_counts(40, 6, 2, 1, 0),
        record("p2", 0).with_counts(5, 0, 0, 0, 0),
    ];
    collections.save_list(keys::METRICS, &records).unwrap();

    let loaded: Vec<MetricRecord> = collections.load_list(keys::METRICS).unwrap();
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded[0].notes.as_deref(), Some("story day"));
    assert_eq!(loaded[1].views, 40);
    assert_eq!(project_metrics(&collections, "p1").len(), 2);
}

// ============================================================================
// Window Aggregation
// ============================================================================

#[test]
fn test_adjacent_windows_share_boundary_day() {
    let records = vec![
        record("p1", 0).with_counts(10, 0, 0, 0, 0),
        record("p1", 7).with_counts(20, 0, 0, 0, 0),
        record("p1", 14).with_counts(40, 0, 0, 0, 0),
    ];

    let recent = aggregate_period(&records, 0, 7);
    let prior = aggregate_period(&records, 7, 14);

    assert_eq!(recent.views, 30);
    assert_eq!(prior.views, 60);
    assert_eq!(recent.period_label, "0-7 days ago");
    assert_eq!(prior.period_label, "7-14 days ago");
}

// ============================================================================
// Diagnosis
// ============================================================================

#[test]
fn test_low_traffic_diagnosed_from_stored_history() {
    let collections = open_collections();
    let records = vec![
        record("p1", 1).with_counts(4, 1, 0, 0, 0),
        record("p1", 9).with_counts(8, 2, 0, 0, 0),
    ];
    collections.save_list(keys::METRICS, &records).unwrap();

    let diagnosis = diagnose_bottleneck(&project_metrics(&collections, "p1")).unwrap();

    assert_eq!(diagnosis.category, BottleneckCategory::Traffic);
    assert_eq!(diagnosis.confidence, 85);
    assert!(diagnosis.reasoning.contains("very low"));
}

#[test]
fn test_interest_without_sales_flags_pricing() {
    let collections = open_collections();
    let records = vec![
        record("p1", 2).with_counts(100, 15, 0, 0, 0),
        record("p1", 9).with_counts(50, 8, 0, 0, 0),
    ];
    collections.save_list(keys::METRICS, &records).unwrap();

    let diagnosis = diagnose_bottleneck(&project_metrics(&collections, "p1")).unwrap();

    assert_eq!(diagnosis.category, BottleneckCategory::Pricing);
    assert_eq!(diagnosis.confidence, 70);
    assert!(diagnosis.reasoning.contains("Pricing or offer friction"));
}

#[test]
fn test_silent_fortnight_defaults_to_traffic() {
    let records = vec![
        record("p1", 30).with_counts(200, 20, 5, 2, 3),
        record("p1", 40).with_counts(150, 12, 3, 1, 2),
    ];

    let diagnosis = diagnose_bottleneck(&records).unwrap();

    assert_eq!(diagnosis.category, BottleneckCategory::Traffic);
    assert_eq!(diagnosis.confidence, 90);
    assert_eq!(
        diagnosis.reasoning,
        "No metrics recorded in the last 14 days. Primary issue is generating visibility."
    );
}

#[test]
fn test_thin_history_yields_no_diagnosis() {
    assert!(diagnose_bottleneck(&[]).is_none());
    assert!(diagnose_bottleneck(&[record("p1", 0).with_counts(5, 0, 0, 0, 0)]).is_none());
}

// ============================================================================
// Execution Statistics
// ============================================================================

#[test]
fn test_execution_stats_from_stored_logs() {
    let collections = open_collections();
    let logs = vec![
        completion("p1", 0),
        completion("p1", 1),
        completion("p2", 0),
    ];
    collections.save_list(keys::COMPLETION_LOGS, &logs).unwrap();
    let metrics = vec![
        record("p1", 0).with_counts(0, 0, 0, 0, 4),
        record("p1", 1).with_counts(0, 0, 0, 0, 2),
    ];
    collections.save_list(keys::METRICS, &metrics).unwrap();

    let loaded_logs: Vec<DirectiveCompletionLog> =
        collections.load_list(keys::COMPLETION_LOGS).unwrap();
    let stats = compute_execution_stats(&project_metrics(&collections, "p1"), &loaded_logs, "p1");

    assert_eq!(stats.streak, 2);
    assert_eq!(stats.weekly_completion_pct, 29);
    assert_eq!(stats.consistency_score, 14);
    assert_eq!(stats.revenue_per_directive, Some(3.0));
}
