//! Workspace Memory Integration Tests
//!
//! Covers the memory lifecycle against an in-memory SQLite store:
//! bridge-generated writes, capped persistence, relevance retrieval,
//! prompt formatting and per-project clearing.

use std::sync::Arc;

use skyforge_core::models::business::MetricRecord;
use skyforge_core::models::memory::{
    EventType, MemorySourceType, MemoryTag, MemoryWriteRequest,
};
use skyforge_core::services::memory::{
    generate_metric_memory, metric_logged_event, MemoryCaps, MemoryService,
};
use skyforge_core::storage::kv::{DurableStore, SqliteStore};
use skyforge_core::utils::dates::days_ago_string;

fn open_service() -> MemoryService {
    let store: Arc<dyn DurableStore> =
        Arc::new(SqliteStore::open_in_memory().expect("in-memory store"));
    MemoryService::new(store)
}

fn manual_note(content: impl Into<String>) -> MemoryWriteRequest {
    MemoryWriteRequest::new(content, vec![MemoryTag::Ops], MemorySourceType::Manual, "Manual note")
}

// ============================================================================
// Bridge Writes
// ============================================================================

#[test]
fn test_metric_bridge_write_round_trip() {
    let service = open_service();
    let record = MetricRecord::new("p1", days_ago_string(0)).with_counts(25, 4, 1, 0, 1);

    service
        .write_memory_and_events(
            "p1",
            &[generate_metric_memory(&record, "Acme Fitness")],
            &[metric_logged_event(&record)],
        )
        .unwrap();

    let chunks = service.project_chunks("p1").unwrap();
    assert_eq!(chunks.len(), 1);
    assert!(chunks[0].content.starts_with("Metrics logged for Acme Fitness"));
    assert_eq!(chunks[0].tags, vec![MemoryTag::Kpi]);
    assert_eq!(chunks[0].source_type, MemorySourceType::MetricLog);

    let events = service.project_events("p1").unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, EventType::MetricLogged);
    assert_eq!(events[0].metadata.get("views").and_then(|v| v.as_u64()), Some(25));
}

// ============================================================================
// Retrieval and Formatting
// ============================================================================

#[test]
fn test_retrieval_ranks_matching_content_first() {
    let service = open_service();
    let writes = vec![
        MemoryWriteRequest::new(
            "Decided to raise pricing to $250 per month",
            vec![MemoryTag::Pricing, MemoryTag::Decision],
            MemorySourceType::Decision,
            "Pricing decision",
        ),
        MemoryWriteRequest::new(
            "Posted a new reel about morning workouts",
            vec![MemoryTag::Creative],
            MemorySourceType::AdvisorResponse,
            "Content activity",
        ),
    ];
    service.append_chunks("p1", &writes).unwrap();

    let result = service.retrieve("p1", "should we change pricing again?").unwrap();

    assert_eq!(result.chunks.len(), 2);
    assert!(result.chunks[0].content.contains("pricing"));
}

#[test]
fn test_formatted_context_contains_sections() {
    let service = open_service();
    let record = MetricRecord::new("p1", days_ago_string(0)).with_counts(25, 4, 1, 0, 1);
    service
        .write_memory_and_events(
            "p1",
            &[generate_metric_memory(&record, "Acme Fitness")],
            &[metric_logged_event(&record)],
        )
        .unwrap();

    let context = service.formatted_context("p1", "how are my views trending?").unwrap();

    assert!(context.contains("=== WORKSPACE MEMORY ==="));
    assert!(context.contains("--- Relevant Context ---"));
    assert!(context.contains("--- Recent Events ---"));
    assert!(context.contains("metric_logged"));
}

#[test]
fn test_empty_project_formats_to_empty_string() {
    let service = open_service();
    let context = service.formatted_context("nobody", "anything at all").unwrap();
    assert_eq!(context, "");
}

// ============================================================================
// Caps and Clearing
// ============================================================================

#[test]
fn test_chunk_cap_evicts_oldest_first() {
    let store: Arc<dyn DurableStore> =
        Arc::new(SqliteStore::open_in_memory().expect("in-memory store"));
    let service = MemoryService::new(store).with_caps(MemoryCaps {
        max_chunks: 2,
        max_events: 10,
        max_content_chars: 500,
    });

    for label in ["first", "second", "third"] {
        service
            .append_chunks("p1", &[manual_note(format!("{label} note"))])
            .unwrap();
    }

    let chunks = service.project_chunks("p1").unwrap();
    assert_eq!(chunks.len(), 2);
    assert!(chunks.iter().all(|chunk| chunk.content != "first note"));
}

#[test]
fn test_clear_project_memory_leaves_other_projects() {
    let service = open_service();
    service.append_chunks("p1", &[manual_note("p1 fact")]).unwrap();
    service.append_chunks("p2", &[manual_note("p2 fact")]).unwrap();

    service.clear_project_memory("p1").unwrap();

    assert!(service.project_chunks("p1").unwrap().is_empty());
    assert_eq!(service.project_chunks("p2").unwrap().len(), 1);
}

#[test]
fn test_project_stats_counts() {
    let service = open_service();
    service
        .append_chunks("p1", &[manual_note("first fact"), manual_note("second fact")])
        .unwrap();
    let record = MetricRecord::new("p1", days_ago_string(0));
    service.log_events("p1", &[metric_logged_event(&record)]).unwrap();

    let stats = service.project_stats("p1").unwrap();

    assert_eq!(stats.total_chunks, 2);
    assert_eq!(stats.total_events, 1);
    assert_eq!(stats.recent_chunks, 2);
    assert_eq!(stats.top_tags[0].tag, MemoryTag::Ops);
    assert_eq!(stats.top_tags[0].count, 2);
}
