//! Workspace Memory Store
//!
//! Append-only store for memory chunks and event log entries, kept in
//! the JSON collections. Every write is a load-modify-save cycle over
//! the whole collection, so writes are serialized through a mutex to
//! keep concurrent callers from clobbering each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::models::memory::{
    EventLogEntry, EventLogRequest, MemoryChunk, MemoryRetrievalResult, MemoryTag,
    MemoryWriteRequest, ProjectMemoryStats, TagCount,
};
use crate::services::memory::formatting::format_memory_for_prompt;
use crate::services::memory::retrieval::{retrieve_relevant_memory, RetrievalConfig};
use crate::storage::kv::DurableStore;
use crate::storage::repository::{keys, CollectionStore};
use crate::utils::error::{AppError, AppResult};

// ============================================================================
// Configuration
// ============================================================================

/// Growth bounds for the memory collections
#[derive(Debug, Clone)]
pub struct MemoryCaps {
    /// Chunks kept across all projects; the oldest are evicted beyond this
    pub max_chunks: usize,
    /// Event log entries kept across all projects
    pub max_events: usize,
    /// Chunk content is truncated to this many characters on write
    pub max_content_chars: usize,
}

impl Default for MemoryCaps {
    fn default() -> Self {
        Self {
            max_chunks: 500,
            max_events: 1000,
            max_content_chars: 500,
        }
    }
}

// ============================================================================
// MemoryService
// ============================================================================

/// Store for memory chunks and the event log
pub struct MemoryService {
    collections: CollectionStore,
    caps: MemoryCaps,
    retrieval: RetrievalConfig,
    write_lock: Mutex<()>,
}

impl MemoryService {
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        Self::with_collections(CollectionStore::new(store))
    }

    pub fn with_collections(collections: CollectionStore) -> Self {
        Self {
            collections,
            caps: MemoryCaps::default(),
            retrieval: RetrievalConfig::default(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_caps(mut self, caps: MemoryCaps) -> Self {
        self.caps = caps;
        self
    }

    pub fn with_retrieval_config(mut self, config: RetrievalConfig) -> Self {
        self.retrieval = config;
        self
    }

    fn write_guard(&self) -> AppResult<std::sync::MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| AppError::internal("memory write lock poisoned"))
    }

    // ========================================================================
    // Write Operations
    // ========================================================================

    /// Append chunks for a project, stamping ids and timestamps.
    ///
    /// Content beyond the configured character limit is truncated, and
    /// once the global collection exceeds its cap the oldest chunks are
    /// evicted. Returns the chunks as stored.
    pub fn append_chunks(
        &self,
        project_id: &str,
        writes: &[MemoryWriteRequest],
    ) -> AppResult<Vec<MemoryChunk>> {
        if writes.is_empty() {
            return Ok(Vec::new());
        }
        let _guard = self.write_guard()?;

        let mut chunks: Vec<MemoryChunk> = self.collections.load_list(keys::MEMORY_CHUNKS)?;
        let now = Utc::now();
        let appended: Vec<MemoryChunk> = writes
            .iter()
            .map(|write| MemoryChunk {
                id: Uuid::new_v4().to_string(),
                project_id: project_id.to_string(),
                content: truncate_chars(&write.content, self.caps.max_content_chars),
                tags: write.tags.clone(),
                source_type: write.source_type,
                reason: write.reason.clone(),
                timestamp: now,
            })
            .collect();

        chunks.extend(appended.iter().cloned());
        if chunks.len() > self.caps.max_chunks {
            let excess = chunks.len() - self.caps.max_chunks;
            chunks.drain(..excess);
            tracing::debug!("Memory chunk cap reached, evicted {} oldest", excess);
        }
        self.collections.save_list(keys::MEMORY_CHUNKS, &chunks)?;

        tracing::debug!(
            "Wrote {} memory chunks for project {}",
            appended.len(),
            project_id
        );
        Ok(appended)
    }

    /// Append event log entries for a project, stamping ids and
    /// timestamps. The log is capped globally like the chunk store.
    pub fn log_events(
        &self,
        project_id: &str,
        requests: &[EventLogRequest],
    ) -> AppResult<Vec<EventLogEntry>> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }
        let _guard = self.write_guard()?;

        let mut events: Vec<EventLogEntry> = self.collections.load_list(keys::EVENT_LOG)?;
        let now = Utc::now();
        let appended: Vec<EventLogEntry> = requests
            .iter()
            .map(|request| EventLogEntry {
                id: Uuid::new_v4().to_string(),
                project_id: project_id.to_string(),
                event_type: request.event_type,
                metadata: request.metadata.clone(),
                timestamp: now,
            })
            .collect();

        events.extend(appended.iter().cloned());
        if events.len() > self.caps.max_events {
            let excess = events.len() - self.caps.max_events;
            events.drain(..excess);
        }
        self.collections.save_list(keys::EVENT_LOG, &events)?;

        Ok(appended)
    }

    /// Convenience for bridge call sites that produce both kinds of
    /// write at once. Empty slices are skipped.
    pub fn write_memory_and_events(
        &self,
        project_id: &str,
        writes: &[MemoryWriteRequest],
        events: &[EventLogRequest],
    ) -> AppResult<()> {
        self.append_chunks(project_id, writes)?;
        self.log_events(project_id, events)?;
        Ok(())
    }

    // ========================================================================
    // Read Operations
    // ========================================================================

    /// All chunks for a project, newest first
    pub fn project_chunks(&self, project_id: &str) -> AppResult<Vec<MemoryChunk>> {
        let chunks: Vec<MemoryChunk> = self.collections.load_list(keys::MEMORY_CHUNKS)?;
        let mut mine: Vec<MemoryChunk> = chunks
            .into_iter()
            .filter(|chunk| chunk.project_id == project_id)
            .collect();
        mine.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(mine)
    }

    /// All event log entries for a project, newest first
    pub fn project_events(&self, project_id: &str) -> AppResult<Vec<EventLogEntry>> {
        let events: Vec<EventLogEntry> = self.collections.load_list(keys::EVENT_LOG)?;
        let mut mine: Vec<EventLogEntry> = events
            .into_iter()
            .filter(|event| event.project_id == project_id)
            .collect();
        mine.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(mine)
    }

    /// Rank stored memory against a query and return the top chunks
    /// plus recent events
    pub fn retrieve(&self, project_id: &str, query_text: &str) -> AppResult<MemoryRetrievalResult> {
        let chunks: Vec<MemoryChunk> = self.collections.load_list(keys::MEMORY_CHUNKS)?;
        let events: Vec<EventLogEntry> = self.collections.load_list(keys::EVENT_LOG)?;
        Ok(retrieve_relevant_memory(
            &chunks,
            &events,
            project_id,
            query_text,
            &self.retrieval,
        ))
    }

    /// Retrieval result rendered as a prompt context block; empty
    /// string when nothing is stored
    pub fn formatted_context(&self, project_id: &str, query_text: &str) -> AppResult<String> {
        let result = self.retrieve(project_id, query_text)?;
        Ok(format_memory_for_prompt(&result))
    }

    /// Footprint summary for one project
    pub fn project_stats(&self, project_id: &str) -> AppResult<ProjectMemoryStats> {
        let chunks = self.project_chunks(project_id)?;
        let events = self.project_events(project_id)?;

        let cutoff = Utc::now() - Duration::days(30);
        let recent_chunks = chunks
            .iter()
            .filter(|chunk| chunk.timestamp >= cutoff)
            .count();

        let mut counts: HashMap<MemoryTag, usize> = HashMap::new();
        for chunk in &chunks {
            for tag in &chunk.tags {
                *counts.entry(*tag).or_insert(0) += 1;
            }
        }
        let mut top_tags: Vec<TagCount> = counts
            .into_iter()
            .map(|(tag, count)| TagCount { tag, count })
            .collect();
        // count descending, vocabulary order as the deterministic tie-break
        top_tags.sort_by_key(|tc| {
            let position = MemoryTag::ALL.iter().position(|t| *t == tc.tag);
            (std::cmp::Reverse(tc.count), position)
        });
        top_tags.truncate(5);

        Ok(ProjectMemoryStats {
            total_chunks: chunks.len(),
            total_events: events.len(),
            recent_chunks,
            top_tags,
        })
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Drop every chunk and event belonging to a project; other
    /// projects' entries are untouched
    pub fn clear_project_memory(&self, project_id: &str) -> AppResult<()> {
        let _guard = self.write_guard()?;

        let chunks: Vec<MemoryChunk> = self.collections.load_list(keys::MEMORY_CHUNKS)?;
        let kept_chunks: Vec<MemoryChunk> = chunks
            .into_iter()
            .filter(|chunk| chunk.project_id != project_id)
            .collect();
        self.collections.save_list(keys::MEMORY_CHUNKS, &kept_chunks)?;

        let events: Vec<EventLogEntry> = self.collections.load_list(keys::EVENT_LOG)?;
        let kept_events: Vec<EventLogEntry> = events
            .into_iter()
            .filter(|event| event.project_id != project_id)
            .collect();
        self.collections.save_list(keys::EVENT_LOG, &kept_events)?;

        tracing::debug!("Cleared memory for project {}", project_id);
        Ok(())
    }
}

/// Truncate on a character boundary; byte slicing would panic on
/// multi-byte content
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
