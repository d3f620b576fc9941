//! Memory Retrieval and Ranking
//!
//! Selects the memory context that accompanies an advisor prompt.
//!
//! ## Retrieval Flow
//!
//! 1. Infer tags for the query text (reuse the keyword tagger)
//! 2. Score every chunk belonging to the project
//! 3. Sort by score descending (ties keep stored order), take top_k
//! 4. Collect events within the recency window, newest first, capped

use chrono::{Duration, Utc};

use crate::models::memory::{EventLogEntry, MemoryChunk, MemoryRetrievalResult, MemoryTag};
use crate::services::memory::tagger::infer_tags;
use crate::utils::dates::hours_since;

// ============================================================================
// Configuration
// ============================================================================

/// Tuning knobs for context retrieval
#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    /// Number of top-scored chunks to return
    pub top_k: usize,
    /// Events older than this many days are ignored
    pub recent_event_days: i64,
    /// Cap on the recent-events list
    pub max_events: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            recent_event_days: 30,
            max_events: 8,
        }
    }
}

impl RetrievalConfig {
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}

// ============================================================================
// Scoring
// ============================================================================

/// Relevance scoring formula:
///
///   score = 3 * tag_overlap
///         + 1 * word_hits
///         + recency_bonus
///
/// Where:
///   tag_overlap   = |query_tags ∩ chunk_tags|
///   word_hits     = query words longer than 3 chars found in the content
///   recency_bonus = 2 if the chunk is under 24h old, 1 if under 7 days
pub fn score_relevance(chunk: &MemoryChunk, query_tags: &[MemoryTag], query_text: &str) -> u32 {
    let mut score = 0u32;

    let tag_overlap = chunk
        .tags
        .iter()
        .filter(|tag| query_tags.contains(tag))
        .count() as u32;
    score += tag_overlap * 3;

    let content_lower = chunk.content.to_lowercase();
    let word_hits = query_text
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.len() > 3 && content_lower.contains(*word))
        .count() as u32;
    score += word_hits;

    let age_hours = hours_since(&chunk.timestamp);
    if age_hours < 24 {
        score += 2;
    } else if age_hours < 168 {
        score += 1;
    }

    score
}

// ============================================================================
// Selection
// ============================================================================

/// Pick the most relevant chunks and recent events for a project.
///
/// Chunks are scored against the query and the top `top_k` kept; the
/// sort is stable so equal scores keep their stored (oldest-first)
/// order. Events within the recency window come back newest first,
/// capped at `max_events`.
pub fn retrieve_relevant_memory(
    chunks: &[MemoryChunk],
    events: &[EventLogEntry],
    project_id: &str,
    query_text: &str,
    config: &RetrievalConfig,
) -> MemoryRetrievalResult {
    let query_tags = infer_tags(query_text);

    let mut scored: Vec<(u32, &MemoryChunk)> = chunks
        .iter()
        .filter(|chunk| chunk.project_id == project_id)
        .map(|chunk| (score_relevance(chunk, &query_tags, query_text), chunk))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let top_chunks: Vec<MemoryChunk> = scored
        .into_iter()
        .take(config.top_k)
        .map(|(_, chunk)| chunk.clone())
        .collect();

    let cutoff = Utc::now() - Duration::days(config.recent_event_days);
    let mut recent_events: Vec<EventLogEntry> = events
        .iter()
        .filter(|event| event.project_id == project_id && event.timestamp >= cutoff)
        .cloned()
        .collect();
    recent_events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    recent_events.truncate(config.max_events);

    MemoryRetrievalResult {
        chunks: top_chunks,
        recent_events,
    }
}

// ============================================================================
// Tests
// ============================================================================
