//! Workspace Memory Data Models
//!
//! Chunks, event log entries and the write/retrieval request shapes for
//! the tag-based memory subsystem.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::error::{AppError, AppResult};

/// Flat metadata map attached to event log entries.
///
/// Values are restricted to JSON primitives (string, number, bool,
/// null) by convention; the engine never nests objects here.
pub type EventMetadata = serde_json::Map<String, serde_json::Value>;

// ============================================================================
// Closed vocabularies
// ============================================================================

/// Fixed 16-tag vocabulary for classifying memory content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryTag {
    Brand,
    Offer,
    Pricing,
    Audience,
    Objection,
    Creative,
    Channel,
    Ops,
    Kpi,
    Milestone,
    Decision,
    Approval,
    Sales,
    Web,
    Seo,
    Gmb,
}

impl MemoryTag {
    /// Every tag in declaration order (the order keyword matching
    /// resolves in)
    pub const ALL: [MemoryTag; 16] = [
        Self::Brand,
        Self::Offer,
        Self::Pricing,
        Self::Audience,
        Self::Objection,
        Self::Creative,
        Self::Channel,
        Self::Ops,
        Self::Kpi,
        Self::Milestone,
        Self::Decision,
        Self::Approval,
        Self::Sales,
        Self::Web,
        Self::Seo,
        Self::Gmb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Offer => "offer",
            Self::Pricing => "pricing",
            Self::Audience => "audience",
            Self::Objection => "objection",
            Self::Creative => "creative",
            Self::Channel => "channel",
            Self::Ops => "ops",
            Self::Kpi => "kpi",
            Self::Milestone => "milestone",
            Self::Decision => "decision",
            Self::Approval => "approval",
            Self::Sales => "sales",
            Self::Web => "web",
            Self::Seo => "seo",
            Self::Gmb => "gmb",
        }
    }

    pub fn from_str(s: &str) -> AppResult<Self> {
        Self::ALL
            .iter()
            .find(|tag| tag.as_str() == s)
            .copied()
            .ok_or_else(|| AppError::validation(format!("unknown memory tag: {s}")))
    }
}

impl std::fmt::Display for MemoryTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a memory chunk came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemorySourceType {
    AdvisorResponse,
    UserMessage,
    MetricLog,
    AssetCreated,
    DirectiveCompleted,
    Decision,
    Approval,
    KpiChange,
    ProfileUpdate,
    Manual,
}

impl MemorySourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AdvisorResponse => "advisor_response",
            Self::UserMessage => "user_message",
            Self::MetricLog => "metric_log",
            Self::AssetCreated => "asset_created",
            Self::DirectiveCompleted => "directive_completed",
            Self::Decision => "decision",
            Self::Approval => "approval",
            Self::KpiChange => "kpi_change",
            Self::ProfileUpdate => "profile_update",
            Self::Manual => "manual",
        }
    }

    /// Structural sources always pass the memory admission filter;
    /// free-text sources must additionally match a significance phrase
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::MetricLog
                | Self::AssetCreated
                | Self::DirectiveCompleted
                | Self::Decision
                | Self::Approval
                | Self::ProfileUpdate
                | Self::Manual
        )
    }
}

impl std::fmt::Display for MemorySourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// App activity recorded in the event log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    DecisionMade,
    ApprovalGiven,
    AssetCreated,
    AssetUpdated,
    MetricLogged,
    KpiChanged,
    DirectiveCompleted,
    MilestoneHit,
    BottleneckChanged,
    ProjectCreated,
    ProjectUpdated,
    ReviewGenerated,
    FocusChanged,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DecisionMade => "decision_made",
            Self::ApprovalGiven => "approval_given",
            Self::AssetCreated => "asset_created",
            Self::AssetUpdated => "asset_updated",
            Self::MetricLogged => "metric_logged",
            Self::KpiChanged => "kpi_changed",
            Self::DirectiveCompleted => "directive_completed",
            Self::MilestoneHit => "milestone_hit",
            Self::BottleneckChanged => "bottleneck_changed",
            Self::ProjectCreated => "project_created",
            Self::ProjectUpdated => "project_updated",
            Self::ReviewGenerated => "review_generated",
            Self::FocusChanged => "focus_changed",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Stored entries
// ============================================================================

/// A short tagged fact retained for future prompt context.
///
/// Immutable once written; the store truncates content to 500 chars.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryChunk {
    pub id: String,
    pub project_id: String,
    pub content: String,
    /// 1-5 tags
    pub tags: Vec<MemoryTag>,
    pub source_type: MemorySourceType,
    /// Why this was worth remembering
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}

/// One entry in the append-only activity log
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLogEntry {
    pub id: String,
    pub project_id: String,
    pub event_type: EventType,
    pub metadata: EventMetadata,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Requests and results
// ============================================================================

/// A chunk before the store assigns its id and timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryWriteRequest {
    pub content: String,
    pub tags: Vec<MemoryTag>,
    pub source_type: MemorySourceType,
    pub reason: String,
}

impl MemoryWriteRequest {
    pub fn new(
        content: impl Into<String>,
        tags: Vec<MemoryTag>,
        source_type: MemorySourceType,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            tags,
            source_type,
            reason: reason.into(),
        }
    }
}

/// An event before the store assigns its id and timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLogRequest {
    pub event_type: EventType,
    pub metadata: EventMetadata,
}

impl EventLogRequest {
    pub fn new(event_type: EventType, metadata: EventMetadata) -> Self {
        Self {
            event_type,
            metadata,
        }
    }
}

/// Ranked chunks plus recent events for one query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryRetrievalResult {
    pub chunks: Vec<MemoryChunk>,
    pub recent_events: Vec<EventLogEntry>,
}

impl MemoryRetrievalResult {
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty() && self.recent_events.is_empty()
    }
}

/// Per-tag occurrence count inside one project's memory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCount {
    pub tag: MemoryTag,
    pub count: usize,
}

/// Summary of one project's memory footprint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMemoryStats {
    pub total_chunks: usize,
    pub total_events: usize,
    /// Chunks written in the last 30 days
    pub recent_chunks: usize,
    /// Up to 5 tags by descending count
    pub top_tags: Vec<TagCount>,
}
