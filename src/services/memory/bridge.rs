//! Memory Bridge
//!
//! Turns app activity (metric logs, asset creation, directive
//! completions, diagnosis changes, profile edits, advisor exchanges)
//! into memory write and event log requests. The content strings
//! produced here are read back verbatim by the prompt formatter, so
//! their wording is part of the product surface.

use serde_json::{json, Map};

use crate::models::business::{BottleneckCategory, MetricRecord};
use crate::models::memory::{
    EventLogRequest, EventType, MemorySourceType, MemoryTag, MemoryWriteRequest,
};
use crate::services::memory::tagger::{infer_tags, should_write_memory};

const ACTION_MARKERS: [&str; 7] = [
    "you should",
    "do this",
    "action:",
    "recommendation",
    "i suggest",
    "next step",
    "priority",
];

// ============================================================================
// Structured activity generators
// ============================================================================

/// Memory write for a metrics entry
pub fn generate_metric_memory(record: &MetricRecord, project_name: &str) -> MemoryWriteRequest {
    let mut parts = vec![
        format!("Metrics logged for {} on {}:", project_name, record.date),
        format!(
            "V:{} C:{} M:{} Ca:{} S:{}",
            record.views, record.clicks, record.messages, record.calls, record.sales
        ),
    ];
    if let Some(notes) = &record.notes {
        parts.push(format!("Notes: {notes}"));
    }

    MemoryWriteRequest::new(
        parts.join(" "),
        vec![MemoryTag::Kpi],
        MemorySourceType::MetricLog,
        "New metrics recorded",
    )
}

/// Memory write for a newly created asset or content item
pub fn generate_asset_memory(
    kind: &str,
    title: &str,
    status: &str,
    project_name: &str,
) -> MemoryWriteRequest {
    MemoryWriteRequest::new(
        format!("New {kind} asset created for {project_name}: \"{title}\". Status: {status}."),
        merge_tags(MemoryTag::Creative, infer_tags(title), 4),
        MemorySourceType::AssetCreated,
        "Revenue asset or content item created",
    )
}

/// Memory write for a completed daily directive
pub fn generate_directive_completion_memory(
    title: &str,
    mode_tag: &str,
    project_name: &str,
    streak: u32,
) -> MemoryWriteRequest {
    MemoryWriteRequest::new(
        format!(
            "Directive completed for {project_name}: \"{title}\" ({mode_tag}). Current streak: {streak} days."
        ),
        merge_tags(MemoryTag::Milestone, infer_tags(title), 4),
        MemorySourceType::DirectiveCompleted,
        "Daily directive completed",
    )
}

/// Memory write for a bottleneck diagnosis change
pub fn generate_bottleneck_change_memory(
    old: Option<BottleneckCategory>,
    new: BottleneckCategory,
    confidence: u8,
    project_name: &str,
) -> MemoryWriteRequest {
    let lead = match old {
        Some(previous) => format!("Bottleneck shifted from {} to {}", previous, new),
        None => format!("Initial bottleneck identified as {new}"),
    };

    MemoryWriteRequest::new(
        format!("{lead} for {project_name} ({confidence}% confidence)."),
        vec![MemoryTag::Kpi, MemoryTag::Decision],
        MemorySourceType::KpiChange,
        "Bottleneck diagnosis changed",
    )
}

/// Memory write for a business profile edit
pub fn generate_project_update_memory(
    project_name: &str,
    updated_fields: &[&str],
) -> MemoryWriteRequest {
    MemoryWriteRequest::new(
        format!(
            "Project \"{}\" updated. Fields changed: {}.",
            project_name,
            updated_fields.join(", ")
        ),
        merge_tags(
            MemoryTag::Decision,
            infer_tags(&updated_fields.join(" ")),
            4,
        ),
        MemorySourceType::ProfileUpdate,
        "Business profile updated",
    )
}

fn merge_tags(lead: MemoryTag, inferred: Vec<MemoryTag>, cap: usize) -> Vec<MemoryTag> {
    let mut tags = vec![lead];
    for tag in inferred {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags.truncate(cap);
    tags
}

// ============================================================================
// Event log builders
// ============================================================================

/// Event for a metrics entry
pub fn metric_logged_event(record: &MetricRecord) -> EventLogRequest {
    let mut metadata = Map::new();
    metadata.insert("views".to_string(), json!(record.views));
    metadata.insert("clicks".to_string(), json!(record.clicks));
    metadata.insert("messages".to_string(), json!(record.messages));
    metadata.insert("calls".to_string(), json!(record.calls));
    metadata.insert("sales".to_string(), json!(record.sales));
    metadata.insert("date".to_string(), json!(record.date));
    EventLogRequest::new(EventType::MetricLogged, metadata)
}

/// Event for a completed directive
pub fn directive_completed_event(title: &str, mode_tag: &str, streak: u32) -> EventLogRequest {
    let mut metadata = Map::new();
    metadata.insert("title".to_string(), json!(title));
    metadata.insert("modeTag".to_string(), json!(mode_tag));
    metadata.insert("streak".to_string(), json!(streak));
    EventLogRequest::new(EventType::DirectiveCompleted, metadata)
}

/// Event for a bottleneck diagnosis change
pub fn bottleneck_changed_event(
    old: Option<BottleneckCategory>,
    new: BottleneckCategory,
    confidence: u8,
) -> EventLogRequest {
    let mut metadata = Map::new();
    let from = match old {
        Some(previous) => previous.as_str(),
        None => "none",
    };
    metadata.insert("from".to_string(), json!(from));
    metadata.insert("to".to_string(), json!(new.as_str()));
    metadata.insert("confidence".to_string(), json!(confidence));
    EventLogRequest::new(EventType::BottleneckChanged, metadata)
}

// ============================================================================
// Advisor conversation extraction
// ============================================================================

/// Distill an advisor exchange into at most 5 memory writes.
///
/// Nothing is written unless either side of the exchange passes the
/// significance filter. Action-bearing sentences from the advisor side
/// (first 3, joined) become one chunk; a qualifying user message
/// becomes another.
pub fn extract_advisor_memories(
    advisor_response: &str,
    user_message: &str,
    project_name: &str,
) -> Vec<MemoryWriteRequest> {
    let mut writes = Vec::new();

    let user_qualifies = should_write_memory(user_message, MemorySourceType::UserMessage);
    let response_qualifies =
        should_write_memory(advisor_response, MemorySourceType::AdvisorResponse);
    if !user_qualifies && !response_qualifies {
        return writes;
    }

    let sentences: Vec<&str> = advisor_response
        .split(['.', '!', '?', '\n'])
        .map(str::trim)
        .filter(|sentence| sentence.len() > 15)
        .collect();

    let action_sentences: Vec<&str> = sentences
        .into_iter()
        .filter(|sentence| {
            let lower = sentence.to_lowercase();
            ACTION_MARKERS.iter().any(|marker| lower.contains(marker))
        })
        .collect();

    if !action_sentences.is_empty() {
        let joined = action_sentences
            .iter()
            .take(3)
            .copied()
            .collect::<Vec<_>>()
            .join(". ");
        let summary = truncate_with_ellipsis(&joined, 400);
        writes.push(MemoryWriteRequest::new(
            format!("Advisor recommendation for {project_name}: {summary}"),
            infer_tags(&summary),
            MemorySourceType::AdvisorResponse,
            "Key recommendation from advisor session",
        ));
    }

    if user_qualifies {
        let summary = truncate_with_ellipsis(user_message, 300);
        writes.push(MemoryWriteRequest::new(
            format!("User reported for {project_name}: {summary}"),
            infer_tags(&summary),
            MemorySourceType::UserMessage,
            "User provided significant context or decision",
        ));
    }

    writes.truncate(5);
    writes
}

/// Cut to `max_chars` total, spending the last three on "..."
fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars - 3).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
