//! Directive Extraction
//!
//! Parses a freeform advisor reply into a storable directive. Prefers
//! labelled "Task:"/"Action:"/"Do this:" and "Why:"/"Reason:" lines and
//! falls back to the reply's first sentence when no label is present.

use std::sync::OnceLock;

use chrono::Utc;
use regex::Regex;
use uuid::Uuid;

use crate::models::business::AdvisorDirective;

const DEFAULT_REASON: &str = "Based on Skyforge analysis of your current situation.";
const DEFAULT_ESTIMATED_TIME: &str = "20-30 minutes";

/// Label prefix that marks a line as the directive title.
fn title_label_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)^(task:|action:|do this:)").unwrap())
}

/// Label prefix that marks a line as the directive reason.
fn reason_label_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)^(why:|reason:)").unwrap())
}

/// Extract a directive from an advisor reply, if one can be found.
///
/// Scans line by line; a later labelled line overwrites an earlier one.
/// A line that matches both label groups only sets the title. The label
/// prefix is stripped only when it opens the line, so a mid-line label
/// keeps the whole line as the title. With no labelled title, the first
/// sentence is used when it runs under 100 characters; otherwise there
/// is no directive to save.
pub fn extract_directive_from_response(text: &str) -> Option<AdvisorDirective> {
    let mut title = String::new();
    let mut reason = String::new();

    for raw_line in text.split('\n') {
        let line = raw_line.trim();
        let lowered = line.to_lowercase();
        if lowered.contains("task:") || lowered.contains("action:") || lowered.contains("do this:")
        {
            title = title_label_pattern().replace(line, "").trim().to_string();
        } else if lowered.contains("why:") || lowered.contains("reason:") {
            reason = reason_label_pattern().replace(line, "").trim().to_string();
        }
    }

    if title.is_empty() {
        let first_sentence = text.split(['.', '!', '?']).next().unwrap_or("");
        if first_sentence.chars().count() < 100 {
            title = first_sentence.trim().to_string();
        }
    }

    if title.is_empty() {
        return None;
    }

    let mut description = truncate_chars(text, 200).trim().to_string();
    if text.chars().count() > 200 {
        description.push_str("...");
    }

    Some(AdvisorDirective {
        id: Uuid::new_v4().to_string(),
        title: truncate_chars(&title, 100),
        description,
        reason: if reason.is_empty() {
            DEFAULT_REASON.to_string()
        } else {
            reason
        },
        estimated_time: DEFAULT_ESTIMATED_TIME.to_string(),
        created_at: Utc::now(),
    })
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

// ============================================================================
// Tests
// ============================================================================
