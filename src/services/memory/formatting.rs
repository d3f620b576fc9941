//! Memory Prompt Formatting
//!
//! Renders a retrieval result as the plain-text context block injected
//! into advisor prompts. The section markers and line shapes are part
//! of the prompt contract; change them and the advisor loses its
//! memory mid-conversation.

use serde_json::Value;

use crate::models::memory::MemoryRetrievalResult;
use crate::utils::dates::day_string;

/// Render ranked chunks and recent events as a prompt context block.
///
/// Returns the empty string when there is nothing to show, so callers
/// can append the result unconditionally.
pub fn format_memory_for_prompt(result: &MemoryRetrievalResult) -> String {
    if result.is_empty() {
        return String::new();
    }

    let mut lines: Vec<String> = vec!["=== WORKSPACE MEMORY ===".to_string()];

    if !result.chunks.is_empty() {
        lines.push("\n--- Relevant Context ---".to_string());
        for (index, chunk) in result.chunks.iter().enumerate() {
            let tags = chunk
                .tags
                .iter()
                .map(|tag| tag.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("[{}] ({}) {}", index + 1, tags, chunk.content));
        }
    }

    if !result.recent_events.is_empty() {
        lines.push("\n--- Recent Events ---".to_string());
        for event in &result.recent_events {
            let date = day_string(&event.timestamp);
            let metadata = event
                .metadata
                .iter()
                .filter(|(_, value)| !value.is_null())
                .map(|(key, value)| format!("{key}={}", render_value(value)))
                .collect::<Vec<_>>()
                .join(", ");
            if metadata.is_empty() {
                lines.push(format!("- [{date}] {}", event.event_type));
            } else {
                lines.push(format!("- [{date}] {}: {metadata}", event.event_type));
            }
        }
    }

    lines.push(
        "\nUse this context to inform your responses. Reference specific facts when relevant."
            .to_string(),
    );
    lines.join("\n")
}

/// Strings render bare (no JSON quotes); everything else uses its JSON
/// form
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
