//! Advisor Conversation Integration Tests
//!
//! Drives a full advisor exchange: system prompt assembly with workspace
//! memory context, a scripted model reply, directive extraction and
//! memory capture of the exchange. No real model host is involved.

use std::sync::Arc;

use chrono::Utc;

use skyforge_core::models::business::{
    FocusMode, MetricRecord, PrimaryProblem, Project, ProjectStatus,
};
use skyforge_core::models::memory::{MemorySourceType, MemoryTag, MemoryWriteRequest};
use skyforge_core::services::advisor::{
    build_system_prompt, extract_directive_from_response, AdvisorClient, ChatMessage,
};
use skyforge_core::services::memory::{extract_advisor_memories, MemoryService};
use skyforge_core::storage::kv::{DurableStore, SqliteStore};
use skyforge_core::utils::dates::days_ago_string;
use skyforge_core::utils::error::AppResult;

/// Canned-reply double standing in for the model host
struct ScriptedAdvisor {
    reply: &'static str,
}

impl AdvisorClient for ScriptedAdvisor {
    fn generate(&self, _prompt: &str) -> AppResult<String> {
        Ok(self.reply.to_string())
    }

    fn send_message(&self, _messages: &[ChatMessage]) -> AppResult<String> {
        Ok(self.reply.to_string())
    }
}

fn open_memory() -> Arc<MemoryService> {
    let store: Arc<dyn DurableStore> =
        Arc::new(SqliteStore::open_in_memory().expect("in-memory store"));
    Arc::new(MemoryService::new(store))
}

fn sample_project() -> Project {
    Project {
        id: "p1".to_string(),
        name: "Acme Fitness".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
        status: ProjectStatus::Active,
        business_type: "Personal training".to_string(),
        target_customer: "Busy professionals".to_string(),
        is_local: true,
        location: Some("Austin".to_string()),
        revenue_goal: "$10k/mo".to_string(),
        available_daily_time: "2 hours".to_string(),
        preferred_contact_method: None,
        core_offer_summary: "12-week coaching program".to_string(),
        pricing: "$200/mo".to_string(),
        bottleneck: PrimaryProblem::Sales,
        focus_mode: FocusMode::Autopilot,
        manual_focus_area: None,
        last_analysis_summary: None,
        metrics_summary: None,
        daily_directive: None,
        advisor_directive: None,
        marketing_preference: None,
        platforms: None,
    }
}

#[test]
fn test_full_exchange_stores_directive_and_memory() {
    let memory = open_memory();
    let project = sample_project();
    let metrics = vec![
        MetricRecord::new("p1", days_ago_string(1)).with_counts(80, 12, 1, 0, 0),
        MetricRecord::new("p1", days_ago_string(2)).with_counts(60, 9, 0, 0, 0),
    ];

    // context surviving from an earlier session
    memory
        .append_chunks(
            "p1",
            &[MemoryWriteRequest::new(
                "Decided to focus on corporate clients",
                vec![MemoryTag::Decision, MemoryTag::Audience],
                MemorySourceType::Decision,
                "Positioning decision",
            )],
        )
        .unwrap();

    let user_message = "Clicks are fine but nobody buys";
    let system_prompt = build_system_prompt(Some(&project), &metrics);
    let context = memory.formatted_context("p1", user_message).unwrap();
    let full_prompt = if context.is_empty() {
        system_prompt
    } else {
        format!("{system_prompt}\n\n{context}")
    };

    assert!(full_prompt.contains("=== BUSINESS CONTEXT ==="));
    assert!(full_prompt.contains("=== WORKSPACE MEMORY ==="));
    assert!(full_prompt.contains("corporate clients"));

    // "Remember" is a decision phrase: the reply alone clears the memory
    // admission filter even though the user message does not
    let client = ScriptedAdvisor {
        reply: "DIAGNOSIS: interest without purchases.\nAction: Call your last ten warm leads today\nWhy: twelve clicks produced zero sales this week\nRemember this pattern when reviewing metrics.",
    };
    let messages = vec![ChatMessage::system(full_prompt), ChatMessage::user(user_message)];
    let reply = client.send_message(&messages).unwrap();

    let directive = extract_directive_from_response(&reply).expect("directive parsed");
    assert_eq!(directive.title, "Call your last ten warm leads today");
    assert_eq!(directive.reason, "twelve clicks produced zero sales this week");

    let writes = extract_advisor_memories(&reply, user_message, "Acme Fitness");
    assert_eq!(writes.len(), 1);
    memory.append_chunks("p1", &writes).unwrap();

    let chunks = memory.project_chunks("p1").unwrap();
    assert!(chunks
        .iter()
        .any(|chunk| chunk.content.starts_with("Advisor recommendation for Acme Fitness:")));
}

#[test]
fn test_low_signal_exchange_writes_nothing() {
    let memory = open_memory();
    let project = sample_project();

    let system_prompt = build_system_prompt(Some(&project), &[]);
    let context = memory.formatted_context("p1", "quick question").unwrap();
    assert_eq!(context, "");
    assert!(!system_prompt.contains("=== WORKSPACE MEMORY ==="));

    let client = ScriptedAdvisor {
        reply: "Focus on referrals this week. Ask every happy client for one intro.",
    };
    let reply = client
        .send_message(&[ChatMessage::system(system_prompt), ChatMessage::user("quick question")])
        .unwrap();

    // the first sentence still becomes a directive
    let directive = extract_directive_from_response(&reply).expect("fallback directive");
    assert_eq!(directive.title, "Focus on referrals this week");

    // but an exchange without significance markers leaves no memory
    let writes = extract_advisor_memories(&reply, "quick question", "Acme Fitness");
    assert!(writes.is_empty());
    assert!(memory.project_chunks("p1").unwrap().is_empty());
}

#[test]
fn test_single_shot_generation_path() {
    let client = ScriptedAdvisor {
        reply: "Task: Publish one client story\nWhy: social proof is thin",
    };

    let reply = client.generate("standalone analysis prompt").unwrap();
    let directive = extract_directive_from_response(&reply).expect("directive parsed");

    assert_eq!(directive.title, "Publish one client story");
    assert_eq!(directive.reason, "social proof is thin");
    assert_eq!(directive.estimated_time, "20-30 minutes");
}
