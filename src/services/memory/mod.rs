//! Workspace Memory System
//!
//! Persistent cross-session memory for business context: short tagged
//! chunks, an append-only event log, and the retrieval layer that turns
//! both into advisor prompt context.
//!
//! ## Module Structure
//!
//! - `store` — `MemoryService` with capped, mutex-serialized writes
//! - `tagger` — keyword tag inference and the admission filter
//! - `retrieval` — relevance scoring and top-k selection
//! - `bridge` — app activity to memory/event request generators
//! - `formatting` — prompt context block rendering

pub mod bridge;
pub mod formatting;
pub mod retrieval;
pub mod store;
pub mod tagger;

pub use bridge::{
    bottleneck_changed_event, directive_completed_event, extract_advisor_memories,
    generate_asset_memory, generate_bottleneck_change_memory,
    generate_directive_completion_memory, generate_metric_memory, generate_project_update_memory,
    metric_logged_event,
};
pub use formatting::format_memory_for_prompt;
pub use retrieval::{retrieve_relevant_memory, score_relevance, RetrievalConfig};
pub use store::{MemoryCaps, MemoryService};
pub use tagger::{infer_tags, should_write_memory};
