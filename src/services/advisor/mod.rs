//! Business Advisor
//!
//! Conversation plumbing for the advisor: system prompt assembly from the
//! business profile and metric history, the pluggable chat client boundary,
//! and directive extraction from freeform replies. Callers append the
//! formatted workspace memory block to the prompt when it is non-empty.
//!
//! ## Module Structure
//!
//! - `client` — chat message types and the `AdvisorClient` trait
//! - `prompt` — system prompt rendering from profile and recent metrics
//! - `extraction` — parse advisor replies into storable directives

pub mod client;
pub mod extraction;
pub mod prompt;

pub use client::{AdvisorClient, ChatMessage, ChatRole};
pub use extraction::extract_directive_from_response;
pub use prompt::build_system_prompt;
