//! Skyforge Core - Business Engine Library
//!
//! This library provides the backend functionality for the Skyforge business
//! advisor. It includes:
//! - Metric aggregation and bottleneck diagnosis
//! - Execution statistics (streaks, consistency, revenue per directive)
//! - Workspace memory with tag inference and relevance-ranked retrieval
//! - Weekly review generation
//! - Advisor prompt assembly and directive extraction
//! - Storage layer (pooled SQLite key-value collections)

pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export commonly used items
pub use services::advisor::{
    build_system_prompt, extract_directive_from_response, AdvisorClient, ChatMessage, ChatRole,
};
pub use services::execution::{compute_execution_stats, diagnose_bottleneck};
pub use services::memory::{MemoryService, RetrievalConfig};
pub use services::review::ReviewService;
pub use storage::kv::{DurableStore, SqliteStore};
pub use storage::repository::CollectionStore;
pub use utils::error::{AppError, AppResult};
