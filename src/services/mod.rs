//! Services
//!
//! Business logic for the engine. Services operate on the storage layer's
//! typed collections and are called by the embedding application.

pub mod advisor;
pub mod execution;
pub mod memory;
pub mod review;

pub use advisor::{build_system_prompt, extract_directive_from_response, AdvisorClient};
pub use execution::{aggregate_period, compute_execution_stats, diagnose_bottleneck};
pub use memory::{MemoryService, RetrievalConfig};
pub use review::{generate_weekly_review, ReviewService};
