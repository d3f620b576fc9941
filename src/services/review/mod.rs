//! Weekly Review
//!
//! Week-over-week snapshot generation and its persistence layer.
//!
//! ## Module Structure
//!
//! - `generator` — pure review synthesis from metric/completion history
//! - `service` — persistence plus review_generated event emission

pub mod generator;
pub mod service;

pub use generator::generate_weekly_review;
pub use service::ReviewService;
