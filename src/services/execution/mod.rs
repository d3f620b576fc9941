//! Execution Engine
//!
//! Window aggregation, bottleneck diagnosis and execution statistics.
//! Everything here is a pure function over in-memory collections.

pub mod aggregation;
pub mod diagnosis;
pub mod stats;

pub use aggregation::aggregate_period;
pub use diagnosis::diagnose_bottleneck;
pub use stats::{
    compute_consistency_score, compute_execution_stats, compute_revenue_per_directive,
    compute_streak, compute_weekly_completion_pct,
};
