//! Execution Statistics
//!
//! Streak, weekly completion, consistency and revenue-per-directive,
//! derived from the completion log and metric history. Multiple
//! completions on one calendar day count once everywhere.

use std::collections::HashSet;

use chrono::Utc;

use crate::models::business::{DirectiveCompletionLog, ExecutionStats, MetricRecord};
use crate::utils::dates::{day_diff, day_string, days_ago_string, today_string};

/// Consecutive completion days ending today or yesterday.
///
/// A gap of exactly one calendar day between adjacent distinct days
/// continues the chain; anything else stops it.
pub fn compute_streak(logs: &[DirectiveCompletionLog], project_id: &str) -> u32 {
    let mut unique_days: Vec<String> = logs
        .iter()
        .filter(|log| log.project_id == project_id)
        .map(|log| day_string(&log.completed_at))
        .collect();

    unique_days.sort_unstable_by(|a, b| b.cmp(a));
    unique_days.dedup();

    let latest = match unique_days.first() {
        Some(day) => day,
        None => return 0,
    };

    if *latest != today_string() && *latest != days_ago_string(1) {
        return 0;
    }

    let mut streak = 1;
    for pair in unique_days.windows(2) {
        if day_diff(&pair[0], &pair[1]) == Some(1) {
            streak += 1;
        } else {
            break;
        }
    }

    streak
}

/// Percent of the last 7 days with at least one completion
pub fn compute_weekly_completion_pct(logs: &[DirectiveCompletionLog], project_id: &str) -> u8 {
    distinct_day_pct(logs, project_id, 7)
}

/// Percent of the last 14 days with at least one completion
pub fn compute_consistency_score(logs: &[DirectiveCompletionLog], project_id: &str) -> u8 {
    distinct_day_pct(logs, project_id, 14)
}

fn distinct_day_pct(logs: &[DirectiveCompletionLog], project_id: &str, window_days: i64) -> u8 {
    let cutoff = days_ago_string(window_days);
    let days: HashSet<String> = logs
        .iter()
        .filter(|log| log.project_id == project_id)
        .map(|log| day_string(&log.completed_at))
        .filter(|day| day.as_str() >= cutoff.as_str())
        .collect();

    let pct = (days.len() as f64 / window_days as f64 * 100.0).round();
    (pct as u8).min(100)
}

/// Total sales divided by completion count, rounded to 2 decimals.
///
/// None when the project has no completions, or when its metric history
/// carries zero total sales.
pub fn compute_revenue_per_directive(
    metrics: &[MetricRecord],
    logs: &[DirectiveCompletionLog],
    project_id: &str,
) -> Option<f64> {
    let completions = logs
        .iter()
        .filter(|log| log.project_id == project_id)
        .count();
    if completions == 0 {
        return None;
    }

    let total_sales: u64 = metrics
        .iter()
        .filter(|record| record.project_id == project_id)
        .map(|record| u64::from(record.sales))
        .sum();
    if total_sales == 0 {
        return None;
    }

    Some((total_sales as f64 / completions as f64 * 100.0).round() / 100.0)
}

/// Bundle all four execution statistics for a project
pub fn compute_execution_stats(
    metrics: &[MetricRecord],
    logs: &[DirectiveCompletionLog],
    project_id: &str,
) -> ExecutionStats {
    ExecutionStats {
        streak: compute_streak(logs, project_id),
        weekly_completion_pct: compute_weekly_completion_pct(logs, project_id),
        consistency_score: compute_consistency_score(logs, project_id),
        revenue_per_directive: compute_revenue_per_directive(metrics, logs, project_id),
        last_updated: Utc::now(),
    }
}
