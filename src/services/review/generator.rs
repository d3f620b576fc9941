//! Weekly Review Generation
//!
//! Synthesizes the week-over-week snapshot: totals for the current and
//! prior 7-day windows, integer percent deltas, the bottleneck shift
//! and 1-3 next-week focus recommendations. Pure synthesis; persistence
//! belongs to the review service.

use chrono::Utc;
use uuid::Uuid;

use crate::models::business::{
    BottleneckCategory, DirectiveCompletionLog, MetricRecord, MetricsSnapshot,
};
use crate::models::review::{FocusArea, FocusRecommendation, MetricsDeltas, WeeklyReview};
use crate::services::execution::{
    aggregate_period, compute_consistency_score, compute_streak, diagnose_bottleneck,
};
use crate::utils::dates::{day_part, day_string, days_ago_string, today_string};

/// Build the weekly review for a project from full metric and
/// completion history.
///
/// The prior bottleneck is diagnosed over the history as it stood a
/// week ago (records newer than today-7 dropped), so the review can say
/// whether the limiting stage moved.
pub fn generate_weekly_review(
    all_metrics: &[MetricRecord],
    all_logs: &[DirectiveCompletionLog],
    project_id: &str,
) -> WeeklyReview {
    let project_metrics: Vec<MetricRecord> = all_metrics
        .iter()
        .filter(|record| record.project_id == project_id)
        .cloned()
        .collect();

    let totals = aggregate_period(&project_metrics, 0, 7);
    let prior = aggregate_period(&project_metrics, 7, 14);
    let deltas = MetricsDeltas {
        views: delta_pct(totals.views, prior.views),
        clicks: delta_pct(totals.clicks, prior.clicks),
        messages: delta_pct(totals.messages, prior.messages),
        calls: delta_pct(totals.calls, prior.calls),
        sales: delta_pct(totals.sales, prior.sales),
    };

    let week_ago = days_ago_string(7);
    let bottleneck_current = diagnose_bottleneck(&project_metrics).map(|d| d.category);
    let older_metrics: Vec<MetricRecord> = project_metrics
        .iter()
        .filter(|record| day_part(&record.date) <= week_ago.as_str())
        .cloned()
        .collect();
    let bottleneck_prior = diagnose_bottleneck(&older_metrics).map(|d| d.category);
    let bottleneck_changed = bottleneck_current != bottleneck_prior;

    let directives_completed = all_logs
        .iter()
        .filter(|log| {
            log.project_id == project_id && day_string(&log.completed_at) >= week_ago
        })
        .count();

    let next_week_focus = build_focus_recommendations(bottleneck_current, &totals, &prior);

    WeeklyReview {
        id: Uuid::new_v4().to_string(),
        project_id: project_id.to_string(),
        period_start: week_ago,
        period_end: today_string(),
        streak: compute_streak(all_logs, project_id),
        directives_completed,
        consistency_score: compute_consistency_score(all_logs, project_id),
        metrics_totals: totals,
        metrics_prior: prior,
        deltas,
        bottleneck_current,
        bottleneck_prior,
        bottleneck_changed,
        next_week_focus,
        created_at: Utc::now(),
    }
}

/// Integer percent change; 0 whenever the prior value is 0
fn delta_pct(current: u64, prior: u64) -> i64 {
    if prior == 0 {
        return 0;
    }
    ((current as f64 - prior as f64) / prior as f64 * 100.0).round() as i64
}

/// 1-3 recommendations: the bottleneck category sets the first, then
/// underperforming metrics fill remaining slots (one per focus area).
/// Without a diagnosis the single fallback asks for more data.
fn build_focus_recommendations(
    bottleneck: Option<BottleneckCategory>,
    totals: &MetricsSnapshot,
    prior: &MetricsSnapshot,
) -> Vec<FocusRecommendation> {
    let category = match bottleneck {
        Some(category) => category,
        None => {
            return vec![FocusRecommendation {
                title: "Build your audience".to_string(),
                reason: "Not enough data to diagnose. Keep showing up and logging metrics."
                    .to_string(),
                focus_area: FocusArea::AudienceBuilding,
            }]
        }
    };

    let mut focus = vec![primary_recommendation(category)];

    if totals.views < prior.views && prior.views > 0 {
        push_unique(
            &mut focus,
            FocusRecommendation {
                title: "Publish more this week".to_string(),
                reason: "Views fell versus last week. Fresh content wins attention back."
                    .to_string(),
                focus_area: FocusArea::Content,
            },
        );
    }
    if totals.sales < prior.sales && prior.sales > 0 {
        push_unique(
            &mut focus,
            FocusRecommendation {
                title: "Revisit the offer".to_string(),
                reason: "Sales fell versus last week. Check what changed for buyers.".to_string(),
                focus_area: FocusArea::Offer,
            },
        );
    }
    if totals.messages + totals.calls < 3 {
        push_unique(
            &mut focus,
            FocusRecommendation {
                title: "Start more conversations".to_string(),
                reason: "Fewer than three conversations this week. Outreach creates them."
                    .to_string(),
                focus_area: FocusArea::Outreach,
            },
        );
    }

    focus
}

fn primary_recommendation(category: BottleneckCategory) -> FocusRecommendation {
    let (title, reason, focus_area) = match category {
        BottleneckCategory::Traffic => (
            "Get seen by more people",
            "Traffic is the bottleneck. More eyeballs means more of everything downstream.",
            FocusArea::Leads,
        ),
        BottleneckCategory::Conversion => (
            "Turn viewers into clickers",
            "People see you but don't engage. Sharpen hooks and calls to action.",
            FocusArea::Conversion,
        ),
        BottleneckCategory::Pricing => (
            "Remove buying friction",
            "Interest is there but sales aren't closing. Revisit pricing and the offer.",
            FocusArea::Pricing,
        ),
        BottleneckCategory::FollowUp => (
            "Chase every warm lead",
            "Leads are leaking between click and conversation. Tighten follow-up.",
            FocusArea::Outreach,
        ),
        BottleneckCategory::Operations => (
            "Unblock delivery",
            "Demand held up but sales dropped. Look for a fulfillment bottleneck.",
            FocusArea::Fulfillment,
        ),
    };
    FocusRecommendation {
        title: title.to_string(),
        reason: reason.to_string(),
        focus_area,
    }
}

/// Keep at most 3 recommendations and at most one per focus area
fn push_unique(focus: &mut Vec<FocusRecommendation>, rec: FocusRecommendation) {
    if focus.len() < 3 && focus.iter().all(|existing| existing.focus_area != rec.focus_area) {
        focus.push(rec);
    }
}

// ============================================================================
// Tests
// ============================================================================
