//! Bottleneck Diagnosis
//!
//! Multi-signal heuristic over two adjacent 7-day metric windows.
//! Each funnel stage contributes at most one weighted signal; the
//! highest score wins, with ties resolved by the fixed stage order
//! (traffic, conversion, pricing, follow-up, operations).

use chrono::Utc;

use crate::models::business::{BottleneckCategory, BottleneckDiagnosis, MetricRecord};
use crate::services::execution::aggregation::aggregate_period;

struct Signal {
    category: BottleneckCategory,
    score: u8,
    reasoning: String,
}

fn safe_div(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Diagnose the most limiting funnel stage from a project's metric history.
///
/// Returns None for fewer than 2 records: not enough history to judge,
/// which callers treat as "not yet diagnosable" rather than failure.
/// Confidence is clamped to 95 except for the no-data case (90).
pub fn diagnose_bottleneck(records: &[MetricRecord]) -> Option<BottleneckDiagnosis> {
    if records.len() < 2 {
        return None;
    }

    let recent = aggregate_period(records, 0, 7);
    let prior = aggregate_period(records, 7, 14);

    if recent.total() == 0 && prior.total() == 0 {
        return Some(BottleneckDiagnosis {
            category: BottleneckCategory::Traffic,
            confidence: 90,
            reasoning: "No metrics recorded in the last 14 days. Primary issue is generating visibility."
                .to_string(),
            diagnosed_at: Utc::now(),
        });
    }

    let recent_ctr = safe_div(recent.clicks, recent.views);
    let prior_ctr = safe_div(prior.clicks, prior.views);

    let recent_conv_rate = safe_div(recent.sales, recent.clicks + recent.messages + recent.calls);
    let prior_conv_rate = safe_div(prior.sales, prior.clicks + prior.messages + prior.calls);

    let recent_follow_through = safe_div(recent.calls + recent.messages, recent.clicks);
    let prior_follow_through = safe_div(prior.calls + prior.messages, prior.clicks);

    let mut signals: Vec<Signal> = Vec::new();

    if recent.views < 20 || (prior.views > 0 && recent.views < prior.views) {
        let score = if recent.views < 10 {
            85
        } else if recent.views < 30 {
            70
        } else {
            55
        };
        let descriptor = if recent.views < 20 { "very low" } else { "declining" };
        signals.push(Signal {
            category: BottleneckCategory::Traffic,
            score,
            reasoning: format!(
                "Views are {descriptor} ({}→{}). Not enough eyeballs on your offer.",
                prior.views, recent.views
            ),
        });
    }

    if recent.views > 20 && recent_ctr < 0.05 {
        signals.push(Signal {
            category: BottleneckCategory::Conversion,
            score: 75,
            reasoning: format!(
                "Views up ({}) but CTR is {:.1}%. People see you but don't engage.",
                recent.views,
                recent_ctr * 100.0
            ),
        });
    } else if recent_ctr < prior_ctr * 0.7 && prior.views > 10 {
        signals.push(Signal {
            category: BottleneckCategory::Conversion,
            score: 65,
            reasoning: format!(
                "CTR dropped from {:.1}% to {:.1}%. Engagement is slipping.",
                prior_ctr * 100.0,
                recent_ctr * 100.0
            ),
        });
    }

    if recent.clicks > 10 && recent.sales == 0 {
        signals.push(Signal {
            category: BottleneckCategory::Pricing,
            score: 70,
            reasoning: format!(
                "{} clicks but 0 sales. People are interested but not buying. Pricing or offer friction likely.",
                recent.clicks
            ),
        });
    } else if recent_conv_rate < prior_conv_rate * 0.6 && prior.sales > 0 {
        signals.push(Signal {
            category: BottleneckCategory::Pricing,
            score: 60,
            reasoning: format!(
                "Conversion rate dropped from {:.1}% to {:.1}%. Check pricing or offer.",
                prior_conv_rate * 100.0,
                recent_conv_rate * 100.0
            ),
        });
    }

    if recent.clicks > 5 && recent_follow_through < 0.3 && (recent.messages + recent.calls) < 3 {
        signals.push(Signal {
            category: BottleneckCategory::FollowUp,
            score: 68,
            reasoning: format!(
                "{} clicks but only {} follow-through (messages+calls). Leads are leaking.",
                recent.clicks,
                recent.messages + recent.calls
            ),
        });
    } else if recent_follow_through < prior_follow_through * 0.5 && prior.clicks > 5 {
        signals.push(Signal {
            category: BottleneckCategory::FollowUp,
            score: 58,
            reasoning: "Follow-through rate dropped. Fewer leads are converting to conversations."
                .to_string(),
        });
    }

    if recent.sales > 0
        && recent.sales < prior.sales
        && recent.views >= prior.views
        && recent.clicks >= prior.clicks
    {
        signals.push(Signal {
            category: BottleneckCategory::Operations,
            score: 55,
            reasoning: format!(
                "Traffic and clicks are stable/up but sales dropped ({}→{}). Possible fulfillment bottleneck.",
                prior.sales, recent.sales
            ),
        });
    }

    if signals.is_empty() {
        let contact = recent.messages + recent.calls;
        if recent.views <= recent.clicks && recent.views <= contact && recent.views <= recent.sales
        {
            return Some(BottleneckDiagnosis {
                category: BottleneckCategory::Traffic,
                confidence: 50,
                reasoning: "No strong signals detected. Views are the weakest metric — focus on visibility."
                    .to_string(),
                diagnosed_at: Utc::now(),
            });
        }
        return Some(BottleneckDiagnosis {
            category: BottleneckCategory::Conversion,
            confidence: 45,
            reasoning: "No strong signals detected. General optimization recommended.".to_string(),
            diagnosed_at: Utc::now(),
        });
    }

    // stable sort keeps generation order for equal scores
    signals.sort_by(|a, b| b.score.cmp(&a.score));
    let top = &signals[0];

    Some(BottleneckDiagnosis {
        category: top.category,
        confidence: top.score.min(95),
        reasoning: top.reasoning.clone(),
        diagnosed_at: Utc::now(),
    })
}
