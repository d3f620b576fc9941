//! Weekly Review Data Models
//!
//! The persisted weekly snapshot: totals for the current and prior
//! windows, per-metric deltas, the bottleneck shift and next-week focus
//! recommendations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::business::{BottleneckCategory, MetricsSnapshot};

/// Forward-looking area a recommendation points the user at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusArea {
    Leads,
    Content,
    Outreach,
    Offer,
    Pricing,
    Conversion,
    Fulfillment,
    #[serde(rename = "audience building")]
    AudienceBuilding,
    #[serde(rename = "brand expansion")]
    BrandExpansion,
}

impl FocusArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Leads => "leads",
            Self::Content => "content",
            Self::Outreach => "outreach",
            Self::Offer => "offer",
            Self::Pricing => "pricing",
            Self::Conversion => "conversion",
            Self::Fulfillment => "fulfillment",
            Self::AudienceBuilding => "audience building",
            Self::BrandExpansion => "brand expansion",
        }
    }
}

impl std::fmt::Display for FocusArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One next-week priority inside a review
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusRecommendation {
    pub title: String,
    pub reason: String,
    pub focus_area: FocusArea,
}

/// Integer percent change per metric field versus the prior window.
///
/// 0 whenever the prior value is 0, so deltas never divide by zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsDeltas {
    pub views: i64,
    pub clicks: i64,
    pub messages: i64,
    pub calls: i64,
    pub sales: i64,
}

/// Persisted weekly snapshot. Appended to the review history, never
/// mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReview {
    pub id: String,
    pub project_id: String,
    /// First calendar day of the reviewed window
    pub period_start: String,
    /// Last calendar day of the reviewed window
    pub period_end: String,
    pub streak: u32,
    /// Completions inside the reviewed window
    pub directives_completed: usize,
    pub consistency_score: u8,
    pub metrics_totals: MetricsSnapshot,
    pub metrics_prior: MetricsSnapshot,
    pub deltas: MetricsDeltas,
    pub bottleneck_current: Option<BottleneckCategory>,
    pub bottleneck_prior: Option<BottleneckCategory>,
    pub bottleneck_changed: bool,
    /// 1-3 priorities, strongest first
    pub next_week_focus: Vec<FocusRecommendation>,
    pub created_at: DateTime<Utc>,
}
