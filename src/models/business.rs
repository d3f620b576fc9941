//! Business Data Models
//!
//! Core types for projects, daily metrics, directives and the
//! bottleneck diagnosis. Field names serialize in camelCase to match
//! the host app's stored JSON collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::error::{AppError, AppResult};

// ============================================================================
// Metrics
// ============================================================================

/// A single day of raw funnel numbers for one project.
///
/// Immutable once created; the engine never mutates or deletes records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRecord {
    /// Unique record ID
    pub id: String,
    /// Owning project
    pub project_id: String,
    /// Calendar day the numbers belong to (`YYYY-MM-DD`)
    pub date: String,
    /// Impressions / profile views
    pub views: u32,
    /// Link or listing clicks
    pub clicks: u32,
    /// Inbound messages / DMs
    pub messages: u32,
    /// Inbound or booked calls
    pub calls: u32,
    /// Closed sales
    pub sales: u32,
    /// Optional free-text note for the day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl MetricRecord {
    /// Create a new metric record for a project and day
    pub fn new(project_id: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            project_id: project_id.into(),
            date: date.into(),
            views: 0,
            clicks: 0,
            messages: 0,
            calls: 0,
            sales: 0,
            notes: None,
        }
    }

    /// Set the five funnel counts
    pub fn with_counts(
        mut self,
        views: u32,
        clicks: u32,
        messages: u32,
        calls: u32,
        sales: u32,
    ) -> Self {
        self.views = views;
        self.clicks = clicks;
        self.messages = messages;
        self.calls = calls;
        self.sales = sales;
        self
    }

    /// Attach a note
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Element-wise sum of metric records over a day window. Derived, never
/// persisted on its own.
///
/// Fields are wider than the per-record counts so a window of maxed-out
/// daily records still sums without wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    /// Human-readable window label, e.g. `"0-7 days ago"`
    pub period_label: String,
    pub views: u64,
    pub clicks: u64,
    pub messages: u64,
    pub calls: u64,
    pub sales: u64,
}

impl MetricsSnapshot {
    /// An all-zero snapshot for a window label
    pub fn zeroed(period_label: impl Into<String>) -> Self {
        Self {
            period_label: period_label.into(),
            views: 0,
            clicks: 0,
            messages: 0,
            calls: 0,
            sales: 0,
        }
    }

    /// Sum of all five fields
    pub fn total(&self) -> u64 {
        self.views + self.clicks + self.messages + self.calls + self.sales
    }
}

// ============================================================================
// Bottleneck diagnosis
// ============================================================================

/// The growth-funnel stage currently judged most limiting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BottleneckCategory {
    Traffic,
    Conversion,
    Pricing,
    #[serde(rename = "follow-up")]
    FollowUp,
    Operations,
}

impl BottleneckCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Traffic => "traffic",
            Self::Conversion => "conversion",
            Self::Pricing => "pricing",
            Self::FollowUp => "follow-up",
            Self::Operations => "operations",
        }
    }

    pub fn from_str(s: &str) -> AppResult<Self> {
        match s {
            "traffic" => Ok(Self::Traffic),
            "conversion" => Ok(Self::Conversion),
            "pricing" => Ok(Self::Pricing),
            "follow-up" => Ok(Self::FollowUp),
            "operations" => Ok(Self::Operations),
            other => Err(AppError::validation(format!(
                "unknown bottleneck category: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for BottleneckCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of the heuristic bottleneck diagnosis.
///
/// Recomputed from metric history on every read; never stored on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BottleneckDiagnosis {
    pub category: BottleneckCategory,
    /// 0-100; clamped to 95 except for the no-data case (90)
    pub confidence: u8,
    /// Human-readable explanation of the winning signal
    pub reasoning: String,
    pub diagnosed_at: DateTime<Utc>,
}

// ============================================================================
// Directives and completions
// ============================================================================

/// One ordered action step inside a daily directive
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveStep {
    pub order: u32,
    pub action: String,
    pub done: bool,
}

/// Lifecycle state of a daily directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveStatus {
    Pending,
    Complete,
}

/// A single prescribed daily task with ordered steps, a time budget and
/// a success metric
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyDirective {
    pub id: String,
    pub title: String,
    pub description: String,
    pub reason: String,
    pub estimated_time: String,
    pub status: DirectiveStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub objective: String,
    pub steps: Vec<DirectiveStep>,
    pub timebox_minutes: u32,
    pub success_metric: String,
    pub blockers: Vec<String>,
    pub countermoves: Vec<String>,
    pub mode_tag: String,
    pub linked_assets: Vec<String>,
}

/// A lighter directive extracted from freeform advisor output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorDirective {
    pub id: String,
    pub title: String,
    pub description: String,
    pub reason: String,
    pub estimated_time: String,
    pub created_at: DateTime<Utc>,
}

/// Append-only record of one completed daily directive
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveCompletionLog {
    pub directive_id: String,
    pub project_id: String,
    pub completed_at: DateTime<Utc>,
    pub title: String,
    pub mode_tag: String,
}

impl DirectiveCompletionLog {
    /// Create a completion entry stamped with the current time
    pub fn new(
        directive_id: impl Into<String>,
        project_id: impl Into<String>,
        title: impl Into<String>,
        mode_tag: impl Into<String>,
    ) -> Self {
        Self {
            directive_id: directive_id.into(),
            project_id: project_id.into(),
            completed_at: Utc::now(),
            title: title.into(),
            mode_tag: mode_tag.into(),
        }
    }
}

/// Derived execution aggregate for one project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStats {
    /// Consecutive completion days ending today or yesterday
    pub streak: u32,
    /// Percent of the last 7 days with at least one completion
    pub weekly_completion_pct: u8,
    /// Percent of the last 14 days with at least one completion
    pub consistency_score: u8,
    /// Total sales divided by completion count; None without data
    pub revenue_per_directive: Option<f64>,
    pub last_updated: DateTime<Utc>,
}

// ============================================================================
// Project profile
// ============================================================================

/// Self-reported weakest area chosen during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryProblem {
    Leads,
    Sales,
    Pricing,
    Content,
    Systems,
}

impl PrimaryProblem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Leads => "leads",
            Self::Sales => "sales",
            Self::Pricing => "pricing",
            Self::Content => "content",
            Self::Systems => "systems",
        }
    }
}

impl std::fmt::Display for PrimaryProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether the daily focus is user-picked or diagnosis-driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusMode {
    Manual,
    Autopilot,
}

impl FocusMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Autopilot => "autopilot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Archived,
}

/// One business workspace. The engine reads project profiles for prompt
/// building and memory generation; it never writes this collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: ProjectStatus,
    pub business_type: String,
    pub target_customer: String,
    pub is_local: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub revenue_goal: String,
    pub available_daily_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_contact_method: Option<String>,
    pub core_offer_summary: String,
    pub pricing: String,
    pub bottleneck: PrimaryProblem,
    pub focus_mode: FocusMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_focus_area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_analysis_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_directive: Option<DailyDirective>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisor_directive: Option<AdvisorDirective>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketing_preference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<String>>,
}

impl Project {
    /// The focus area the advisor should speak to right now
    pub fn current_focus(&self) -> String {
        match (self.focus_mode, &self.manual_focus_area) {
            (FocusMode::Manual, Some(area)) => area.clone(),
            _ => self.bottleneck.to_string(),
        }
    }
}

/// App-level user preferences, stored as their own collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub display_name: String,
    pub theme: Theme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            display_name: "Skyforge User".to_string(),
            theme: Theme::Dark,
        }
    }
}
