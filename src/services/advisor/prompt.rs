//! Advisor System Prompt
//!
//! Builds the system prompt each advisor conversation starts from:
//! persona, the business profile block, the last five metric entries
//! and the response-format contract. Memory context from the retrieval
//! layer is appended by the caller when non-empty.

use crate::models::business::{MetricRecord, Project};

/// Render the full system prompt for a project and its metric history.
///
/// Only the last 5 metric records are included, oldest first. A missing
/// project renders the onboarding variant of the context block.
pub fn build_system_prompt(project: Option<&Project>, metrics: &[MetricRecord]) -> String {
    let recent = if metrics.len() > 5 {
        &metrics[metrics.len() - 5..]
    } else {
        metrics
    };

    let business_context = match project {
        Some(project) => {
            let kind = if project.is_local {
                match project.location.as_deref() {
                    Some(location) => format!("Local business in {location}"),
                    None => "Local business".to_string(),
                }
            } else {
                "Online business".to_string()
            };
            format!(
                "\nProject: {}\nBusiness Type: {}\nTarget Customer: {}\nType: {}\nCurrent Offer: {}\nPricing: {}\nRevenue Goal: {}\nTime Available: {} per day\nCurrent Focus: {}\nFocus Mode: {}\nMarketing Preference: {}\n",
                project.name,
                project.business_type,
                project.target_customer,
                kind,
                project.core_offer_summary,
                project.pricing,
                project.revenue_goal,
                project.available_daily_time,
                project.current_focus(),
                project.focus_mode.as_str(),
                project
                    .marketing_preference
                    .as_deref()
                    .unwrap_or("Not specified"),
            )
        }
        None => "No project set up yet. Help them get started.".to_string(),
    };

    let metrics_section = if recent.is_empty() {
        String::new()
    } else {
        let entries = recent
            .iter()
            .map(|record| {
                let notes_line = match &record.notes {
                    Some(notes) => format!("Notes: {notes}"),
                    None => String::new(),
                };
                format!(
                    "\nDate: {}\nViews: {} | Clicks: {} | Messages: {} | Calls: {} | Sales: {}\n{}",
                    record.date,
                    record.views,
                    record.clicks,
                    record.messages,
                    record.calls,
                    record.sales,
                    notes_line,
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("\n=== RECENT METRICS ===\n{entries}\n")
    };

    format!(
        r#"You are SKYFORGE — a recursive, adaptive, hyper-intelligent business advisor designed for SMBs. Your purpose is to help this specific business grow revenue with minimal friction.

=== BUSINESS CONTEXT ===
{context}

{metrics}

=== YOUR DIRECTIVES ===
1. ALWAYS reference this specific business in your responses
2. NEVER give generic advice - be specific to their industry, location, and situation
3. ALWAYS provide exact scripts, templates, and copy they can use immediately
4. ALWAYS optimize for CASHFLOW FIRST, then scale
5. Keep responses concise and actionable
6. When analyzing metrics:
   - Views ↑ clicks ↓ = hook/offer mismatch
   - Clicks ↑ bookings ↓ = page friction
   - Calls ↑ sales ↓ = sales script issue
   - DMs ↑ conversions ↓ = wrong offer

=== RESPONSE FORMAT ===
Be direct and action-oriented. Use clear sections when providing:
- DIAGNOSIS: What's the real problem
- ACTION: What to do (1-3 steps max)
- SCRIPT/COPY: Exact words to use
- NEXT: What to measure/report back

Never overwhelm. One clear direction at a time."#,
        context = business_context,
        metrics = metrics_section,
    )
}

// ============================================================================
// Tests
// ============================================================================
