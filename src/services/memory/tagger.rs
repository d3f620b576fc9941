//! Memory Tagging
//!
//! Keyword-based classification of free text into the fixed tag
//! vocabulary, plus the admission filter that keeps the store from
//! absorbing every chat turn. Matching is lower-cased substring only,
//! no stemming.

use crate::models::memory::{MemorySourceType, MemoryTag};

/// Keyword table in tag-declaration order; the order decides which tags
/// survive the 5-tag cap
const TAG_KEYWORDS: [(MemoryTag, &[&str]); 16] = [
    (MemoryTag::Brand, &["brand", "logo", "identity", "voice", "tone", "style", "design"]),
    (MemoryTag::Offer, &["offer", "package", "service", "product", "bundle", "deal"]),
    (MemoryTag::Pricing, &["price", "pricing", "cost", "fee", "rate", "discount", "payment"]),
    (MemoryTag::Audience, &["audience", "customer", "client", "target", "demographic", "persona", "avatar"]),
    (MemoryTag::Objection, &["objection", "concern", "hesitation", "pushback", "worry", "doubt", "complaint"]),
    (MemoryTag::Creative, &["creative", "copy", "script", "video", "post", "content", "caption", "ad"]),
    (MemoryTag::Channel, &["channel", "platform", "instagram", "facebook", "tiktok", "youtube", "google", "email"]),
    (MemoryTag::Ops, &["operations", "process", "workflow", "system", "automate", "delegate", "sop"]),
    (MemoryTag::Kpi, &["kpi", "metric", "views", "clicks", "sales", "conversion", "rate", "revenue"]),
    (MemoryTag::Milestone, &["milestone", "goal", "achieve", "reached", "hit", "target", "complete"]),
    (MemoryTag::Decision, &["decide", "decision", "chose", "pivot", "switch", "change", "strategy"]),
    (MemoryTag::Approval, &["approve", "approval", "confirm", "go-ahead", "sign off", "launch"]),
    (MemoryTag::Sales, &["sale", "sales", "close", "deal", "revenue", "income", "profit", "lead"]),
    (MemoryTag::Web, &["website", "landing page", "funnel", "page", "seo", "web"]),
    (MemoryTag::Seo, &["seo", "search", "rank", "keyword", "organic", "google"]),
    (MemoryTag::Gmb, &["gmb", "google business", "google maps", "local listing", "reviews"]),
];

const DECISION_PHRASES: [&str; 9] = [
    "decided",
    "going with",
    "approved",
    "confirmed",
    "launched",
    "let's go with",
    "we'll do",
    "save this",
    "remember",
];

const MILESTONE_PHRASES: [&str; 6] = [
    "first sale",
    "milestone",
    "reached",
    "hit our",
    "new record",
    "breakthrough",
];

const OBJECTION_PHRASES: [&str; 5] = [
    "objection",
    "keeps saying",
    "common pushback",
    "they always ask",
    "concern about",
];

/// Classify free text into 1-5 tags.
///
/// Tags are collected in table order and capped at the first 5; text
/// matching nothing defaults to `ops`.
pub fn infer_tags(text: &str) -> Vec<MemoryTag> {
    let lower = text.to_lowercase();
    let mut matched: Vec<MemoryTag> = Vec::new();

    for (tag, keywords) in TAG_KEYWORDS {
        if keywords.iter().any(|kw| lower.contains(kw)) {
            matched.push(tag);
        }
    }

    if matched.is_empty() {
        return vec![MemoryTag::Ops];
    }

    matched.truncate(5);
    matched
}

/// Admission filter for the memory store.
///
/// Structural sources always qualify. Free-text sources qualify only
/// when the text signals a decision, a milestone or an objection.
pub fn should_write_memory(text: &str, source_type: MemorySourceType) -> bool {
    if source_type.is_structural() {
        return true;
    }

    let lower = text.to_lowercase();
    if DECISION_PHRASES.iter().any(|phrase| lower.contains(phrase)) {
        return true;
    }
    if MILESTONE_PHRASES.iter().any(|phrase| lower.contains(phrase)) {
        return true;
    }
    OBJECTION_PHRASES.iter().any(|phrase| lower.contains(phrase))
}
