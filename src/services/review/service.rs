//! Review Service
//!
//! Runs the weekly review generator over stored history, appends the
//! result to the review collection and logs a review_generated event.

use std::sync::Arc;

use serde_json::{json, Map};

use crate::models::business::{DirectiveCompletionLog, MetricRecord};
use crate::models::memory::{EventLogRequest, EventType};
use crate::models::review::WeeklyReview;
use crate::services::memory::MemoryService;
use crate::services::review::generator::generate_weekly_review;
use crate::storage::repository::{keys, CollectionStore};
use crate::utils::error::AppResult;

/// Generates and persists weekly reviews
pub struct ReviewService {
    collections: CollectionStore,
    memory: Arc<MemoryService>,
}

impl ReviewService {
    pub fn new(collections: CollectionStore, memory: Arc<MemoryService>) -> Self {
        Self {
            collections,
            memory,
        }
    }

    /// Generate a review from stored metrics and completion logs,
    /// append it to the review history and log the event. Returns the
    /// review as stored.
    pub fn generate_and_store(&self, project_id: &str) -> AppResult<WeeklyReview> {
        let metrics: Vec<MetricRecord> = self.collections.load_list(keys::METRICS)?;
        let logs: Vec<DirectiveCompletionLog> =
            self.collections.load_list(keys::COMPLETION_LOGS)?;

        let review = generate_weekly_review(&metrics, &logs, project_id);

        let mut reviews: Vec<WeeklyReview> = self.collections.load_list(keys::WEEKLY_REVIEWS)?;
        reviews.push(review.clone());
        self.collections.save_list(keys::WEEKLY_REVIEWS, &reviews)?;

        self.memory
            .log_events(project_id, &[review_generated_event(&review)])?;

        tracing::debug!(
            "Generated weekly review {} for project {}",
            review.id,
            project_id
        );
        Ok(review)
    }

    /// Review history for a project, newest first
    pub fn reviews_for_project(&self, project_id: &str) -> AppResult<Vec<WeeklyReview>> {
        let reviews: Vec<WeeklyReview> = self.collections.load_list(keys::WEEKLY_REVIEWS)?;
        let mut mine: Vec<WeeklyReview> = reviews
            .into_iter()
            .filter(|review| review.project_id == project_id)
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(mine)
    }
}

fn review_generated_event(review: &WeeklyReview) -> EventLogRequest {
    let mut metadata = Map::new();
    metadata.insert("reviewId".to_string(), json!(review.id));
    metadata.insert("periodStart".to_string(), json!(review.period_start));
    metadata.insert("periodEnd".to_string(), json!(review.period_end));
    EventLogRequest::new(EventType::ReviewGenerated, metadata)
}
