//! JSON Collection Storage
//!
//! Typed access to the whole-value JSON collections kept in the durable
//! store. Every collection lives under a fixed key; lists are loaded
//! and saved in full, matching the host app's storage layout.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::storage::kv::DurableStore;
use crate::utils::error::AppResult;

/// Fixed storage keys, one per collection
pub mod keys {
    pub const PROJECTS: &str = "skyforge_projects";
    pub const ACTIVE_PROJECT_ID: &str = "skyforge_active_project_id";
    pub const METRICS: &str = "skyforge_metrics";
    pub const ASSETS: &str = "skyforge_assets";
    pub const CONTENT: &str = "skyforge_content";
    pub const TASKS: &str = "skyforge_tasks";
    pub const WEEKLY_MISSION: &str = "skyforge_weekly_mission";
    pub const MONTHLY_MILESTONE: &str = "skyforge_monthly_milestone";
    pub const ONBOARDING_COMPLETE: &str = "skyforge_onboarding_complete";
    pub const USER_SETTINGS: &str = "skyforge_user_settings";
    pub const COMPLETION_LOGS: &str = "skyforge_completion_logs";
    pub const WEEKLY_REVIEWS: &str = "skyforge_weekly_reviews";
    pub const MEMORY_CHUNKS: &str = "skyforge_memory_chunks";
    pub const EVENT_LOG: &str = "skyforge_event_log";
}

/// Typed JSON layer over a [`DurableStore`]
#[derive(Clone)]
pub struct CollectionStore {
    store: Arc<dyn DurableStore>,
}

impl CollectionStore {
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        Self { store }
    }

    /// Load a list collection; a missing key is an empty list
    pub fn load_list<T: DeserializeOwned>(&self, key: &str) -> AppResult<Vec<T>> {
        match self.store.get(key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Replace a list collection wholesale
    pub fn save_list<T: Serialize>(&self, key: &str, items: &[T]) -> AppResult<()> {
        let raw = serde_json::to_string(items)?;
        self.store.set(key, &raw)
    }

    /// Load a single-value collection (pointer, flag, settings blob)
    pub fn load_value<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        match self.store.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Replace a single-value collection
    pub fn save_value<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }

    /// Drop a collection entirely
    pub fn remove(&self, key: &str) -> AppResult<()> {
        self.store.remove(key)
    }
}
