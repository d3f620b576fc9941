//! Cross-Platform Path Utilities
//!
//! Functions for resolving the engine's on-disk locations.

use std::path::PathBuf;

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the Skyforge directory (~/.skyforge/)
pub fn skyforge_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".skyforge"))
}

/// Get the database file path (~/.skyforge/data.db)
pub fn database_path() -> AppResult<PathBuf> {
    Ok(skyforge_dir()?.join("data.db"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &PathBuf) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the Skyforge directory, creating if it doesn't exist
pub fn ensure_skyforge_dir() -> AppResult<PathBuf> {
    let path = skyforge_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}
