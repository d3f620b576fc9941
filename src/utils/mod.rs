//! Utilities
//!
//! Common utilities used throughout the engine.

pub mod dates;
pub mod error;
pub mod paths;

pub use error::*;
pub use paths::*;
