//! Data Models
//!
//! Shared data structures used across the engine.

pub mod business;
pub mod memory;
pub mod review;

pub use business::*;
pub use memory::*;
pub use review::*;
