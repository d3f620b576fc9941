//! Storage Layer
//!
//! Handles all data persistence: the durable key-value contract, its
//! SQLite implementation, and typed JSON collection access.

pub mod kv;
pub mod repository;

pub use kv::*;
pub use repository::*;
