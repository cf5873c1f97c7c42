//! Shared types for the Voyago platform
//!
//! Common types used by voyago-cloud and tooling: error types, domain
//! model payloads, lifecycle status enums, and utility functions.

pub mod error;
pub mod models;
pub mod types;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
pub use types::{AgenceStatus, ModuleId, merge_modules};
