//! Shared types for the Comanda order workflow
//!
//! Common types used across the workspace: data models, order
//! command/event/snapshot types, error categories, and utility helpers.

pub mod error;
pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use error::ErrorCategory;
pub use serde::{Deserialize, Serialize};
