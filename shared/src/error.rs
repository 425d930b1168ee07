//! Error classification shared across the workspace
//!
//! Every failure an operation can report falls into one of four kinds.
//! Component error enums map into [`ErrorCategory`] so callers can apply a
//! uniform policy (e.g. which failures are retryable by the presentation
//! layer) without matching on every concrete code.

use serde::{Deserialize, Serialize};

/// Classification of operation failures by domain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    /// A referenced entity is absent
    NotFound,
    /// Quantity/price/capacity out of domain
    Validation,
    /// Double-booking, unavailable table or item
    Conflict,
    /// Invalid status transition or frozen state
    State,
    /// Unexpected engine failure
    Internal,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::NotFound => write!(f, "NOT_FOUND"),
            ErrorCategory::Validation => write!(f, "VALIDATION"),
            ErrorCategory::Conflict => write!(f, "CONFLICT"),
            ErrorCategory::State => write!(f, "STATE"),
            ErrorCategory::Internal => write!(f, "INTERNAL"),
        }
    }
}
