//! Inventory Models

use serde::{Deserialize, Serialize};

/// Inventory stock row, keyed by ingredient name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryItem {
    pub name: String,
    #[serde(default)]
    pub category: String,
    /// On-hand quantity; clamped at 0, never negative
    pub current_stock: f64,
    /// Threshold at or below which an alert is raised
    pub minimum_stock: f64,
    /// Unit of measure (kg, l, piece, ...)
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub cost_per_unit: f64,
}

impl InventoryItem {
    /// Whether the row sits at or below its alert threshold.
    pub fn is_low(&self) -> bool {
        self.current_stock <= self.minimum_stock
    }
}

/// Stock alert kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    Low,
    Out,
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertKind::Low => write!(f, "LOW"),
            AlertKind::Out => write!(f, "OUT"),
        }
    }
}

/// A flagged low/out-of-stock condition requiring human resolution.
///
/// At most one unresolved alert exists per inventory item at a time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockAlert {
    pub id: i64,
    pub item_name: String,
    pub kind: AlertKind,
    pub message: String,
    pub is_resolved: bool,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<i64>,
}
