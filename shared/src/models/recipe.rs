//! Recipe Model
//!
//! Maps menu items to the ingredients they consume. The recipe relation is
//! the single source of truth for inventory decrements on order lines.

use serde::{Deserialize, Serialize};

/// One ingredient requirement of a menu item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeLine {
    /// Inventory row name this line draws from
    pub ingredient: String,
    /// Quantity consumed per ordered unit of the menu item
    pub quantity_per_unit: f64,
    #[serde(default)]
    pub unit: String,
}
