//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu item entity
///
/// Never hard-deleted once referenced by an order line; taken off the menu
/// via `is_available = false`. Price edits do not touch existing orders
/// because order lines snapshot the unit price at order time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Unit price, non-negative
    pub price: f64,
    pub category: String,
    pub is_available: bool,
    /// Preparation time in minutes
    pub preparation_time_minutes: i32,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub preparation_time_minutes: Option<i32>,
}

/// Update menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub is_available: Option<bool>,
    pub preparation_time_minutes: Option<i32>,
}
