//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Dining table occupancy status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    Maintenance,
}

impl std::fmt::Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableStatus::Available => write!(f, "AVAILABLE"),
            TableStatus::Occupied => write!(f, "OCCUPIED"),
            TableStatus::Reserved => write!(f, "RESERVED"),
            TableStatus::Maintenance => write!(f, "MAINTENANCE"),
        }
    }
}

/// Dining table entity
///
/// Status moves only through the order workflow (open → Occupied,
/// paid → Available) or an explicit admin status set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiningTable {
    pub id: i64,
    /// Human-facing table number, unique within the catalog
    pub number: String,
    /// Seats, at least 1
    pub capacity: i32,
    #[serde(default)]
    pub location: String,
    pub status: TableStatus,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCreate {
    pub number: String,
    pub capacity: Option<i32>,
    pub location: Option<String>,
}

/// Update dining table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableUpdate {
    pub number: Option<String>,
    pub capacity: Option<i32>,
    pub location: Option<String>,
}
