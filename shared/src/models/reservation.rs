//! Reservation Model

use serde::{Deserialize, Serialize};

/// Reservation status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    #[default]
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    /// Whether this reservation still holds its slot.
    /// Cancelled and completed reservations release the (table, date, time)
    /// slot for new bookings.
    pub fn holds_slot(&self) -> bool {
        matches!(self, ReservationStatus::Pending | ReservationStatus::Confirmed)
    }
}

/// Reservation entity
///
/// A reservation contends for a slot: the (table, date, time) triple.
/// No two slot-holding reservations may share one. Reservations are
/// cancelled or completed, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reservation {
    pub id: i64,
    pub table_id: i64,
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub customer_email: String,
    /// Reservation date, `YYYY-MM-DD`
    pub date: String,
    /// Reservation time, `HH:MM`
    pub time: String,
    pub party_size: i32,
    pub status: ReservationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,
}

/// Booking request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub customer_email: String,
    pub date: String,
    pub time: String,
    pub party_size: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}
