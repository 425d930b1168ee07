//! Reservation book - slot bookings with conflict rejection
//!
//! A slot is the (table, date, time) triple. The book rejects any booking
//! whose slot is already held by a pending or confirmed reservation, and
//! rejects parties larger than the table. Check-then-insert runs under one
//! write lock so two concurrent bookings for the same slot cannot both pass
//! the conflict check.

use parking_lot::RwLock;
use shared::ErrorCategory;
use shared::models::{BookingRequest, DiningTable, Reservation, ReservationStatus};
use shared::util::{now_millis, snowflake_id};
use std::collections::HashMap;
use thiserror::Error;

use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};

/// Booking errors
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Party of {party_size} exceeds table capacity {capacity}")]
    CapacityExceeded { party_size: i32, capacity: i32 },

    #[error("Table {table_number} is already reserved for {date} {time}")]
    SlotConflict {
        table_number: String,
        date: String,
        time: String,
    },

    #[error("Reservation not found: {0}")]
    ReservationNotFound(i64),

    #[error("Table not found: {0}")]
    TableNotFound(i64),

    #[error("Reservation {0} is already completed")]
    AlreadyCompleted(i64),

    #[error("Reservation {0} is cancelled")]
    Cancelled(i64),

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl BookingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BookingError::CapacityExceeded { .. } | BookingError::Validation(_) => {
                ErrorCategory::Validation
            }
            BookingError::SlotConflict { .. } => ErrorCategory::Conflict,
            BookingError::ReservationNotFound(_) | BookingError::TableNotFound(_) => {
                ErrorCategory::NotFound
            }
            BookingError::AlreadyCompleted(_) | BookingError::Cancelled(_) => ErrorCategory::State,
        }
    }
}

pub type BookingResult<T> = Result<T, BookingError>;

/// Outcome of a cancel call; cancelling twice is a warning, not an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    Cancelled,
    AlreadyCancelled,
}

/// Reservation book keyed by reservation ID
#[derive(Default)]
pub struct ReservationBook {
    inner: RwLock<HashMap<i64, Reservation>>,
}

impl std::fmt::Debug for ReservationBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservationBook")
            .field("reservations", &self.inner.read().len())
            .finish()
    }
}

impl ReservationBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Book a slot on a table.
    ///
    /// Fails with `CapacityExceeded` when the party does not fit, and with
    /// `SlotConflict` when a pending or confirmed reservation already holds
    /// the same (table, date, time). On success the reservation is created
    /// as Confirmed and its ID returned.
    pub fn book(&self, table: &DiningTable, request: BookingRequest) -> BookingResult<i64> {
        validate_required_text(&request.customer_name, "customer name", MAX_NAME_LEN)
            .map_err(BookingError::Validation)?;
        validate_required_text(&request.date, "date", MAX_NAME_LEN)
            .map_err(BookingError::Validation)?;
        validate_required_text(&request.time, "time", MAX_NAME_LEN)
            .map_err(BookingError::Validation)?;
        validate_optional_text(&request.special_requests, "special requests", MAX_NOTE_LEN)
            .map_err(BookingError::Validation)?;
        if request.party_size < 1 {
            return Err(BookingError::Validation(format!(
                "party size must be at least 1, got {}",
                request.party_size
            )));
        }
        if request.party_size > table.capacity {
            return Err(BookingError::CapacityExceeded {
                party_size: request.party_size,
                capacity: table.capacity,
            });
        }

        // Conflict check and insert under one write lock: two concurrent
        // bookings for the same slot cannot both succeed.
        let mut reservations = self.inner.write();
        let conflict = reservations.values().any(|r| {
            r.table_id == table.id
                && r.date == request.date
                && r.time == request.time
                && r.status.holds_slot()
        });
        if conflict {
            return Err(BookingError::SlotConflict {
                table_number: table.number.clone(),
                date: request.date,
                time: request.time,
            });
        }

        let id = snowflake_id();
        let reservation = Reservation {
            id,
            table_id: table.id,
            customer_name: request.customer_name,
            customer_phone: request.customer_phone,
            customer_email: request.customer_email,
            date: request.date,
            time: request.time,
            party_size: request.party_size,
            status: ReservationStatus::Confirmed,
            special_requests: request.special_requests,
            created_at: now_millis(),
        };
        tracing::info!(
            reservation_id = id,
            table = %table.number,
            date = %reservation.date,
            time = %reservation.time,
            party_size = reservation.party_size,
            "Reservation booked"
        );
        reservations.insert(id, reservation);
        Ok(id)
    }

    /// Cancel a reservation.
    ///
    /// Idempotent: cancelling an already-cancelled reservation is a no-op
    /// reported as a warning, not an error. Completed reservations cannot be
    /// cancelled.
    pub fn cancel(&self, reservation_id: i64) -> BookingResult<CancelOutcome> {
        let mut reservations = self.inner.write();
        let reservation = reservations
            .get_mut(&reservation_id)
            .ok_or(BookingError::ReservationNotFound(reservation_id))?;

        match reservation.status {
            ReservationStatus::Cancelled => {
                tracing::warn!(reservation_id, "Reservation already cancelled, ignoring");
                Ok(CancelOutcome::AlreadyCancelled)
            }
            ReservationStatus::Completed => Err(BookingError::AlreadyCompleted(reservation_id)),
            ReservationStatus::Pending | ReservationStatus::Confirmed => {
                reservation.status = ReservationStatus::Cancelled;
                tracing::info!(reservation_id, "Reservation cancelled");
                Ok(CancelOutcome::Cancelled)
            }
        }
    }

    /// Mark a reservation as completed (the party showed up)
    pub fn complete(&self, reservation_id: i64) -> BookingResult<()> {
        let mut reservations = self.inner.write();
        let reservation = reservations
            .get_mut(&reservation_id)
            .ok_or(BookingError::ReservationNotFound(reservation_id))?;

        match reservation.status {
            ReservationStatus::Cancelled => Err(BookingError::Cancelled(reservation_id)),
            _ => {
                reservation.status = ReservationStatus::Completed;
                Ok(())
            }
        }
    }

    pub fn get(&self, reservation_id: i64) -> Option<Reservation> {
        self.inner.read().get(&reservation_id).cloned()
    }

    /// Reservations for a table on a date, ordered by time
    pub fn reservations_for(&self, table_id: i64, date: &str) -> Vec<Reservation> {
        let mut result: Vec<Reservation> = self
            .inner
            .read()
            .values()
            .filter(|r| r.table_id == table_id && r.date == date)
            .cloned()
            .collect();
        result.sort_by(|a, b| a.time.cmp(&b.time));
        result
    }
}
