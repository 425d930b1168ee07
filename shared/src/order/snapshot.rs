//! Order snapshot - computed state from the event stream
//!
//! The snapshot includes a `state_checksum` field for drift detection.
//! Observers replaying the event stream can compare their locally computed
//! checksum with the engine's to detect divergent applier logic.

use super::types::{OrderLine, PaymentRecord};
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// Order status
///
/// The documented forward chain is Pending → Confirmed → Preparing → Ready
/// → Served → Paid, with Cancelled reachable from any non-terminal state.
/// Paid and Cancelled are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Served,
    Paid,
    Cancelled,
}

impl OrderStatus {
    /// Terminal states admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Cancelled)
    }

    /// Whether order lines may still be added or removed in this status.
    /// Lines freeze once the kitchen starts preparing.
    pub fn lines_mutable(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }

    /// Position in the forward chain; Cancelled sits outside it.
    pub fn chain_position(&self) -> Option<u8> {
        match self {
            OrderStatus::Pending => Some(0),
            OrderStatus::Confirmed => Some(1),
            OrderStatus::Preparing => Some(2),
            OrderStatus::Ready => Some(3),
            OrderStatus::Served => Some(4),
            OrderStatus::Paid => Some(5),
            OrderStatus::Cancelled => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "PENDING"),
            OrderStatus::Confirmed => write!(f, "CONFIRMED"),
            OrderStatus::Preparing => write!(f, "PREPARING"),
            OrderStatus::Ready => write!(f, "READY"),
            OrderStatus::Served => write!(f, "SERVED"),
            OrderStatus::Paid => write!(f, "PAID"),
            OrderStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Order snapshot - computed from the event stream
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSnapshot {
    /// Order ID (assigned by the engine)
    pub order_id: String,
    /// Human-facing order number (`ORD-YYYYMMDD-NNNN`)
    pub order_number: String,
    /// Table this order occupies
    pub table_id: i64,
    /// Table number snapshot
    pub table_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Order status
    pub status: OrderStatus,
    /// Lines in the order
    pub lines: Vec<OrderLine>,
    /// Total amount; always equals the sum of line totals
    pub total_amount: f64,
    /// Settlement record, present once paid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentRecord>,
    /// Order start time
    pub start_time: i64,
    /// Order end time (set on Paid or Cancelled)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    /// Creation timestamp
    pub created_at: i64,
    /// Last update timestamp
    pub updated_at: i64,
    /// Last applied event sequence (for incremental updates)
    pub last_sequence: u64,
    /// State checksum for drift detection (hex string)
    #[serde(default)]
    pub state_checksum: String,
}

impl OrderSnapshot {
    /// Create a new empty order
    pub fn new(order_id: String) -> Self {
        let now = crate::util::now_millis();
        let mut snapshot = Self {
            order_id,
            order_number: String::new(),
            table_id: 0,
            table_number: String::new(),
            customer_name: None,
            note: None,
            status: OrderStatus::Pending,
            lines: Vec::new(),
            total_amount: 0.0,
            payment: None,
            start_time: now,
            end_time: None,
            created_at: now,
            updated_at: now,
            last_sequence: 0,
            state_checksum: String::new(),
        };
        snapshot.update_checksum();
        snapshot
    }

    /// Check if the order is still open (not Paid or Cancelled)
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Check if the order is settled
    pub fn is_paid(&self) -> bool {
        self.status == OrderStatus::Paid
    }

    /// Check if the order was cancelled
    pub fn is_cancelled(&self) -> bool {
        self.status == OrderStatus::Cancelled
    }

    /// Look up a line by its instance ID
    pub fn find_line(&self, line_id: &str) -> Option<&OrderLine> {
        self.lines.iter().find(|l| l.line_id == line_id)
    }

    /// Compute state checksum for drift detection
    ///
    /// The checksum covers the fields that must match between the engine and
    /// any observer after applying the same events. Returns a 16-character
    /// hex string.
    pub fn compute_checksum(&self) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::Hasher as _;

        let mut hasher = DefaultHasher::new();

        // Hash line count
        self.lines.len().hash(&mut hasher);

        // Hash total in cents (avoid float precision issues)
        ((self.total_amount * 100.0).round() as i64).hash(&mut hasher);

        // Hash last sequence
        self.last_sequence.hash(&mut hasher);

        // Hash status discriminant
        (self.status as u8).hash(&mut hasher);

        format!("{:016x}", hasher.finish())
    }

    /// Update the state_checksum field based on current state
    pub fn update_checksum(&mut self) {
        self.state_checksum = self.compute_checksum();
    }

    /// Verify that the state_checksum matches the computed checksum.
    /// Returns false if drift is detected.
    pub fn verify_checksum(&self) -> bool {
        self.state_checksum == self.compute_checksum()
    }
}

impl Default for OrderSnapshot {
    fn default() -> Self {
        Self::new(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_snapshot_starts_pending_with_zero_total() {
        let snapshot = OrderSnapshot::new("order-1".to_string());
        assert_eq!(snapshot.status, OrderStatus::Pending);
        assert_eq!(snapshot.total_amount, 0.0);
        assert!(snapshot.lines.is_empty());
        assert!(snapshot.is_active());
        assert!(snapshot.verify_checksum());
    }

    #[test]
    fn terminal_states() {
        assert!(OrderStatus::Paid.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Served.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
    }

    #[test]
    fn lines_freeze_from_preparing() {
        assert!(OrderStatus::Pending.lines_mutable());
        assert!(OrderStatus::Confirmed.lines_mutable());
        assert!(!OrderStatus::Preparing.lines_mutable());
        assert!(!OrderStatus::Served.lines_mutable());
        assert!(!OrderStatus::Paid.lines_mutable());
    }

    #[test]
    fn cancelled_sits_outside_the_forward_chain() {
        assert_eq!(OrderStatus::Cancelled.chain_position(), None);
        assert!(OrderStatus::Pending.chain_position() < OrderStatus::Paid.chain_position());
    }

    #[test]
    fn checksum_changes_with_state() {
        let mut snapshot = OrderSnapshot::new("order-1".to_string());
        let initial = snapshot.state_checksum.clone();
        snapshot.total_amount = 42.0;
        snapshot.update_checksum();
        assert_ne!(snapshot.state_checksum, initial);
        assert!(snapshot.verify_checksum());
    }
}
