//! Order events - immutable facts recorded after command processing

use super::snapshot::OrderStatus;
use super::types::OrderLine;
use serde::{Deserialize, Serialize};

/// Order event - immutable audit record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderEvent {
    /// Event unique ID
    pub event_id: String,
    /// Global sequence number (for ordering and replay)
    /// This is the AUTHORITATIVE ordering mechanism for state evolution
    pub sequence: u64,
    /// Order this event belongs to
    pub order_id: String,
    /// Engine timestamp (Unix milliseconds) - authoritative for state evolution
    pub timestamp: i64,
    /// Caller timestamp (Unix milliseconds) - for audit and debugging
    /// Preserved from the original command, may differ due to clock skew
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_timestamp: Option<i64>,
    /// Operator who triggered this event
    pub operator_id: i64,
    /// Operator name (snapshot for audit)
    pub operator_name: String,
    /// Command that triggered this event (for audit tracing)
    pub command_id: String,
    /// Event type
    pub event_type: OrderEventType,
    /// Event payload
    pub payload: EventPayload,
}

/// Event type enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEventType {
    // Lifecycle
    OrderOpened,
    StatusChanged,

    // Lines
    LinesAdded,
    LineRemoved,

    // Payment
    PaymentProcessed,
}

impl std::fmt::Display for OrderEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderEventType::OrderOpened => write!(f, "ORDER_OPENED"),
            OrderEventType::StatusChanged => write!(f, "STATUS_CHANGED"),
            OrderEventType::LinesAdded => write!(f, "LINES_ADDED"),
            OrderEventType::LineRemoved => write!(f, "LINE_REMOVED"),
            OrderEventType::PaymentProcessed => write!(f, "PAYMENT_PROCESSED"),
        }
    }
}

/// Event payload variants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventPayload {
    // ========== Lifecycle ==========
    OrderOpened {
        table_id: i64,
        /// Table number snapshot (for receipts/audit)
        table_number: String,
        /// Engine-generated order number (always present)
        order_number: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        customer_name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },

    StatusChanged {
        from: OrderStatus,
        to: OrderStatus,
    },

    // ========== Lines ==========
    LinesAdded {
        /// Complete snapshots of the added lines, prices already frozen
        lines: Vec<OrderLine>,
    },

    LineRemoved {
        line_id: String,
        item_name: String,
        /// Quantity removed; None means the whole line
        #[serde(skip_serializing_if = "Option::is_none")]
        quantity: Option<i32>,
    },

    // ========== Payment ==========
    PaymentProcessed {
        payment_id: String,
        method: String,
        amount: f64,
        /// Change returned (amount - order total)
        change: f64,
    },
}

impl OrderEvent {
    /// Create a new event
    ///
    /// # Arguments
    /// * `sequence` - Global sequence number (authoritative ordering)
    /// * `order_id` - Order this event belongs to
    /// * `operator_id` - Operator who triggered this event
    /// * `operator_name` - Operator name (snapshot for audit)
    /// * `command_id` - Command that triggered this event
    /// * `client_timestamp` - Caller-provided timestamp (may have clock skew)
    /// * `event_type` - Event type
    /// * `payload` - Event payload
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sequence: u64,
        order_id: String,
        operator_id: i64,
        operator_name: String,
        command_id: String,
        client_timestamp: Option<i64>,
        event_type: OrderEventType,
        payload: EventPayload,
    ) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            sequence,
            order_id,
            // Engine timestamp is always set here - this is authoritative
            timestamp: crate::util::now_millis(),
            client_timestamp,
            operator_id,
            operator_name,
            command_id,
            event_type,
            payload,
        }
    }

    /// Create an event from command metadata (preserves the caller timestamp)
    pub fn from_command(
        sequence: u64,
        order_id: String,
        command: &super::OrderCommand,
        event_type: OrderEventType,
        payload: EventPayload,
    ) -> Self {
        Self::new(
            sequence,
            order_id,
            command.operator_id,
            command.operator_name.clone(),
            command.command_id.clone(),
            Some(command.timestamp),
            event_type,
            payload,
        )
    }
}
