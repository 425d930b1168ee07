//! Order commands - caller intents submitted to the workflow engine

use super::snapshot::OrderStatus;
use super::types::{OrderLineInput, PaymentInput};
use serde::{Deserialize, Serialize};

/// Order command envelope
///
/// `command_id` doubles as the idempotency key: resubmitting a command with
/// an already-processed ID is acknowledged without re-execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCommand {
    /// Command unique ID (idempotency key)
    pub command_id: String,
    /// Operator who issued the command
    pub operator_id: i64,
    /// Operator name (snapshot for audit)
    pub operator_name: String,
    /// Caller timestamp (Unix milliseconds)
    pub timestamp: i64,
    /// Command payload
    pub payload: OrderCommandPayload,
}

impl OrderCommand {
    /// Create a new command with a generated ID and current timestamp
    pub fn new(operator_id: i64, operator_name: String, payload: OrderCommandPayload) -> Self {
        Self {
            command_id: uuid::Uuid::new_v4().to_string(),
            operator_id,
            operator_name,
            timestamp: crate::util::now_millis(),
            payload,
        }
    }
}

/// Command payload variants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderCommandPayload {
    /// Open an order on an available table (creates the order, occupies the
    /// table)
    OpenOrder {
        table_id: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        customer_name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },

    /// Attach lines priced from the catalog; consumes recipe ingredients
    AddLines {
        order_id: String,
        lines: Vec<OrderLineInput>,
    },

    /// Remove a line (or part of its quantity); symmetric to AddLines
    RemoveLine {
        order_id: String,
        line_id: String,
        /// Quantity to remove; None removes the whole line
        #[serde(skip_serializing_if = "Option::is_none")]
        quantity: Option<i32>,
    },

    /// Move the order to a new status; transition to Paid releases the table
    SetStatus {
        order_id: String,
        status: OrderStatus,
    },

    /// Settle the order; equivalent to SetStatus(Paid) when the amount covers
    /// the total
    ProcessPayment {
        order_id: String,
        payment: PaymentInput,
    },
}
