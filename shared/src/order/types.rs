//! Shared types for the order workflow

use crate::error::ErrorCategory;
use serde::{Deserialize, Serialize};

// ============================================================================
// Line Types
// ============================================================================

/// Order line input - for adding lines (without line_id or price)
///
/// The unit price is never taken from the caller; the engine snapshots it
/// from the catalog when the command executes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineInput {
    /// Menu item ID
    pub menu_item_id: i64,
    /// Quantity, at least 1
    pub quantity: i32,
    /// Special instructions ("no onions")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Order line snapshot - complete record for event recording
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    /// Line instance ID
    pub line_id: String,
    /// Menu item ID
    pub menu_item_id: i64,
    /// Menu item name (snapshot for receipts/audit)
    pub name: String,
    /// Quantity
    pub quantity: i32,
    /// Unit price frozen at order time, immune to later catalog price edits
    pub unit_price: f64,
    /// Special instructions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Line total (computed: unit_price * quantity)
    pub line_total: f64,
}

// ============================================================================
// Payment Types
// ============================================================================

/// Payment input for settling an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInput {
    pub method: String,
    pub amount: f64,
}

/// Payment record in snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentRecord {
    pub payment_id: String,
    pub method: String,
    /// Amount tendered by the customer
    pub amount: f64,
    /// Change returned (amount - order total)
    pub change: f64,
    pub timestamp: i64,
}

// ============================================================================
// Command Response
// ============================================================================

/// Command response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    /// The command ID this responds to
    pub command_id: String,
    /// Whether the command succeeded
    pub success: bool,
    /// New order ID (only for OpenOrder command)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Error details if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CommandError>,
}

impl CommandResponse {
    pub fn success(command_id: String, order_id: Option<String>) -> Self {
        Self {
            command_id,
            success: true,
            order_id,
            error: None,
        }
    }

    pub fn error(command_id: String, error: CommandError) -> Self {
        Self {
            command_id,
            success: false,
            order_id: None,
            error: Some(error),
        }
    }

    /// Response for a command that was already processed (idempotent replay)
    pub fn duplicate(command_id: String) -> Self {
        Self {
            command_id,
            success: true,
            order_id: None,
            error: None,
        }
    }
}

/// Command error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandError {
    pub code: CommandErrorCode,
    pub message: String,
}

impl CommandError {
    pub fn new(code: CommandErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Command error codes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandErrorCode {
    OrderNotFound,
    TableNotFound,
    ItemNotFound,
    LineNotFound,
    TableUnavailable,
    ItemUnavailable,
    InvalidQuantity,
    InvalidAmount,
    InsufficientPayment,
    InvalidOperation,
    InvalidStatusTransition,
    OrderAlreadyPaid,
    OrderAlreadyCancelled,
    LinesLocked,
    InternalError,
}

impl CommandErrorCode {
    /// Classify this code into one of the workflow failure kinds.
    pub fn category(&self) -> ErrorCategory {
        match self {
            CommandErrorCode::OrderNotFound
            | CommandErrorCode::TableNotFound
            | CommandErrorCode::ItemNotFound
            | CommandErrorCode::LineNotFound => ErrorCategory::NotFound,
            CommandErrorCode::InvalidQuantity
            | CommandErrorCode::InvalidAmount
            | CommandErrorCode::InsufficientPayment
            | CommandErrorCode::InvalidOperation => ErrorCategory::Validation,
            CommandErrorCode::TableUnavailable | CommandErrorCode::ItemUnavailable => {
                ErrorCategory::Conflict
            }
            CommandErrorCode::InvalidStatusTransition
            | CommandErrorCode::OrderAlreadyPaid
            | CommandErrorCode::OrderAlreadyCancelled
            | CommandErrorCode::LinesLocked => ErrorCategory::State,
            CommandErrorCode::InternalError => ErrorCategory::Internal,
        }
    }
}
