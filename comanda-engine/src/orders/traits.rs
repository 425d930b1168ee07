//! Core traits and context for the order workflow

use crate::orders::appliers::{
    EventAction, LineRemovedApplier, LinesAddedApplier, OrderOpenedApplier, PaymentProcessedApplier,
    StatusChangedApplier,
};
use crate::store::OrderStore;
use enum_dispatch::enum_dispatch;
use shared::order::{OrderEvent, OrderSnapshot, OrderStatus};
use thiserror::Error;

/// Action-level errors
///
/// Raised during command validation/execution, before any state mutation.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Menu item not found: {0}")]
    ItemNotFound(i64),

    #[error("Line not found: {0}")]
    LineNotFound(String),

    #[error("Menu item is not available: {0}")]
    ItemUnavailable(String),

    #[error("Table is not available: {0}")]
    TableUnavailable(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i32),

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Insufficient payment: offered {offered:.2}, required {required:.2}")]
    InsufficientPayment { offered: f64, required: f64 },

    #[error("Order already paid: {0}")]
    OrderAlreadyPaid(String),

    #[error("Order already cancelled: {0}")]
    OrderAlreadyCancelled(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("Order lines are locked: {0}")]
    LinesLocked(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Command metadata carried from the envelope into actions and events
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    pub command_id: String,
    pub operator_id: i64,
    pub operator_name: String,
    pub timestamp: i64,
}

/// Command handler: validates and turns a command into events.
///
/// Handlers must not mutate anything themselves; a handler that fails leaves
/// no trace, which is what makes each command all-or-nothing.
pub trait CommandHandler {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError>;
}

/// Event applier: folds one event into a snapshot. Appliers are PURE
/// functions of (snapshot, event) and must be infallible.
#[enum_dispatch]
pub trait EventApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent);
}

/// Execution context for one command
///
/// Reads go through to the store; writes are staged in the context and
/// committed by the manager only after the whole command succeeds.
pub struct CommandContext<'a> {
    store: &'a OrderStore,
    sequence: u64,
    modified: Vec<OrderSnapshot>,
}

impl<'a> CommandContext<'a> {
    pub fn new(store: &'a OrderStore, current_sequence: u64) -> Self {
        Self {
            store,
            sequence: current_sequence,
            modified: Vec::new(),
        }
    }

    /// Allocate the next event sequence number
    pub fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    /// Load a snapshot, preferring staged modifications over the store
    pub fn load_snapshot(&self, order_id: &str) -> Result<OrderSnapshot, OrderError> {
        if let Some(snapshot) = self.modified.iter().rev().find(|s| s.order_id == order_id) {
            return Ok(snapshot.clone());
        }
        self.store
            .get_snapshot(order_id)
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))
    }

    /// Create a fresh snapshot (not yet staged)
    pub fn create_snapshot(&self, order_id: String) -> OrderSnapshot {
        OrderSnapshot::new(order_id)
    }

    /// Stage a snapshot for commit
    pub fn save_snapshot(&mut self, snapshot: OrderSnapshot) {
        if let Some(existing) = self
            .modified
            .iter_mut()
            .find(|s| s.order_id == snapshot.order_id)
        {
            *existing = snapshot;
        } else {
            self.modified.push(snapshot);
        }
    }

    /// Find the active order occupying a table, staged or stored
    pub fn find_active_order_for_table(&self, table_id: i64) -> Option<String> {
        if let Some(snapshot) = self
            .modified
            .iter()
            .find(|s| s.table_id == table_id && s.is_active())
        {
            return Some(snapshot.order_id.clone());
        }
        self.store.find_active_order_for_table(table_id)
    }

    /// Staged snapshots, in modification order
    pub fn modified_snapshots(&self) -> &[OrderSnapshot] {
        &self.modified
    }

    /// Consume the context, yielding the staged snapshots
    pub fn into_modified(self) -> Vec<OrderSnapshot> {
        self.modified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_allocation_is_monotonic() {
        let store = OrderStore::new();
        let mut ctx = CommandContext::new(&store, 5);
        assert_eq!(ctx.next_sequence(), 6);
        assert_eq!(ctx.next_sequence(), 7);
    }

    #[test]
    fn staged_snapshot_shadows_store() {
        let mut store = OrderStore::new();
        let mut stored = OrderSnapshot::new("order-1".to_string());
        stored.total_amount = 10.0;
        store.store_snapshot(stored);

        let mut ctx = CommandContext::new(&store, 0);
        let mut staged = ctx.load_snapshot("order-1").unwrap();
        staged.total_amount = 99.0;
        ctx.save_snapshot(staged);

        assert_eq!(ctx.load_snapshot("order-1").unwrap().total_amount, 99.0);
        // Store itself is untouched until the manager commits
        assert_eq!(store.get_snapshot("order-1").unwrap().total_amount, 10.0);
    }

    #[test]
    fn load_missing_snapshot_is_order_not_found() {
        let store = OrderStore::new();
        let ctx = CommandContext::new(&store, 0);
        assert!(matches!(
            ctx.load_snapshot("ghost"),
            Err(OrderError::OrderNotFound(_))
        ));
    }

    #[test]
    fn save_snapshot_replaces_same_order() {
        let store = OrderStore::new();
        let mut ctx = CommandContext::new(&store, 0);
        ctx.save_snapshot(OrderSnapshot::new("order-1".to_string()));
        ctx.save_snapshot(OrderSnapshot::new("order-1".to_string()));
        assert_eq!(ctx.modified_snapshots().len(), 1);
    }
}
