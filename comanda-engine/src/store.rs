//! In-memory order store
//!
//! Holds order snapshots, the global event log, the active-order index, the
//! processed-command set, and the counters the manager draws from. The store
//! itself does no locking; the [`OrdersManager`](crate::OrdersManager) wraps
//! it in a single `RwLock` and performs every mutation under one write guard,
//! which is what makes each command's check-then-act atomic.

use shared::order::{OrderEvent, OrderSnapshot};
use std::collections::{HashMap, HashSet};

/// In-memory store for order state
#[derive(Debug, Default)]
pub struct OrderStore {
    /// Current snapshot per order
    snapshots: HashMap<String, OrderSnapshot>,
    /// Global event log, ordered by sequence
    events: Vec<OrderEvent>,
    /// Orders that are neither paid nor cancelled
    active: HashSet<String>,
    /// Idempotency set: command IDs that already executed
    processed_commands: HashSet<String>,
    /// Last allocated event sequence
    sequence: u64,
    /// Order-number counter per compact date (`YYYYMMDD`)
    order_counts: HashMap<String, u64>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Snapshots ==========

    /// Get a snapshot by order ID
    pub fn get_snapshot(&self, order_id: &str) -> Option<OrderSnapshot> {
        self.snapshots.get(order_id).cloned()
    }

    /// Store (insert or replace) a snapshot
    pub fn store_snapshot(&mut self, snapshot: OrderSnapshot) {
        self.snapshots.insert(snapshot.order_id.clone(), snapshot);
    }

    /// Iterate over all snapshots (for reporting)
    pub fn snapshots(&self) -> impl Iterator<Item = &OrderSnapshot> {
        self.snapshots.values()
    }

    // ========== Active order tracking ==========

    pub fn mark_order_active(&mut self, order_id: &str) {
        self.active.insert(order_id.to_string());
    }

    pub fn mark_order_inactive(&mut self, order_id: &str) {
        self.active.remove(order_id);
    }

    /// Get all active order snapshots
    pub fn get_active_orders(&self) -> Vec<OrderSnapshot> {
        let mut orders: Vec<OrderSnapshot> = self
            .active
            .iter()
            .filter_map(|id| self.snapshots.get(id).cloned())
            .collect();
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        orders
    }

    /// Find the active order occupying a table, if any
    pub fn find_active_order_for_table(&self, table_id: i64) -> Option<String> {
        self.active
            .iter()
            .filter_map(|id| self.snapshots.get(id))
            .find(|s| s.table_id == table_id)
            .map(|s| s.order_id.clone())
    }

    // ========== Idempotency ==========

    pub fn is_command_processed(&self, command_id: &str) -> bool {
        self.processed_commands.contains(command_id)
    }

    pub fn mark_command_processed(&mut self, command_id: &str) {
        self.processed_commands.insert(command_id.to_string());
    }

    // ========== Events & sequence ==========

    pub fn current_sequence(&self) -> u64 {
        self.sequence
    }

    pub fn set_sequence(&mut self, sequence: u64) {
        self.sequence = sequence;
    }

    pub fn append_events(&mut self, events: &[OrderEvent]) {
        self.events.extend_from_slice(events);
    }

    /// Get events with sequence greater than `since_sequence`
    pub fn get_events_since(&self, since_sequence: u64) -> Vec<OrderEvent> {
        self.events
            .iter()
            .filter(|e| e.sequence > since_sequence)
            .cloned()
            .collect()
    }

    /// Get all events for a specific order, in sequence order
    pub fn get_events_for_order(&self, order_id: &str) -> Vec<OrderEvent> {
        self.events
            .iter()
            .filter(|e| e.order_id == order_id)
            .cloned()
            .collect()
    }

    // ========== Order numbers ==========

    /// Next order count for a compact date (1-based, monotonic per day)
    pub fn next_order_count(&mut self, date: &str) -> u64 {
        let count = self.order_counts.entry(date.to_string()).or_insert(0);
        *count += 1;
        *count
    }
}
