//! OrdersManager - Core command processing and event generation
//!
//! This module handles:
//! - Command validation and processing
//! - Event generation with global sequence numbers
//! - Snapshot updates via pure appliers
//! - Entity side effects (table occupancy, inventory consumption)
//! - Event broadcasting to observers
//!
//! Every command runs under one store write guard: the conflict checks and
//! the mutations they protect cannot interleave with another command, and
//! the order + its lines + the inventory rows it touches commit as a single
//! unit. A command that fails validation mutates nothing.

mod error;
pub use error::*;

use super::actions::{AddLinesAction, CommandAction, OpenOrderAction, SetStatusAction};
use super::appliers::EventAction;
use super::traits::{CommandContext, CommandHandler, CommandMetadata, EventApplier};
use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::inventory::InventoryLedger;
use crate::reporting;
use crate::store::OrderStore;
use crate::utils::time::compact_date;
use parking_lot::RwLock;
use shared::models::{MenuItem, SalesReport, TableStatus};
use shared::order::{
    CommandResponse, EventPayload, OrderCommand, OrderCommandPayload, OrderEvent, OrderLine,
    OrderSnapshot, OrderStatus,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 4096;

/// OrdersManager for command processing
pub struct OrdersManager {
    store: Arc<RwLock<OrderStore>>,
    catalog: Arc<Catalog>,
    ledger: Arc<InventoryLedger>,
    event_tx: broadcast::Sender<OrderEvent>,
    config: EngineConfig,
}

impl std::fmt::Debug for OrdersManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrdersManager")
            .field("store", &"<OrderStore>")
            .field("event_tx", &"<broadcast::Sender>")
            .field("config", &self.config)
            .finish()
    }
}

impl OrdersManager {
    /// Create a new OrdersManager over the given catalog and ledger
    pub fn new(catalog: Arc<Catalog>, ledger: Arc<InventoryLedger>, config: EngineConfig) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            store: Arc::new(RwLock::new(OrderStore::new())),
            catalog,
            ledger,
            event_tx,
            config,
        }
    }

    /// Subscribe to event broadcasts
    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.event_tx.subscribe()
    }

    /// Generate the next order number (`ORD-YYYYMMDD-NNNN`)
    fn next_order_number(&self, store: &mut OrderStore) -> String {
        let date = compact_date(shared::util::now_millis());
        let count = store.next_order_count(&date);
        format!("ORD-{date}-{count:04}")
    }

    /// Execute a command and return the response
    pub fn execute_command(&self, cmd: OrderCommand) -> CommandResponse {
        match self.process_command(cmd.clone()) {
            Ok((response, events)) => {
                // Broadcast events after successful commit
                for event in events {
                    if self.event_tx.send(event).is_err() {
                        tracing::debug!("Event broadcast skipped: no active receivers");
                        break;
                    }
                }
                response
            }
            Err(err) => CommandResponse::error(cmd.command_id, err.into()),
        }
    }

    /// Process command and return response with events
    ///
    /// Uses the action-based architecture:
    /// 1. Convert command to CommandAction (resolving catalog references)
    /// 2. Execute action to generate events
    /// 3. Apply events to snapshots via EventApplier
    /// 4. Commit everything under one write guard
    fn process_command(
        &self,
        cmd: OrderCommand,
    ) -> ManagerResult<(CommandResponse, Vec<OrderEvent>)> {
        tracing::debug!(command_id = %cmd.command_id, payload = ?cmd.payload, "Processing command");

        let mut store = self.store.write();

        // 1. Idempotency check
        if store.is_command_processed(&cmd.command_id) {
            tracing::warn!(command_id = %cmd.command_id, "Duplicate command");
            return Ok((CommandResponse::duplicate(cmd.command_id), vec![]));
        }

        // 2. Build the action, resolving catalog references
        let action = self.build_action(&cmd, &mut store)?;

        // 3. Create context and metadata
        let current_sequence = store.current_sequence();
        let metadata = CommandMetadata {
            command_id: cmd.command_id.clone(),
            operator_id: cmd.operator_id,
            operator_name: cmd.operator_name.clone(),
            timestamp: cmd.timestamp,
        };

        // 4. Execute the action and fold its events into staged snapshots.
        //    Failure here returns before anything is committed.
        let (events, snapshots) = {
            let mut ctx = CommandContext::new(&store, current_sequence);
            let events = action.execute(&mut ctx, &metadata)?;

            for event in &events {
                let mut snapshot = ctx
                    .load_snapshot(&event.order_id)
                    .unwrap_or_else(|_| OrderSnapshot::new(event.order_id.clone()));
                let applier: EventAction = event.into();
                applier.apply(&mut snapshot, event);
                ctx.save_snapshot(snapshot);
            }
            (events, ctx.into_modified())
        };

        // 5. Commit snapshots and update active-order tracking
        for snapshot in &snapshots {
            if snapshot.is_active() {
                store.mark_order_active(&snapshot.order_id);
            } else {
                store.mark_order_inactive(&snapshot.order_id);
            }
            store.store_snapshot(snapshot.clone());
        }

        // 6. Persist events and advance the sequence counter
        let max_sequence = events
            .iter()
            .map(|e| e.sequence)
            .max()
            .unwrap_or(current_sequence);
        if max_sequence > current_sequence {
            store.set_sequence(max_sequence);
        }
        store.append_events(&events);

        // 7. Mark command processed
        store.mark_command_processed(&cmd.command_id);

        // 8. Entity side effects, still under the guard: table occupancy and
        //    inventory consumption commit with the order as one unit
        self.apply_side_effects(&events, &snapshots);

        drop(store);

        // 9. Return response
        let order_id = events.first().map(|e| e.order_id.clone());
        tracing::info!(
            command_id = %cmd.command_id,
            order_id = ?order_id,
            event_count = events.len(),
            "Command processed successfully"
        );
        Ok((CommandResponse::success(cmd.command_id, order_id), events))
    }

    /// Convert a command into an executable action.
    ///
    /// OpenOrder: resolves the table and pre-generates the order number
    /// (only after the table checks pass, so failed opens don't burn
    /// numbers). AddLines: injects the referenced menu items from the
    /// catalog. SetStatus: injects the transition mode.
    fn build_action(
        &self,
        cmd: &OrderCommand,
        store: &mut OrderStore,
    ) -> ManagerResult<CommandAction> {
        let action = match &cmd.payload {
            OrderCommandPayload::OpenOrder {
                table_id,
                customer_name,
                note,
            } => {
                let table = self
                    .catalog
                    .lookup_table(*table_id)
                    .ok_or(ManagerError::TableNotFound(*table_id))?;
                if table.status != TableStatus::Available {
                    return Err(super::traits::OrderError::TableUnavailable(format!(
                        "Table {} is {}",
                        table.number, table.status
                    ))
                    .into());
                }
                if let Some(existing) = store.find_active_order_for_table(table.id) {
                    return Err(super::traits::OrderError::TableUnavailable(format!(
                        "Table {} is occupied by order {}",
                        table.number, existing
                    ))
                    .into());
                }
                let order_number = self.next_order_number(store);
                tracing::debug!(order_number = %order_number, "Pre-generated order number");
                CommandAction::OpenOrder(OpenOrderAction {
                    table,
                    customer_name: customer_name.clone(),
                    note: note.clone(),
                    order_number,
                })
            }
            OrderCommandPayload::AddLines { order_id, lines } => {
                let menu: HashMap<i64, MenuItem> = lines
                    .iter()
                    .filter_map(|l| self.catalog.lookup_menu_item(l.menu_item_id))
                    .map(|m| (m.id, m))
                    .collect();
                CommandAction::AddLines(AddLinesAction {
                    order_id: order_id.clone(),
                    lines: lines.clone(),
                    menu,
                })
            }
            OrderCommandPayload::SetStatus { order_id, status } => {
                CommandAction::SetStatus(SetStatusAction {
                    order_id: order_id.clone(),
                    status: *status,
                    strict: self.config.strict_status_transitions,
                })
            }
            _ => cmd.into(),
        };
        Ok(action)
    }

    /// Apply entity side effects for committed events.
    ///
    /// Transition to Paid is the ONLY status change with a table side
    /// effect; cancellation leaves the table to the admin path.
    fn apply_side_effects(&self, events: &[OrderEvent], snapshots: &[OrderSnapshot]) {
        for event in events {
            match &event.payload {
                EventPayload::OrderOpened { table_id, .. } => {
                    if let Err(e) = self
                        .catalog
                        .set_table_status(*table_id, TableStatus::Occupied)
                    {
                        tracing::error!(table_id, error = %e, "Failed to occupy table");
                    }
                }
                EventPayload::StatusChanged {
                    to: OrderStatus::Paid,
                    ..
                } => {
                    let Some(snapshot) = snapshots.iter().find(|s| s.order_id == event.order_id)
                    else {
                        continue;
                    };
                    if let Err(e) = self
                        .catalog
                        .set_table_status(snapshot.table_id, TableStatus::Available)
                    {
                        tracing::error!(
                            table_id = snapshot.table_id,
                            error = %e,
                            "Failed to release table"
                        );
                    }
                }
                EventPayload::LinesAdded { lines } => {
                    for line in lines {
                        for recipe_line in self.catalog.recipe_for(line.menu_item_id) {
                            let used = recipe_line.quantity_per_unit * f64::from(line.quantity);
                            self.ledger.consume(&recipe_line.ingredient, used);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    // ========== Public Query Methods ==========

    /// Get a snapshot by order ID
    pub fn get_snapshot(&self, order_id: &str) -> Option<OrderSnapshot> {
        self.store.read().get_snapshot(order_id)
    }

    /// Get all active order snapshots
    pub fn get_active_orders(&self) -> Vec<OrderSnapshot> {
        self.store.read().get_active_orders()
    }

    /// Lines of an order
    pub fn order_lines(&self, order_id: &str) -> ManagerResult<Vec<OrderLine>> {
        self.store
            .read()
            .get_snapshot(order_id)
            .map(|s| s.lines)
            .ok_or_else(|| ManagerError::OrderNotFound(order_id.to_string()))
    }

    /// Total of an order
    pub fn order_total(&self, order_id: &str) -> ManagerResult<f64> {
        self.store
            .read()
            .get_snapshot(order_id)
            .map(|s| s.total_amount)
            .ok_or_else(|| ManagerError::OrderNotFound(order_id.to_string()))
    }

    /// Get current sequence number
    pub fn get_current_sequence(&self) -> u64 {
        self.store.read().current_sequence()
    }

    /// Get events since a given sequence
    pub fn get_events_since(&self, since_sequence: u64) -> Vec<OrderEvent> {
        self.store.read().get_events_since(since_sequence)
    }

    /// Get all events for a specific order
    pub fn get_events_for_order(&self, order_id: &str) -> Vec<OrderEvent> {
        self.store.read().get_events_for_order(order_id)
    }

    /// Rebuild a snapshot from events (for verification)
    ///
    /// Uses EventApplier to apply each event to build the snapshot. A
    /// rebuilt snapshot must match the stored one; divergence means an
    /// applier stopped being pure.
    pub fn rebuild_snapshot(&self, order_id: &str) -> ManagerResult<OrderSnapshot> {
        let events = self.store.read().get_events_for_order(order_id);
        if events.is_empty() {
            return Err(ManagerError::OrderNotFound(order_id.to_string()));
        }

        let mut snapshot = OrderSnapshot::new(order_id.to_string());
        for event in &events {
            let applier: EventAction = event.into();
            applier.apply(&mut snapshot, event);
        }

        Ok(snapshot)
    }

    /// Sales summary over paid orders in an inclusive business-date range
    pub fn sales_report(&self, start_date: &str, end_date: &str) -> SalesReport {
        let store = self.store.read();
        reporting::sales_summary(store.snapshots(), start_date, end_date)
    }
}

// Make OrdersManager Clone-able via Arc
impl Clone for OrdersManager {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            catalog: self.catalog.clone(),
            ledger: self.ledger.clone(),
            event_tx: self.event_tx.clone(),
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests;
