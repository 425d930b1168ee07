//! Engine facade - wires the components together
//!
//! One construction point for the embedding application shell: the catalog,
//! inventory ledger, reservation book, and order manager share a single
//! configuration and the references the workflow needs.

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::inventory::InventoryLedger;
use crate::orders::manager::OrdersManager;
use crate::reservations::{BookingError, BookingResult, CancelOutcome, ReservationBook};
use shared::models::BookingRequest;
use std::sync::Arc;

/// The assembled workflow engine
#[derive(Debug)]
pub struct Engine {
    catalog: Arc<Catalog>,
    inventory: Arc<InventoryLedger>,
    reservations: Arc<ReservationBook>,
    orders: OrdersManager,
    config: EngineConfig,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let catalog = Arc::new(Catalog::new());
        let inventory = Arc::new(if config.enable_stock_alerts {
            InventoryLedger::new()
        } else {
            InventoryLedger::without_alerts()
        });
        let reservations = Arc::new(ReservationBook::new());
        let orders = OrdersManager::new(catalog.clone(), inventory.clone(), config.clone());
        Self {
            catalog,
            inventory,
            reservations,
            orders,
            config,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn inventory(&self) -> &InventoryLedger {
        &self.inventory
    }

    pub fn reservations(&self) -> &ReservationBook {
        &self.reservations
    }

    pub fn orders(&self) -> &OrdersManager {
        &self.orders
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Book a table by ID, resolving it through the catalog
    pub fn book_table(&self, table_id: i64, request: BookingRequest) -> BookingResult<i64> {
        let table = self
            .catalog
            .lookup_table(table_id)
            .ok_or(BookingError::TableNotFound(table_id))?;
        self.reservations.book(&table, request)
    }

    /// Cancel a reservation (idempotent)
    pub fn cancel_reservation(&self, reservation_id: i64) -> BookingResult<CancelOutcome> {
        self.reservations.cancel(reservation_id)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
