//! Inventory ledger - stock quantities with threshold alerts
//!
//! The ledger is a side-effect consumer of the order workflow: committing an
//! order line decrements the mapped ingredients, clamped at zero. Crossing
//! the minimum-stock threshold raises a [`StockAlert`]; at most one
//! unresolved alert exists per item at a time, and restocking past the
//! threshold resolves it.

use parking_lot::RwLock;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use shared::ErrorCategory;
use shared::models::{AlertKind, InventoryItem, StockAlert};
use shared::util::{now_millis, snowflake_id};
use std::collections::HashMap;
use thiserror::Error;

/// Rounding for stock quantities (3 decimal places covers g/ml granularity)
const STOCK_DECIMAL_PLACES: u32 = 3;

/// Ledger errors
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Inventory item not found: {0}")]
    ItemNotFound(String),

    #[error("Alert not found: {0}")]
    AlertNotFound(i64),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(f64),
}

impl LedgerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LedgerError::ItemNotFound(_) | LedgerError::AlertNotFound(_) => ErrorCategory::NotFound,
            LedgerError::InvalidQuantity(_) => ErrorCategory::Validation,
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;

fn round_stock(value: Decimal) -> f64 {
    value
        .round_dp(STOCK_DECIMAL_PLACES)
        .to_f64()
        .unwrap_or(0.0)
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64_retain(value).unwrap_or(Decimal::ZERO)
}

#[derive(Debug, Default)]
struct LedgerState {
    items: HashMap<String, InventoryItem>,
    alerts: Vec<StockAlert>,
}

impl LedgerState {
    fn has_unresolved_alert(&self, item_name: &str) -> bool {
        self.alerts
            .iter()
            .any(|a| !a.is_resolved && a.item_name == item_name)
    }
}

/// Inventory ledger with clamped decrements and alert emission
pub struct InventoryLedger {
    inner: RwLock<LedgerState>,
    alerts_enabled: bool,
}

impl Default for InventoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InventoryLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.read();
        f.debug_struct("InventoryLedger")
            .field("items", &state.items.len())
            .field("alerts", &state.alerts.len())
            .finish()
    }
}

impl InventoryLedger {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(LedgerState::default()),
            alerts_enabled: true,
        }
    }

    /// Create a ledger with alert emission disabled
    pub fn without_alerts() -> Self {
        Self {
            inner: RwLock::new(LedgerState::default()),
            alerts_enabled: false,
        }
    }

    // ========== Stock rows ==========

    /// Register (or replace) a stock row
    pub fn add_item(&self, mut item: InventoryItem) -> LedgerResult<()> {
        if !item.current_stock.is_finite() || item.current_stock < 0.0 {
            return Err(LedgerError::InvalidQuantity(item.current_stock));
        }
        if !item.minimum_stock.is_finite() || item.minimum_stock < 0.0 {
            return Err(LedgerError::InvalidQuantity(item.minimum_stock));
        }
        item.current_stock = round_stock(to_decimal(item.current_stock));
        self.inner.write().items.insert(item.name.clone(), item);
        Ok(())
    }

    /// Set a row's stock to an absolute value (admin correction path)
    pub fn set_stock(&self, name: &str, quantity: f64) -> LedgerResult<()> {
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(LedgerError::InvalidQuantity(quantity));
        }
        let mut state = self.inner.write();
        let item = state
            .items
            .get_mut(name)
            .ok_or_else(|| LedgerError::ItemNotFound(name.to_string()))?;
        item.current_stock = round_stock(to_decimal(quantity));
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<InventoryItem> {
        self.inner.read().items.get(name).cloned()
    }

    /// Rows sitting at or below their alert threshold
    pub fn low_stock(&self) -> Vec<InventoryItem> {
        let mut items: Vec<InventoryItem> = self
            .inner
            .read()
            .items
            .values()
            .filter(|i| i.is_low())
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        items
    }

    // ========== Consume / restock ==========

    /// Consume stock for an ingredient.
    ///
    /// Unknown ingredients are silently skipped (menu items without a mapped
    /// stock row are allowed). The decrement is clamped at zero. Returns the
    /// alert raised by this consumption, if any.
    pub fn consume(&self, item_name: &str, quantity: f64) -> Option<StockAlert> {
        if !quantity.is_finite() || quantity < 0.0 {
            tracing::warn!(item = item_name, quantity, "Ignoring invalid consumption quantity");
            return None;
        }

        let mut state = self.inner.write();
        let Some(item) = state.items.get_mut(item_name) else {
            tracing::debug!(item = item_name, "No stock row for ingredient, skipping");
            return None;
        };

        let before = item.current_stock;
        let after = (to_decimal(before) - to_decimal(quantity)).max(Decimal::ZERO);
        item.current_stock = round_stock(after);

        tracing::debug!(
            item = item_name,
            consumed = quantity,
            before,
            stock = item.current_stock,
            "Stock consumed"
        );

        let crossed = item.current_stock <= item.minimum_stock;
        let out = item.current_stock == 0.0;
        let minimum = item.minimum_stock;
        let stock = item.current_stock;

        if !self.alerts_enabled || !crossed || state.has_unresolved_alert(item_name) {
            return None;
        }

        let kind = if out { AlertKind::Out } else { AlertKind::Low };
        let alert = StockAlert {
            id: snowflake_id(),
            item_name: item_name.to_string(),
            kind,
            message: format!(
                "{item_name} stock at {stock} (minimum {minimum})"
            ),
            is_resolved: false,
            created_at: now_millis(),
            resolved_at: None,
        };
        tracing::warn!(item = item_name, kind = %kind, stock, "Stock alert raised");
        state.alerts.push(alert.clone());
        Some(alert)
    }

    /// Restock an ingredient.
    ///
    /// Quantity must be positive. Resolves any outstanding alert whose item
    /// now exceeds its minimum. Returns the new stock level.
    pub fn restock(&self, item_name: &str, quantity: f64) -> LedgerResult<f64> {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(LedgerError::InvalidQuantity(quantity));
        }

        let mut state = self.inner.write();
        let item = state
            .items
            .get_mut(item_name)
            .ok_or_else(|| LedgerError::ItemNotFound(item_name.to_string()))?;

        item.current_stock = round_stock(to_decimal(item.current_stock) + to_decimal(quantity));
        let stock = item.current_stock;
        let above_minimum = stock > item.minimum_stock;

        tracing::info!(item = item_name, restocked = quantity, stock, "Stock replenished");

        if above_minimum {
            let now = now_millis();
            for alert in state
                .alerts
                .iter_mut()
                .filter(|a| !a.is_resolved && a.item_name == item_name)
            {
                alert.is_resolved = true;
                alert.resolved_at = Some(now);
                tracing::info!(item = item_name, alert_id = alert.id, "Stock alert resolved by restock");
            }
        }

        Ok(stock)
    }

    // ========== Alerts ==========

    pub fn unresolved_alerts(&self) -> Vec<StockAlert> {
        self.inner
            .read()
            .alerts
            .iter()
            .filter(|a| !a.is_resolved)
            .cloned()
            .collect()
    }

    pub fn alerts(&self) -> Vec<StockAlert> {
        self.inner.read().alerts.clone()
    }

    /// Resolve an alert explicitly (the human acknowledgement path)
    pub fn resolve_alert(&self, alert_id: i64) -> LedgerResult<()> {
        let mut state = self.inner.write();
        let alert = state
            .alerts
            .iter_mut()
            .find(|a| a.id == alert_id)
            .ok_or(LedgerError::AlertNotFound(alert_id))?;
        if !alert.is_resolved {
            alert.is_resolved = true;
            alert.resolved_at = Some(now_millis());
        }
        Ok(())
    }
}
