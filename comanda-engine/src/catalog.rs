//! Catalog service - menu items, dining tables, and recipes
//!
//! In-memory registry with interior locking. The catalog is read-mostly:
//! lookups come from the order workflow on every command, mutations come
//! from the admin path of the embedding shell. There is no process-wide
//! state; the catalog is an explicitly passed context object.

use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use parking_lot::RwLock;
use shared::ErrorCategory;
use shared::models::{
    DiningTable, MenuItem, MenuItemCreate, MenuItemUpdate, RecipeLine, TableCreate, TableStatus,
    TableUpdate,
};
use std::collections::HashMap;
use thiserror::Error;

/// Catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Menu item not found: {0}")]
    MenuItemNotFound(i64),

    #[error("Table not found: {0}")]
    TableNotFound(i64),

    #[error("Table number already exists: {0}")]
    TableNumberExists(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl CatalogError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CatalogError::MenuItemNotFound(_) | CatalogError::TableNotFound(_) => {
                ErrorCategory::NotFound
            }
            CatalogError::TableNumberExists(_) => ErrorCategory::Conflict,
            CatalogError::Validation(_) => ErrorCategory::Validation,
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Default)]
struct CatalogState {
    menu: HashMap<i64, MenuItem>,
    tables: HashMap<i64, DiningTable>,
    /// Recipe relation: menu item -> ingredient requirements
    recipes: HashMap<i64, Vec<RecipeLine>>,
}

/// Catalog registry for menu items, tables, and recipes
#[derive(Default)]
pub struct Catalog {
    inner: RwLock<CatalogState>,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.read();
        f.debug_struct("Catalog")
            .field("menu_items", &state.menu.len())
            .field("tables", &state.tables.len())
            .finish()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Menu Items ==========

    /// Add a menu item; returns its generated ID
    pub fn add_menu_item(&self, create: MenuItemCreate) -> CatalogResult<i64> {
        validate_required_text(&create.name, "name", MAX_NAME_LEN)
            .map_err(CatalogError::Validation)?;
        validate_required_text(&create.category, "category", MAX_SHORT_TEXT_LEN)
            .map_err(CatalogError::Validation)?;
        if !create.price.is_finite() || create.price < 0.0 {
            return Err(CatalogError::Validation(format!(
                "price must be non-negative, got {}",
                create.price
            )));
        }

        let id = shared::util::snowflake_id();
        let item = MenuItem {
            id,
            name: create.name,
            description: create.description.unwrap_or_default(),
            price: create.price,
            category: create.category,
            is_available: true,
            preparation_time_minutes: create.preparation_time_minutes.unwrap_or(15),
        };

        tracing::info!(menu_item_id = id, name = %item.name, "Menu item added");
        self.inner.write().menu.insert(id, item);
        Ok(id)
    }

    /// Update a menu item.
    ///
    /// Price edits are safe at any time: order lines snapshot the unit price
    /// when they are created, so existing orders never move.
    pub fn update_menu_item(&self, id: i64, update: MenuItemUpdate) -> CatalogResult<()> {
        if let Some(name) = &update.name {
            validate_required_text(name, "name", MAX_NAME_LEN).map_err(CatalogError::Validation)?;
        }
        validate_optional_text(&update.description, "description", MAX_NOTE_LEN)
            .map_err(CatalogError::Validation)?;
        if let Some(price) = update.price
            && (!price.is_finite() || price < 0.0)
        {
            return Err(CatalogError::Validation(format!(
                "price must be non-negative, got {price}"
            )));
        }

        let mut state = self.inner.write();
        let item = state
            .menu
            .get_mut(&id)
            .ok_or(CatalogError::MenuItemNotFound(id))?;

        if let Some(name) = update.name {
            item.name = name;
        }
        if let Some(description) = update.description {
            item.description = description;
        }
        if let Some(price) = update.price {
            item.price = price;
        }
        if let Some(category) = update.category {
            item.category = category;
        }
        if let Some(is_available) = update.is_available {
            item.is_available = is_available;
        }
        if let Some(minutes) = update.preparation_time_minutes {
            item.preparation_time_minutes = minutes;
        }
        Ok(())
    }

    /// Soft-disable (or re-enable) a menu item.
    /// Items are never hard-deleted once ordered; this is the off switch.
    pub fn set_menu_item_availability(&self, id: i64, available: bool) -> CatalogResult<()> {
        let mut state = self.inner.write();
        let item = state
            .menu
            .get_mut(&id)
            .ok_or(CatalogError::MenuItemNotFound(id))?;
        item.is_available = available;
        tracing::info!(menu_item_id = id, available, "Menu item availability changed");
        Ok(())
    }

    pub fn lookup_menu_item(&self, id: i64) -> Option<MenuItem> {
        self.inner.read().menu.get(&id).cloned()
    }

    pub fn menu_items(&self) -> Vec<MenuItem> {
        let mut items: Vec<MenuItem> = self.inner.read().menu.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        items
    }

    // ========== Tables ==========

    /// Add a dining table; fails if the table number is already taken
    pub fn add_table(&self, create: TableCreate) -> CatalogResult<i64> {
        validate_required_text(&create.number, "table number", MAX_SHORT_TEXT_LEN)
            .map_err(CatalogError::Validation)?;
        let capacity = create.capacity.unwrap_or(2);
        if capacity < 1 {
            return Err(CatalogError::Validation(format!(
                "capacity must be at least 1, got {capacity}"
            )));
        }

        let mut state = self.inner.write();
        if state.tables.values().any(|t| t.number == create.number) {
            return Err(CatalogError::TableNumberExists(create.number));
        }

        let id = shared::util::snowflake_id();
        let table = DiningTable {
            id,
            number: create.number,
            capacity,
            location: create.location.unwrap_or_else(|| "Main Hall".to_string()),
            status: TableStatus::Available,
        };
        tracing::info!(table_id = id, number = %table.number, "Table added");
        state.tables.insert(id, table);
        Ok(id)
    }

    /// Update a table; number uniqueness is re-checked excluding the table
    /// itself
    pub fn update_table(&self, id: i64, update: TableUpdate) -> CatalogResult<()> {
        if let Some(capacity) = update.capacity
            && capacity < 1
        {
            return Err(CatalogError::Validation(format!(
                "capacity must be at least 1, got {capacity}"
            )));
        }

        let mut state = self.inner.write();
        if let Some(number) = &update.number {
            validate_required_text(number, "table number", MAX_SHORT_TEXT_LEN)
                .map_err(CatalogError::Validation)?;
            if state
                .tables
                .values()
                .any(|t| t.id != id && t.number == *number)
            {
                return Err(CatalogError::TableNumberExists(number.clone()));
            }
        }
        let table = state
            .tables
            .get_mut(&id)
            .ok_or(CatalogError::TableNotFound(id))?;

        if let Some(number) = update.number {
            table.number = number;
        }
        if let Some(capacity) = update.capacity {
            table.capacity = capacity;
        }
        if let Some(location) = update.location {
            table.location = location;
        }
        Ok(())
    }

    /// Set a table's occupancy status.
    ///
    /// The order workflow drives Available ↔ Occupied; this is also the
    /// admin path for Reserved/Maintenance.
    pub fn set_table_status(&self, id: i64, status: TableStatus) -> CatalogResult<()> {
        let mut state = self.inner.write();
        let table = state
            .tables
            .get_mut(&id)
            .ok_or(CatalogError::TableNotFound(id))?;
        tracing::debug!(table_id = id, from = %table.status, to = %status, "Table status changed");
        table.status = status;
        Ok(())
    }

    pub fn lookup_table(&self, id: i64) -> Option<DiningTable> {
        self.inner.read().tables.get(&id).cloned()
    }

    pub fn tables(&self) -> Vec<DiningTable> {
        let mut tables: Vec<DiningTable> = self.inner.read().tables.values().cloned().collect();
        tables.sort_by(|a, b| a.number.cmp(&b.number));
        tables
    }

    pub fn available_tables(&self) -> Vec<DiningTable> {
        self.tables()
            .into_iter()
            .filter(|t| t.status == TableStatus::Available)
            .collect()
    }

    // ========== Recipes ==========

    /// Set the ingredient requirements of a menu item, replacing any prior
    /// recipe
    pub fn set_recipe(&self, menu_item_id: i64, lines: Vec<RecipeLine>) -> CatalogResult<()> {
        for line in &lines {
            validate_required_text(&line.ingredient, "ingredient", MAX_NAME_LEN)
                .map_err(CatalogError::Validation)?;
            if !line.quantity_per_unit.is_finite() || line.quantity_per_unit <= 0.0 {
                return Err(CatalogError::Validation(format!(
                    "quantity_per_unit must be positive, got {}",
                    line.quantity_per_unit
                )));
            }
        }

        let mut state = self.inner.write();
        if !state.menu.contains_key(&menu_item_id) {
            return Err(CatalogError::MenuItemNotFound(menu_item_id));
        }
        state.recipes.insert(menu_item_id, lines);
        Ok(())
    }

    /// Ingredient requirements for a menu item; empty when no recipe is
    /// registered (menu items without mapped ingredients are allowed)
    pub fn recipe_for(&self, menu_item_id: i64) -> Vec<RecipeLine> {
        self.inner
            .read()
            .recipes
            .get(&menu_item_id)
            .cloned()
            .unwrap_or_default()
    }
}
