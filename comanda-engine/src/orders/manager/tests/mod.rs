//! Manager test fixtures
//!
//! A fixture wires a catalog (one table, a few menu items with recipes) and
//! an inventory ledger to a fresh manager, mirroring how the engine facade
//! assembles the real thing.

use super::*;
use shared::models::{InventoryItem, MenuItemCreate, RecipeLine, TableCreate};
use shared::order::{OrderLineInput, PaymentInput};

mod test_core;

pub(crate) struct TestFixture {
    pub manager: OrdersManager,
    pub catalog: Arc<Catalog>,
    pub ledger: Arc<InventoryLedger>,
    pub table_id: i64,
    pub salad_id: i64,
    pub juice_id: i64,
    pub retired_id: i64,
}

pub(crate) fn create_test_fixture() -> TestFixture {
    create_fixture_with_config(EngineConfig::default())
}

pub(crate) fn create_fixture_with_config(config: EngineConfig) -> TestFixture {
    let catalog = Arc::new(Catalog::new());
    let ledger = Arc::new(InventoryLedger::new());

    let table_id = catalog
        .add_table(TableCreate {
            number: "T1".to_string(),
            capacity: Some(4),
            location: Some("Window Side".to_string()),
        })
        .unwrap();

    let salad_id = catalog
        .add_menu_item(MenuItemCreate {
            name: "Caesar Salad".to_string(),
            description: None,
            price: 600.0,
            category: "Starters".to_string(),
            preparation_time_minutes: Some(10),
        })
        .unwrap();
    let juice_id = catalog
        .add_menu_item(MenuItemCreate {
            name: "Orange Juice".to_string(),
            description: None,
            price: 150.0,
            category: "Beverages".to_string(),
            preparation_time_minutes: Some(2),
        })
        .unwrap();
    let retired_id = catalog
        .add_menu_item(MenuItemCreate {
            name: "Old Stew".to_string(),
            description: None,
            price: 800.0,
            category: "Mains".to_string(),
            preparation_time_minutes: Some(25),
        })
        .unwrap();
    catalog.set_menu_item_availability(retired_id, false).unwrap();

    // Salad consumes stock; juice has no recipe on purpose
    catalog
        .set_recipe(
            salad_id,
            vec![
                RecipeLine {
                    ingredient: "Tomatoes".to_string(),
                    quantity_per_unit: 0.2,
                    unit: "kg".to_string(),
                },
                RecipeLine {
                    ingredient: "Bread".to_string(),
                    quantity_per_unit: 0.1,
                    unit: "kg".to_string(),
                },
            ],
        )
        .unwrap();

    ledger
        .add_item(InventoryItem {
            name: "Tomatoes".to_string(),
            category: "vegetables".to_string(),
            current_stock: 10.0,
            minimum_stock: 2.0,
            unit: "kg".to_string(),
            cost_per_unit: 1.8,
        })
        .unwrap();
    ledger
        .add_item(InventoryItem {
            name: "Bread".to_string(),
            category: "grains".to_string(),
            current_stock: 5.0,
            minimum_stock: 1.0,
            unit: "kg".to_string(),
            cost_per_unit: 0.9,
        })
        .unwrap();

    let manager = OrdersManager::new(catalog.clone(), ledger.clone(), config);
    TestFixture {
        manager,
        catalog,
        ledger,
        table_id,
        salad_id,
        juice_id,
        retired_id,
    }
}

impl TestFixture {
    pub fn open_cmd(&self) -> OrderCommand {
        OrderCommand::new(
            1,
            "Test Operator".to_string(),
            OrderCommandPayload::OpenOrder {
                table_id: self.table_id,
                customer_name: None,
                note: None,
            },
        )
    }

    /// Open an order and return its ID, asserting success
    pub fn open_order(&self) -> String {
        let response = self.manager.execute_command(self.open_cmd());
        assert!(response.success, "open failed: {:?}", response.error);
        response.order_id.unwrap()
    }

    pub fn add_lines_cmd(&self, order_id: &str, lines: &[(i64, i32)]) -> OrderCommand {
        OrderCommand::new(
            1,
            "Test Operator".to_string(),
            OrderCommandPayload::AddLines {
                order_id: order_id.to_string(),
                lines: lines
                    .iter()
                    .map(|(menu_item_id, quantity)| OrderLineInput {
                        menu_item_id: *menu_item_id,
                        quantity: *quantity,
                        instructions: None,
                    })
                    .collect(),
            },
        )
    }

    pub fn set_status_cmd(&self, order_id: &str, status: OrderStatus) -> OrderCommand {
        OrderCommand::new(
            1,
            "Test Operator".to_string(),
            OrderCommandPayload::SetStatus {
                order_id: order_id.to_string(),
                status,
            },
        )
    }

    pub fn pay_cmd(&self, order_id: &str, amount: f64) -> OrderCommand {
        OrderCommand::new(
            1,
            "Test Operator".to_string(),
            OrderCommandPayload::ProcessPayment {
                order_id: order_id.to_string(),
                payment: PaymentInput {
                    method: "CASH".to_string(),
                    amount,
                },
            },
        )
    }

    pub fn table_status(&self) -> TableStatus {
        self.catalog.lookup_table(self.table_id).unwrap().status
    }
}
