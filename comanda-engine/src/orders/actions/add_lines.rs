//! AddLines command handler
//!
//! Attaches lines to an order, pricing each one from the catalog snapshot
//! the manager injected. The unit price is frozen here; later catalog price
//! edits never touch the line.

use std::collections::HashMap;
use uuid::Uuid;

use crate::orders::money;
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use shared::models::MenuItem;
use shared::order::{
    EventPayload, OrderEvent, OrderEventType, OrderLine, OrderLineInput, OrderStatus,
};

/// AddLines action
#[derive(Debug, Clone)]
pub struct AddLinesAction {
    pub order_id: String,
    pub lines: Vec<OrderLineInput>,
    /// Menu items resolved by the OrdersManager, keyed by ID
    pub menu: HashMap<i64, MenuItem>,
}

impl CommandHandler for AddLinesAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        if self.lines.is_empty() {
            return Err(OrderError::InvalidOperation(
                "at least one line is required".to_string(),
            ));
        }

        // 1. Load existing snapshot and check it still accepts lines
        let snapshot = ctx.load_snapshot(&self.order_id)?;
        match snapshot.status {
            OrderStatus::Paid => {
                return Err(OrderError::OrderAlreadyPaid(self.order_id.clone()));
            }
            OrderStatus::Cancelled => {
                return Err(OrderError::OrderAlreadyCancelled(self.order_id.clone()));
            }
            s if !s.lines_mutable() => {
                return Err(OrderError::LinesLocked(format!(
                    "Order {} is {}, lines are frozen",
                    self.order_id, s
                )));
            }
            _ => {}
        }

        // 2. Validate and price every line before emitting anything
        let mut priced = Vec::with_capacity(self.lines.len());
        for input in &self.lines {
            money::validate_line_input(input)?;
            validate_optional_text(&input.instructions, "instructions", MAX_NOTE_LEN)
                .map_err(OrderError::InvalidOperation)?;

            let item = self
                .menu
                .get(&input.menu_item_id)
                .ok_or(OrderError::ItemNotFound(input.menu_item_id))?;
            if !item.is_available {
                return Err(OrderError::ItemUnavailable(item.name.clone()));
            }
            money::validate_price(item.price)?;

            priced.push(OrderLine {
                line_id: Uuid::new_v4().to_string(),
                menu_item_id: item.id,
                name: item.name.clone(),
                quantity: input.quantity,
                // Snapshot: frozen even if the catalog price later changes
                unit_price: item.price,
                instructions: input.instructions.clone(),
                line_total: money::line_total(item.price, input.quantity),
            });
        }

        // 3. Allocate sequence and emit
        let seq = ctx.next_sequence();
        let event = OrderEvent::new(
            seq,
            self.order_id.clone(),
            metadata.operator_id,
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::LinesAdded,
            EventPayload::LinesAdded { lines: priced },
        );

        Ok(vec![event])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::OrderStore;
    use shared::order::{OrderSnapshot, OrderStatus};

    fn create_test_metadata() -> CommandMetadata {
        CommandMetadata {
            command_id: "cmd-1".to_string(),
            operator_id: 1,
            operator_name: "Test User".to_string(),
            timestamp: 1234567890,
        }
    }

    fn menu_item(id: i64, name: &str, price: f64, available: bool) -> MenuItem {
        MenuItem {
            id,
            name: name.to_string(),
            description: String::new(),
            price,
            category: "Mains".to_string(),
            is_available: available,
            preparation_time_minutes: 15,
        }
    }

    fn store_with_order(status: OrderStatus) -> OrderStore {
        let mut store = OrderStore::new();
        let mut snapshot = OrderSnapshot::new("order-1".to_string());
        snapshot.status = status;
        store.store_snapshot(snapshot);
        store
    }

    fn line(menu_item_id: i64, quantity: i32) -> OrderLineInput {
        OrderLineInput {
            menu_item_id,
            quantity,
            instructions: None,
        }
    }

    fn action(lines: Vec<OrderLineInput>, menu: Vec<MenuItem>) -> AddLinesAction {
        AddLinesAction {
            order_id: "order-1".to_string(),
            lines,
            menu: menu.into_iter().map(|m| (m.id, m)).collect(),
        }
    }

    #[test]
    fn prices_lines_from_catalog_snapshot() {
        let store = store_with_order(OrderStatus::Pending);
        let mut ctx = CommandContext::new(&store, 0);

        let events = action(
            vec![line(1, 2), line(2, 2)],
            vec![
                menu_item(1, "Caesar Salad", 600.0, true),
                menu_item(2, "Orange Juice", 150.0, true),
            ],
        )
        .execute(&mut ctx, &create_test_metadata())
        .unwrap();

        assert_eq!(events.len(), 1);
        if let EventPayload::LinesAdded { lines } = &events[0].payload {
            assert_eq!(lines.len(), 2);
            assert_eq!(lines[0].unit_price, 600.0);
            assert_eq!(lines[0].line_total, 1200.0);
            assert_eq!(lines[1].line_total, 300.0);
        } else {
            panic!("Expected LinesAdded payload");
        }
    }

    #[test]
    fn unavailable_item_rejected() {
        let store = store_with_order(OrderStatus::Pending);
        let mut ctx = CommandContext::new(&store, 0);

        let result = action(
            vec![line(1, 1)],
            vec![menu_item(1, "Off Menu", 500.0, false)],
        )
        .execute(&mut ctx, &create_test_metadata());

        assert!(matches!(result, Err(OrderError::ItemUnavailable(_))));
    }

    #[test]
    fn unknown_item_rejected() {
        let store = store_with_order(OrderStatus::Pending);
        let mut ctx = CommandContext::new(&store, 0);

        let result =
            action(vec![line(99, 1)], vec![]).execute(&mut ctx, &create_test_metadata());
        assert!(matches!(result, Err(OrderError::ItemNotFound(99))));
    }

    #[test]
    fn zero_quantity_rejected() {
        let store = store_with_order(OrderStatus::Pending);
        let mut ctx = CommandContext::new(&store, 0);

        let result = action(
            vec![line(1, 0)],
            vec![menu_item(1, "Soup", 450.0, true)],
        )
        .execute(&mut ctx, &create_test_metadata());
        assert!(matches!(result, Err(OrderError::InvalidQuantity(0))));
    }

    #[test]
    fn missing_order_rejected() {
        let store = OrderStore::new();
        let mut ctx = CommandContext::new(&store, 0);

        let result = action(
            vec![line(1, 1)],
            vec![menu_item(1, "Soup", 450.0, true)],
        )
        .execute(&mut ctx, &create_test_metadata());
        assert!(matches!(result, Err(OrderError::OrderNotFound(_))));
    }

    #[test]
    fn lines_frozen_once_preparing() {
        let store = store_with_order(OrderStatus::Preparing);
        let mut ctx = CommandContext::new(&store, 0);

        let result = action(
            vec![line(1, 1)],
            vec![menu_item(1, "Soup", 450.0, true)],
        )
        .execute(&mut ctx, &create_test_metadata());
        assert!(matches!(result, Err(OrderError::LinesLocked(_))));
    }

    #[test]
    fn paid_order_rejected_with_state_error() {
        let store = store_with_order(OrderStatus::Paid);
        let mut ctx = CommandContext::new(&store, 0);

        let result = action(
            vec![line(1, 1)],
            vec![menu_item(1, "Soup", 450.0, true)],
        )
        .execute(&mut ctx, &create_test_metadata());
        assert!(matches!(result, Err(OrderError::OrderAlreadyPaid(_))));
    }

    #[test]
    fn one_bad_line_fails_the_whole_command() {
        let store = store_with_order(OrderStatus::Pending);
        let mut ctx = CommandContext::new(&store, 0);

        // Second line has an invalid quantity: the whole command must fail,
        // no partial event for the first line
        let result = action(
            vec![line(1, 1), line(1, -2)],
            vec![menu_item(1, "Soup", 450.0, true)],
        )
        .execute(&mut ctx, &create_test_metadata());
        assert!(matches!(result, Err(OrderError::InvalidQuantity(-2))));
    }

    #[test]
    fn empty_lines_rejected() {
        let store = store_with_order(OrderStatus::Pending);
        let mut ctx = CommandContext::new(&store, 0);

        let result = action(vec![], vec![]).execute(&mut ctx, &create_test_metadata());
        assert!(matches!(result, Err(OrderError::InvalidOperation(_))));
    }
}
