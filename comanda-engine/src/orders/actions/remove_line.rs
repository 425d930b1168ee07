//! RemoveLine command handler
//!
//! Removes a line (or part of its quantity) from an order. Symmetric to
//! AddLines for the order arithmetic; consumed inventory is not returned.

use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderStatus};

/// RemoveLine action
#[derive(Debug, Clone)]
pub struct RemoveLineAction {
    pub order_id: String,
    pub line_id: String,
    /// Quantity to remove; None removes the whole line
    pub quantity: Option<i32>,
}

impl CommandHandler for RemoveLineAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        // 1. Load existing snapshot and check it still accepts line changes
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

        // 2. The line must exist and the quantity must fit inside it
        let line = snapshot
            .find_line(&self.line_id)
            .ok_or_else(|| OrderError::LineNotFound(self.line_id.clone()))?;
        if let Some(quantity) = self.quantity {
            if quantity < 1 || quantity > line.quantity {
                return Err(OrderError::InvalidQuantity(quantity));
            }
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
            OrderEventType::LineRemoved,
            EventPayload::LineRemoved {
                line_id: self.line_id.clone(),
                item_name: line.name.clone(),
                quantity: self.quantity,
            },
        );

        Ok(vec![event])
    }
}
