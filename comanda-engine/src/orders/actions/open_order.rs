//! OpenOrder command handler
//!
//! Creates a new order on an available table. The OrdersManager resolves the
//! table from the catalog and pre-generates the order number so failed opens
//! do not burn numbers.

use tracing::{debug, info};
use uuid::Uuid;

use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text};
use shared::models::{DiningTable, TableStatus};
use shared::order::{EventPayload, OrderEvent, OrderEventType};

/// OpenOrder action
#[derive(Debug, Clone)]
pub struct OpenOrderAction {
    /// Resolved table, looked up by the manager
    pub table: DiningTable,
    pub customer_name: Option<String>,
    pub note: Option<String>,
    /// Engine-generated order number
    pub order_number: String,
}

impl CommandHandler for OpenOrderAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        debug!(
            table_id = self.table.id,
            table_number = %self.table.number,
            order_number = %self.order_number,
            "OpenOrderAction::execute starting"
        );

        validate_optional_text(&self.customer_name, "customer name", MAX_NAME_LEN)
            .map_err(OrderError::InvalidOperation)?;
        validate_optional_text(&self.note, "note", MAX_NOTE_LEN)
            .map_err(OrderError::InvalidOperation)?;

        // 1. Table must be free: Occupied/Reserved/Maintenance all refuse
        if self.table.status != TableStatus::Available {
            return Err(OrderError::TableUnavailable(format!(
                "Table {} is {}",
                self.table.number, self.table.status
            )));
        }

        // 2. No active order may already hold the table
        if let Some(existing_order_id) = ctx.find_active_order_for_table(self.table.id) {
            return Err(OrderError::TableUnavailable(format!(
                "Table {} is occupied by order {}",
                self.table.number, existing_order_id
            )));
        }

        // 3. Generate new order ID and allocate a sequence number
        let order_id = Uuid::new_v4().to_string();
        let seq = ctx.next_sequence();

        let event = OrderEvent::new(
            seq,
            order_id.clone(),
            metadata.operator_id,
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::OrderOpened,
            EventPayload::OrderOpened {
                table_id: self.table.id,
                table_number: self.table.number.clone(),
                order_number: self.order_number.clone(),
                customer_name: self.customer_name.clone(),
                note: self.note.clone(),
            },
        );

        info!(
            order_id = %order_id,
            seq,
            order_number = %self.order_number,
            "OpenOrderAction::execute completed"
        );
        Ok(vec![event])
    }
}
