//! OrderOpened event applier
//!
//! Initializes the snapshot from the opening event.

use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot, OrderStatus};

/// OrderOpened applier
pub struct OrderOpenedApplier;

impl EventApplier for OrderOpenedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::OrderOpened {
            table_id,
            table_number,
            order_number,
            customer_name,
            note,
        } = &event.payload
        {
            snapshot.table_id = *table_id;
            snapshot.table_number = table_number.clone();
            snapshot.order_number = order_number.clone();
            snapshot.customer_name = customer_name.clone();
            snapshot.note = note.clone();
            snapshot.status = OrderStatus::Pending;
            snapshot.total_amount = 0.0;
            snapshot.start_time = event.timestamp;
            snapshot.created_at = event.timestamp;
            snapshot.updated_at = event.timestamp;
            snapshot.last_sequence = event.sequence;
            snapshot.update_checksum();
        }
    }
}
