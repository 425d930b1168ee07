//! PaymentProcessed event applier
//!
//! Records the settlement on the snapshot. The companion StatusChanged event
//! in the same bundle moves the order to Paid.

use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot, PaymentRecord};

/// PaymentProcessed applier
pub struct PaymentProcessedApplier;

impl EventApplier for PaymentProcessedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::PaymentProcessed {
            payment_id,
            method,
            amount,
            change,
        } = &event.payload
        {
            snapshot.payment = Some(PaymentRecord {
                payment_id: payment_id.clone(),
                method: method.clone(),
                amount: *amount,
                change: *change,
                timestamp: event.timestamp,
            });
            snapshot.last_sequence = event.sequence;
            snapshot.updated_at = event.timestamp;
            snapshot.update_checksum();
        }
    }
}
