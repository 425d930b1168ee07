//! StatusChanged event applier
//!
//! Moves the snapshot to the recorded status; terminal transitions stamp the
//! end time.

use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// StatusChanged applier
pub struct StatusChangedApplier;

impl EventApplier for StatusChangedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::StatusChanged { to, .. } = &event.payload {
            snapshot.status = *to;
            if to.is_terminal() {
                snapshot.end_time = Some(event.timestamp);
            }
            snapshot.last_sequence = event.sequence;
            snapshot.updated_at = event.timestamp;
            snapshot.update_checksum();
        }
    }
}
