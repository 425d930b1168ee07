//! LineRemoved event applier
//!
//! Removes a line (or part of its quantity) and recomputes totals.

use crate::orders::money;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// LineRemoved applier
pub struct LineRemovedApplier;

impl EventApplier for LineRemovedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::LineRemoved {
            line_id, quantity, ..
        } = &event.payload
        {
            if let Some(pos) = snapshot.lines.iter().position(|l| l.line_id == *line_id) {
                match quantity {
                    Some(q) if *q < snapshot.lines[pos].quantity => {
                        snapshot.lines[pos].quantity -= q;
                    }
                    // Whole line, or the full remaining quantity
                    _ => {
                        snapshot.lines.remove(pos);
                    }
                }
            }

            snapshot.last_sequence = event.sequence;
            snapshot.updated_at = event.timestamp;
            money::recalculate_totals(snapshot);
            snapshot.update_checksum();
        }
    }
}
