//! LinesAdded event applier
//!
//! Adds lines to the snapshot and recomputes totals.

use crate::orders::money;
use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderLine, OrderSnapshot};

/// LinesAdded applier
pub struct LinesAddedApplier;

impl EventApplier for LinesAddedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::LinesAdded { lines } = &event.payload {
            // Add lines to snapshot (merge equal item + price + instructions)
            for line in lines {
                add_or_merge_line(snapshot, line);
            }

            // Update sequence and timestamp
            snapshot.last_sequence = event.sequence;
            snapshot.updated_at = event.timestamp;

            // Recalculate totals using precise decimal arithmetic
            money::recalculate_totals(snapshot);

            // Update checksum
            snapshot.update_checksum();
        }
    }
}

/// Add a line to the snapshot, merging into an existing line when the menu
/// item, frozen unit price, and instructions all match.
pub(crate) fn add_or_merge_line(snapshot: &mut OrderSnapshot, line: &OrderLine) {
    if let Some(existing) = snapshot.lines.iter_mut().find(|l| {
        l.menu_item_id == line.menu_item_id
            && l.unit_price == line.unit_price
            && l.instructions == line.instructions
    }) {
        // Merge by adding quantity
        existing.quantity += line.quantity;
    } else {
        // Add new line
        snapshot.lines.push(line.clone());
    }
}
