//! Event applier implementations
//!
//! Each applier implements the `EventApplier` trait and handles one specific
//! event type. Appliers are PURE functions: replaying the same events always
//! reproduces the same snapshot, which is what `rebuild_snapshot` relies on.

use enum_dispatch::enum_dispatch;

use crate::orders::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent};

mod line_removed;
mod lines_added;
mod order_opened;
mod payment_processed;
mod status_changed;

pub use line_removed::LineRemovedApplier;
pub use lines_added::LinesAddedApplier;
pub use order_opened::OrderOpenedApplier;
pub use payment_processed::PaymentProcessedApplier;
pub use status_changed::StatusChangedApplier;

/// EventAction enum - dispatches to concrete applier implementations
///
/// Uses enum_dispatch for zero-cost static dispatch.
#[enum_dispatch(EventApplier)]
pub enum EventAction {
    OrderOpened(OrderOpenedApplier),
    LinesAdded(LinesAddedApplier),
    LineRemoved(LineRemovedApplier),
    StatusChanged(StatusChangedApplier),
    PaymentProcessed(PaymentProcessedApplier),
}

/// Convert OrderEvent reference to EventAction
///
/// This is the ONLY place with a match on EventPayload.
impl From<&OrderEvent> for EventAction {
    fn from(event: &OrderEvent) -> Self {
        match &event.payload {
            EventPayload::OrderOpened { .. } => EventAction::OrderOpened(OrderOpenedApplier),
            EventPayload::LinesAdded { .. } => EventAction::LinesAdded(LinesAddedApplier),
            EventPayload::LineRemoved { .. } => EventAction::LineRemoved(LineRemovedApplier),
            EventPayload::StatusChanged { .. } => EventAction::StatusChanged(StatusChangedApplier),
            EventPayload::PaymentProcessed { .. } => {
                EventAction::PaymentProcessed(PaymentProcessedApplier)
            }
        }
    }
}
