//! SetStatus command handler
//!
//! Moves an order to a new status. Terminal states (Paid, Cancelled) are
//! frozen. In the default permissive mode any transition between
//! non-terminal states and into the terminals is accepted; strict mode
//! enforces forward-only moves along the documented chain, with Cancelled
//! reachable from any non-terminal state.

use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderStatus};

/// SetStatus action
#[derive(Debug, Clone)]
pub struct SetStatusAction {
    pub order_id: String,
    pub status: OrderStatus,
    /// Enforce the forward chain (injected from EngineConfig)
    pub strict: bool,
}

impl CommandHandler for SetStatusAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        // 1. Load existing snapshot
        let snapshot = ctx.load_snapshot(&self.order_id)?;
        let from = snapshot.status;

        // 2. Terminal states admit no transitions, in either mode
        match from {
            OrderStatus::Paid => {
                return Err(OrderError::OrderAlreadyPaid(self.order_id.clone()));
            }
            OrderStatus::Cancelled => {
                return Err(OrderError::OrderAlreadyCancelled(self.order_id.clone()));
            }
            _ => {}
        }

        // 3. Strict mode: forward-only along the chain, skips allowed;
        //    Cancelled is reachable from any non-terminal state
        if self.strict && self.status != OrderStatus::Cancelled {
            let from_pos = from.chain_position();
            let to_pos = self.status.chain_position();
            if to_pos <= from_pos {
                return Err(OrderError::InvalidTransition {
                    from,
                    to: self.status,
                });
            }
        }

        // 4. Allocate sequence and emit
        let seq = ctx.next_sequence();
        let event = OrderEvent::new(
            seq,
            self.order_id.clone(),
            metadata.operator_id,
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::StatusChanged,
            EventPayload::StatusChanged {
                from,
                to: self.status,
            },
        );

        Ok(vec![event])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::OrderStore;
    use shared::order::OrderSnapshot;

    fn create_test_metadata() -> CommandMetadata {
        CommandMetadata {
            command_id: "cmd-1".to_string(),
            operator_id: 1,
            operator_name: "Test User".to_string(),
            timestamp: 1234567890,
        }
    }

    fn store_with_status(status: OrderStatus) -> OrderStore {
        let mut store = OrderStore::new();
        let mut snapshot = OrderSnapshot::new("order-1".to_string());
        snapshot.status = status;
        store.store_snapshot(snapshot);
        store
    }

    fn action(status: OrderStatus, strict: bool) -> SetStatusAction {
        SetStatusAction {
            order_id: "order-1".to_string(),
            status,
            strict,
        }
    }

    #[test]
    fn forward_transition_emits_status_changed() {
        let store = store_with_status(OrderStatus::Pending);
        let mut ctx = CommandContext::new(&store, 0);

        let events = action(OrderStatus::Confirmed, false)
            .execute(&mut ctx, &create_test_metadata())
            .unwrap();
        assert_eq!(events.len(), 1);
        if let EventPayload::StatusChanged { from, to } = &events[0].payload {
            assert_eq!(*from, OrderStatus::Pending);
            assert_eq!(*to, OrderStatus::Confirmed);
        } else {
            panic!("Expected StatusChanged payload");
        }
    }

    #[test]
    fn permissive_mode_allows_backward_moves() {
        let store = store_with_status(OrderStatus::Served);
        let mut ctx = CommandContext::new(&store, 0);

        // The reference workflow imposes no transition graph between
        // non-terminal states
        let result = action(OrderStatus::Pending, false).execute(&mut ctx, &create_test_metadata());
        assert!(result.is_ok());
    }

    #[test]
    fn strict_mode_rejects_backward_moves() {
        let store = store_with_status(OrderStatus::Served);
        let mut ctx = CommandContext::new(&store, 0);

        let result = action(OrderStatus::Pending, true).execute(&mut ctx, &create_test_metadata());
        assert!(matches!(
            result,
            Err(OrderError::InvalidTransition {
                from: OrderStatus::Served,
                to: OrderStatus::Pending
            })
        ));
    }

    #[test]
    fn strict_mode_allows_forward_skips() {
        let store = store_with_status(OrderStatus::Pending);
        let mut ctx = CommandContext::new(&store, 0);

        // Pending -> Served skips three states; an explicit request is honored
        let result = action(OrderStatus::Served, true).execute(&mut ctx, &create_test_metadata());
        assert!(result.is_ok());
    }

    #[test]
    fn strict_mode_allows_cancel_from_any_non_terminal() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Served,
        ] {
            let store = store_with_status(status);
            let mut ctx = CommandContext::new(&store, 0);
            let result =
                action(OrderStatus::Cancelled, true).execute(&mut ctx, &create_test_metadata());
            assert!(result.is_ok(), "cancel from {status} should be allowed");
        }
    }

    #[test]
    fn paid_order_is_frozen() {
        let store = store_with_status(OrderStatus::Paid);
        let mut ctx = CommandContext::new(&store, 0);

        let result = action(OrderStatus::Pending, false).execute(&mut ctx, &create_test_metadata());
        assert!(matches!(result, Err(OrderError::OrderAlreadyPaid(_))));
    }

    #[test]
    fn cancelled_order_is_frozen() {
        let store = store_with_status(OrderStatus::Cancelled);
        let mut ctx = CommandContext::new(&store, 0);

        let result =
            action(OrderStatus::Confirmed, false).execute(&mut ctx, &create_test_metadata());
        assert!(matches!(result, Err(OrderError::OrderAlreadyCancelled(_))));
    }

    #[test]
    fn missing_order_rejected() {
        let store = OrderStore::new();
        let mut ctx = CommandContext::new(&store, 0);

        let result =
            action(OrderStatus::Confirmed, false).execute(&mut ctx, &create_test_metadata());
        assert!(matches!(result, Err(OrderError::OrderNotFound(_))));
    }
}
