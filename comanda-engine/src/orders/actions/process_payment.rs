//! ProcessPayment command handler
//!
//! Settles an order. A payment covering the total is recorded and the order
//! moves to Paid in the same command; the table release happens as the
//! manager's side effect of the status change.

use uuid::Uuid;

use crate::orders::money::{MONEY_TOLERANCE, to_decimal, to_f64, validate_payment};
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use rust_decimal::Decimal;
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderStatus, PaymentInput};

/// ProcessPayment action
#[derive(Debug, Clone)]
pub struct ProcessPaymentAction {
    pub order_id: String,
    pub payment: PaymentInput,
}

impl CommandHandler for ProcessPaymentAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        // 1. Validate payment input (finite, positive, within bounds)
        validate_payment(&self.payment)?;

        // 2. Load existing snapshot; terminal orders cannot be paid
        let snapshot = ctx.load_snapshot(&self.order_id)?;
        match snapshot.status {
            OrderStatus::Paid => {
                return Err(OrderError::OrderAlreadyPaid(self.order_id.clone()));
            }
            OrderStatus::Cancelled => {
                return Err(OrderError::OrderAlreadyCancelled(self.order_id.clone()));
            }
            _ => {}
        }

        // 3. The amount must cover the total
        let total = to_decimal(snapshot.total_amount);
        let amount = to_decimal(self.payment.amount);
        if amount + MONEY_TOLERANCE < total {
            return Err(OrderError::InsufficientPayment {
                offered: self.payment.amount,
                required: snapshot.total_amount,
            });
        }

        // 4. Change for over-tendered payments (never negative)
        let change = to_f64((amount - total).max(Decimal::ZERO));

        // 5. Emit payment + status change as one atomic bundle
        let payment_seq = ctx.next_sequence();
        let payment_event = OrderEvent::new(
            payment_seq,
            self.order_id.clone(),
            metadata.operator_id,
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::PaymentProcessed,
            EventPayload::PaymentProcessed {
                payment_id: Uuid::new_v4().to_string(),
                method: self.payment.method.clone(),
                amount: self.payment.amount,
                change,
            },
        );

        let status_seq = ctx.next_sequence();
        let status_event = OrderEvent::new(
            status_seq,
            self.order_id.clone(),
            metadata.operator_id,
            metadata.operator_name.clone(),
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            OrderEventType::StatusChanged,
            EventPayload::StatusChanged {
                from: snapshot.status,
                to: OrderStatus::Paid,
            },
        );

        Ok(vec![payment_event, status_event])
    }
}
