use crate::orders::traits::OrderError;
use shared::order::{CommandError, CommandErrorCode};
use thiserror::Error;

/// Manager errors
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(transparent)]
    Order(#[from] OrderError),

    #[error("Table not found: {0}")]
    TableNotFound(i64),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error code for an action-level failure (the frontend localizes by code)
fn classify_order_error(err: &OrderError) -> CommandErrorCode {
    match err {
        OrderError::OrderNotFound(_) => CommandErrorCode::OrderNotFound,
        OrderError::ItemNotFound(_) => CommandErrorCode::ItemNotFound,
        OrderError::LineNotFound(_) => CommandErrorCode::LineNotFound,
        OrderError::ItemUnavailable(_) => CommandErrorCode::ItemUnavailable,
        OrderError::TableUnavailable(_) => CommandErrorCode::TableUnavailable,
        OrderError::InvalidQuantity(_) => CommandErrorCode::InvalidQuantity,
        OrderError::InvalidAmount => CommandErrorCode::InvalidAmount,
        OrderError::InsufficientPayment { .. } => CommandErrorCode::InsufficientPayment,
        OrderError::OrderAlreadyPaid(_) => CommandErrorCode::OrderAlreadyPaid,
        OrderError::OrderAlreadyCancelled(_) => CommandErrorCode::OrderAlreadyCancelled,
        OrderError::InvalidTransition { .. } => CommandErrorCode::InvalidStatusTransition,
        OrderError::LinesLocked(_) => CommandErrorCode::LinesLocked,
        OrderError::InvalidOperation(_) => CommandErrorCode::InvalidOperation,
    }
}

impl From<ManagerError> for CommandError {
    fn from(err: ManagerError) -> Self {
        let (code, message) = match &err {
            ManagerError::Order(order_err) => (classify_order_error(order_err), err.to_string()),
            ManagerError::TableNotFound(_) => (CommandErrorCode::TableNotFound, err.to_string()),
            ManagerError::OrderNotFound(_) => (CommandErrorCode::OrderNotFound, err.to_string()),
            ManagerError::Internal(_) => (CommandErrorCode::InternalError, err.to_string()),
        };
        CommandError::new(code, message)
    }
}

pub type ManagerResult<T> = Result<T, ManagerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCategory;
    use shared::order::OrderStatus;

    #[test]
    fn order_errors_map_to_codes() {
        let err = ManagerError::from(OrderError::InsufficientPayment {
            offered: 1000.0,
            required: 1500.0,
        });
        let command_error = CommandError::from(err);
        assert_eq!(command_error.code, CommandErrorCode::InsufficientPayment);
        assert!(command_error.message.contains("1000.00"));
    }

    #[test]
    fn transition_errors_are_state_failures() {
        let err = ManagerError::from(OrderError::InvalidTransition {
            from: OrderStatus::Paid,
            to: OrderStatus::Pending,
        });
        let command_error = CommandError::from(err);
        assert_eq!(
            command_error.code,
            CommandErrorCode::InvalidStatusTransition
        );
        assert_eq!(command_error.code.category(), ErrorCategory::State);
    }

    #[test]
    fn table_not_found_maps_to_not_found() {
        let command_error = CommandError::from(ManagerError::TableNotFound(42));
        assert_eq!(command_error.code, CommandErrorCode::TableNotFound);
        assert_eq!(command_error.code.category(), ErrorCategory::NotFound);
    }
}
