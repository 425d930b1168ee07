//! Command action implementations
//!
//! Each action implements the `CommandHandler` trait and handles one
//! specific command type. Actions validate, then emit events; they never
//! mutate state themselves, so a failing action leaves nothing behind.

use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{OrderCommand, OrderCommandPayload, OrderEvent};

mod add_lines;
mod open_order;
mod process_payment;
mod remove_line;
mod set_status;

pub use add_lines::AddLinesAction;
pub use open_order::OpenOrderAction;
pub use process_payment::ProcessPaymentAction;
pub use remove_line::RemoveLineAction;
pub use set_status::SetStatusAction;

/// CommandAction enum - dispatches to concrete action implementations
pub enum CommandAction {
    OpenOrder(OpenOrderAction),
    AddLines(AddLinesAction),
    RemoveLine(RemoveLineAction),
    SetStatus(SetStatusAction),
    ProcessPayment(ProcessPaymentAction),
}

impl CommandHandler for CommandAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        match self {
            CommandAction::OpenOrder(action) => action.execute(ctx, metadata),
            CommandAction::AddLines(action) => action.execute(ctx, metadata),
            CommandAction::RemoveLine(action) => action.execute(ctx, metadata),
            CommandAction::SetStatus(action) => action.execute(ctx, metadata),
            CommandAction::ProcessPayment(action) => action.execute(ctx, metadata),
        }
    }
}

/// Convert OrderCommand to CommandAction
///
/// This is the ONLY place with a match on OrderCommandPayload. Commands
/// needing resolved catalog data or config (OpenOrder, AddLines, SetStatus)
/// are built by the OrdersManager instead.
impl From<&OrderCommand> for CommandAction {
    fn from(cmd: &OrderCommand) -> Self {
        match &cmd.payload {
            OrderCommandPayload::OpenOrder { .. } => {
                // OpenOrder needs the resolved table and a pre-generated
                // order number from the OrdersManager
                unreachable!("OpenOrder is built by OrdersManager, not From<&OrderCommand>")
            }
            OrderCommandPayload::AddLines { .. } => {
                // AddLines needs resolved menu items from the catalog
                unreachable!("AddLines is built by OrdersManager, not From<&OrderCommand>")
            }
            OrderCommandPayload::SetStatus { .. } => {
                // SetStatus needs the transition mode from EngineConfig
                unreachable!("SetStatus is built by OrdersManager, not From<&OrderCommand>")
            }
            OrderCommandPayload::RemoveLine {
                order_id,
                line_id,
                quantity,
            } => CommandAction::RemoveLine(RemoveLineAction {
                order_id: order_id.clone(),
                line_id: line_id.clone(),
                quantity: *quantity,
            }),
            OrderCommandPayload::ProcessPayment { order_id, payment } => {
                CommandAction::ProcessPayment(ProcessPaymentAction {
                    order_id: order_id.clone(),
                    payment: payment.clone(),
                })
            }
        }
    }
}
