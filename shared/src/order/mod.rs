//! Order workflow types
//!
//! The order workflow is event-sourced: callers submit an [`OrderCommand`],
//! the engine validates it and records immutable [`OrderEvent`]s, and pure
//! appliers fold events into the [`OrderSnapshot`] read model. These types
//! are shared so the embedding application can consume events and snapshots
//! without depending on the engine crate.

pub mod command;
pub mod event;
pub mod snapshot;
pub mod types;

// Re-exports
pub use command::{OrderCommand, OrderCommandPayload};
pub use event::{EventPayload, OrderEvent, OrderEventType};
pub use snapshot::{OrderSnapshot, OrderStatus};
pub use types::{
    CommandError, CommandErrorCode, CommandResponse, OrderLine, OrderLineInput, PaymentInput,
    PaymentRecord,
};
