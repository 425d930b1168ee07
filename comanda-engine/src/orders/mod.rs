//! Order workflow module
//!
//! The order workflow is event-sourced:
//!
//! - **manager**: OrdersManager for command processing and event generation
//! - **actions**: one handler per command; validation happens here, before
//!   any mutation
//! - **appliers**: pure functions folding events into snapshots
//! - **money**: precise decimal arithmetic for totals and payments
//!
//! # Command Flow
//!
//! ```text
//! execute_command(cmd)
//!     ├─ 1. Idempotency check (command_id)
//!     ├─ 2. Acquire store write guard
//!     ├─ 3. Resolve catalog references, build action
//!     ├─ 4. Execute action → events (fails without mutation)
//!     ├─ 5. Apply events to snapshots via EventApplier
//!     ├─ 6. Commit snapshots and event log
//!     ├─ 7. Entity side effects (table occupancy, inventory consumption)
//!     ├─ 8. Mark command processed
//!     ├─ 9. Broadcast event(s)
//!     └─ 10. Return response
//! ```

pub mod actions;
pub mod appliers;
pub mod manager;
pub mod money;
pub mod traits;

// Re-exports
pub use manager::OrdersManager;

// Re-export shared types for convenience
pub use shared::order::{
    CommandError, CommandErrorCode, CommandResponse, EventPayload, OrderCommand,
    OrderCommandPayload, OrderEvent, OrderEventType, OrderSnapshot, OrderStatus,
};
