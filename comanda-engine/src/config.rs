//! Engine configuration

/// Workflow engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Enforce the forward status chain (Pending → Confirmed → Preparing →
    /// Ready → Served → Paid, Cancelled from any non-terminal state).
    /// Off by default: the workflow accepts any transition between
    /// non-terminal states, matching the reference behavior; terminal states
    /// are frozen either way.
    pub strict_status_transitions: bool,
    /// Emit low/out-of-stock alerts when consumption crosses a threshold
    pub enable_stock_alerts: bool,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self {
            strict_status_transitions: std::env::var("STRICT_STATUS_TRANSITIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_stock_alerts: std::env::var("ENABLE_STOCK_ALERTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }

    /// Enable strict forward-only status transitions
    pub fn with_strict_transitions(mut self, strict: bool) -> Self {
        self.strict_status_transitions = strict;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strict_status_transitions: false,
            enable_stock_alerts: true,
        }
    }
}
