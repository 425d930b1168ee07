//! Sales Report Model

use serde::{Deserialize, Serialize};

/// Aggregated sales figures over an inclusive business-date range.
///
/// Derived data: recomputed from paid order snapshots, never stored by the
/// engine itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesReport {
    /// Range start, `YYYY-MM-DD` inclusive
    pub start_date: String,
    /// Range end, `YYYY-MM-DD` inclusive
    pub end_date: String,
    pub total_orders: i64,
    pub total_revenue: f64,
    /// 0 when `total_orders` is 0 (not a division fault)
    pub average_order_value: f64,
}
