//! Sales reporting - pure aggregation over order snapshots
//!
//! Reporting owns no state: it folds paid order snapshots into totals and
//! can be recomputed any number of times with the same result.

use crate::utils::time::business_date;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use shared::models::SalesReport;
use shared::order::OrderSnapshot;

/// Aggregate paid orders over an inclusive business-date range.
///
/// An order counts when it is paid and its settlement date (derived from
/// `end_time`) falls within `[start_date, end_date]`. The average order
/// value is 0 when no orders match; there is no division fault.
pub fn sales_summary<'a, I>(orders: I, start_date: &str, end_date: &str) -> SalesReport
where
    I: IntoIterator<Item = &'a OrderSnapshot>,
{
    let mut total_orders: i64 = 0;
    let mut total_revenue = Decimal::ZERO;

    for order in orders {
        if !order.is_paid() {
            continue;
        }
        let settled_at = order.end_time.unwrap_or(order.updated_at);
        let date = business_date(settled_at);
        if date.as_str() < start_date || date.as_str() > end_date {
            continue;
        }
        total_orders += 1;
        total_revenue += Decimal::from_f64_retain(order.total_amount).unwrap_or(Decimal::ZERO);
    }

    let average = if total_orders == 0 {
        Decimal::ZERO
    } else {
        total_revenue / Decimal::from(total_orders)
    };

    SalesReport {
        start_date: start_date.to_string(),
        end_date: end_date.to_string(),
        total_orders,
        total_revenue: total_revenue.round_dp(2).to_f64().unwrap_or(0.0),
        average_order_value: average.round_dp(2).to_f64().unwrap_or(0.0),
    }
}
