//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to
//! `f64` for storage/serialization. Validation lives here too so every
//! action applies the same bounds.

use crate::orders::traits::OrderError;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use shared::order::{OrderLineInput, OrderSnapshot, PaymentInput};

/// Rounding strategy for monetary values (2 decimal places)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed unit price
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i32 = 9999;
/// Maximum allowed payment amount
const MAX_PAYMENT_AMOUNT: f64 = 1_000_000.0;

/// Convert an f64 to Decimal for arithmetic
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64_retain(value).unwrap_or(Decimal::ZERO)
}

/// Convert a Decimal back to f64, rounded to monetary precision
pub fn to_f64(value: Decimal) -> f64 {
    value.round_dp(DECIMAL_PLACES).to_f64().unwrap_or(0.0)
}

/// Validate that an f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> Result<(), OrderError> {
    if !value.is_finite() {
        return Err(OrderError::InvalidOperation(format!(
            "{field_name} must be a finite number, got {value}"
        )));
    }
    Ok(())
}

/// Validate a line input before pricing
pub fn validate_line_input(line: &OrderLineInput) -> Result<(), OrderError> {
    if line.quantity < 1 {
        return Err(OrderError::InvalidQuantity(line.quantity));
    }
    if line.quantity > MAX_QUANTITY {
        return Err(OrderError::InvalidQuantity(line.quantity));
    }
    Ok(())
}

/// Validate a catalog price before snapshotting it onto a line
pub fn validate_price(price: f64) -> Result<(), OrderError> {
    require_finite(price, "price")?;
    if price < 0.0 {
        return Err(OrderError::InvalidOperation(format!(
            "price must be non-negative, got {price}"
        )));
    }
    if price > MAX_PRICE {
        return Err(OrderError::InvalidOperation(format!(
            "price exceeds maximum allowed ({MAX_PRICE}), got {price}"
        )));
    }
    Ok(())
}

/// Validate a payment input (finite, positive, within bounds)
pub fn validate_payment(payment: &PaymentInput) -> Result<(), OrderError> {
    if !payment.amount.is_finite() {
        return Err(OrderError::InvalidAmount);
    }
    if payment.amount <= 0.0 {
        return Err(OrderError::InvalidAmount);
    }
    if payment.amount > MAX_PAYMENT_AMOUNT {
        return Err(OrderError::InvalidAmount);
    }
    Ok(())
}

/// Line total: unit_price × quantity, at monetary precision
pub fn line_total(unit_price: f64, quantity: i32) -> f64 {
    to_f64(to_decimal(unit_price) * Decimal::from(quantity))
}

/// Recalculate every line total and the order total.
///
/// This is the single place where the total-reconciliation invariant is
/// maintained: `total_amount` always equals the sum of `quantity ×
/// unit_price` over the remaining lines.
pub fn recalculate_totals(snapshot: &mut OrderSnapshot) {
    let mut total = Decimal::ZERO;
    for line in &mut snapshot.lines {
        let amount = to_decimal(line.unit_price) * Decimal::from(line.quantity);
        line.line_total = to_f64(amount);
        total += amount;
    }
    snapshot.total_amount = to_f64(total);
}
