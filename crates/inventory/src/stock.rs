//! Purchase/restock decision rules.

use thiserror::Error;

/// Units purchased when the request omits a quantity.
pub const DEFAULT_PURCHASE_QUANTITY: i64 = 1;

/// Units added when a restock request omits a quantity.
pub const DEFAULT_RESTOCK_QUANTITY: i64 = 10;

/// Business-rule rejections for stock adjustments.
///
/// These are terminal: the caller gets the rejection, nothing is retried and
/// nothing is persisted. The two purchase failures are deliberately distinct
/// so "none left at all" and "not enough left" read differently.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StockError {
    #[error("{name} is currently out of stock")]
    OutOfStock { name: String },

    #[error("Insufficient stock. Only {available} units available")]
    InsufficientStock { available: i64, requested: i64 },
}

/// Decide a purchase against the currently observed quantity.
///
/// Checks run in order: out-of-stock first (a dedicated error, regardless of
/// how much was requested), then insufficiency. On success returns the
/// remaining quantity after the decrement.
///
/// Callers must have validated `requested > 0` already; positivity is an
/// input-validation concern, not a stock rule.
pub fn plan_purchase(name: &str, available: i64, requested: i64) -> Result<i64, StockError> {
    if available == 0 {
        return Err(StockError::OutOfStock {
            name: name.to_string(),
        });
    }
    if requested > available {
        return Err(StockError::InsufficientStock {
            available,
            requested,
        });
    }
    Ok(available - requested)
}

/// Decide a restock: unconditional, no upper bound.
///
/// Returns the new quantity, saturating at `i64::MAX`.
pub fn plan_restock(current: i64, added: i64) -> i64 {
    current.saturating_add(added)
}
