//! `sweetshop-inventory` — the stock adjustment engine.
//!
//! Pure decision rules for purchase/restock plus their receipt types. The
//! rules here are the single source of truth for the quantity invariant
//! (`0 <= quantity`); storage adapters run them under whatever serialization
//! primitive they have (a mutex, or a conditional single-statement update).

pub mod receipt;
pub mod stock;

pub use receipt::{PurchaseReceipt, RestockReceipt};
pub use stock::{
    DEFAULT_PURCHASE_QUANTITY, DEFAULT_RESTOCK_QUANTITY, StockError, plan_purchase, plan_restock,
};
