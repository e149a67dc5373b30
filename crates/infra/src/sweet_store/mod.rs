//! Catalog persistence boundary.
//!
//! ## Error Mapping
//!
//! | Store condition                          | `StoreError`  | HTTP (mapped by the API) |
//! |------------------------------------------|---------------|--------------------------|
//! | row missing on get/replace/delete/adjust | `NotFound`    | 404                      |
//! | unique name taken on insert/replace      | `Duplicate`   | 400                      |
//! | purchase would take quantity below zero  | `Stock`       | 400                      |
//! | stock adjustment lost every retry        | `Contention`  | 409                      |
//! | anything sqlx reports                    | `Database`    | 500                      |

use async_trait::async_trait;
use thiserror::Error;

use sweetshop_catalog::{Sweet, SweetDraft, SweetFilter};
use sweetshop_core::SweetId;
use sweetshop_inventory::StockError;

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemorySweetStore;
pub use postgres::PostgresSweetStore;

/// Catalog store operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,

    #[error("a record with this {field} already exists: {value}")]
    Duplicate { field: &'static str, value: String },

    #[error(transparent)]
    Stock(#[from] StockError),

    #[error("the record was modified concurrently, try again")]
    Contention,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Catalog records with stock-safe quantity adjustment.
///
/// ## Implementation Requirements
///
/// - `insert` and `replace` reject a `name` already used by another record
///   with `Duplicate`.
/// - `list` and `search` order by name ascending, case-insensitively.
/// - `purchase` must be safe under concurrent callers: the stored `quantity`
///   never goes below zero, and each success corresponds to exactly one
///   decrement. A failed purchase leaves the record untouched.
/// - `purchase` and `restock` return the record as it stands after the
///   adjustment.
#[async_trait]
pub trait SweetStore: Send + Sync {
    /// Persist a new record.
    async fn insert(&self, draft: SweetDraft) -> Result<Sweet, StoreError>;

    /// Replace every mutable field of an existing record.
    async fn replace(&self, id: SweetId, draft: SweetDraft) -> Result<Sweet, StoreError>;

    /// Remove a record.
    async fn delete(&self, id: SweetId) -> Result<(), StoreError>;

    /// Fetch one record.
    async fn get(&self, id: SweetId) -> Result<Sweet, StoreError>;

    /// All records, name ascending.
    async fn list(&self) -> Result<Vec<Sweet>, StoreError>;

    /// Records matching every present filter field, name ascending.
    async fn search(&self, filter: &SweetFilter) -> Result<Vec<Sweet>, StoreError>;

    /// Atomically decrement stock by `quantity`, failing without effect when
    /// not enough is available.
    async fn purchase(&self, id: SweetId, quantity: i64) -> Result<Sweet, StoreError>;

    /// Atomically increment stock by `quantity`.
    async fn restock(&self, id: SweetId, quantity: i64) -> Result<Sweet, StoreError>;
}
