//! `sweetshop-infra` — persistence adapters.
//!
//! Each store is a trait with two implementations: an in-memory one for tests
//! and development, and a Postgres one for production. Handlers only ever see
//! the traits.

pub mod sweet_store;
pub mod user_store;

pub use sweet_store::{StoreError, SweetStore};
pub use user_store::UserStore;

/// Embedded schema migrations, applied at startup by the Postgres adapters.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");
