//! Account persistence boundary.

use async_trait::async_trait;

use sweetshop_auth::User;
use sweetshop_core::UserId;

use crate::sweet_store::StoreError;

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryUserStore;
pub use postgres::PostgresUserStore;

/// Account records, keyed by id and unique on email and username.
///
/// `insert` rejects an email or username already held by another account with
/// `Duplicate`, naming the offending field.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: User) -> Result<User, StoreError>;

    /// Look up an account by login email (already lowercased by validation).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn get(&self, id: UserId) -> Result<User, StoreError>;

    /// Grant or revoke the admin capability.
    async fn set_admin(&self, id: UserId, is_admin: bool) -> Result<User, StoreError>;
}
