//! The account record.

use chrono::{DateTime, Utc};

use sweetshop_core::UserId;

/// An account able to authenticate and, optionally, hold admin capability.
///
/// # Invariants
/// - `email` and `username` are each globally unique (enforced by the store).
/// - `password_hash` is an argon2 PHC string; the plaintext password is never
///   persisted or logged.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Assemble a new non-admin account from validated registration data and
    /// an already-computed password hash.
    pub fn new(email: String, username: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            email,
            username,
            password_hash,
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }
}
