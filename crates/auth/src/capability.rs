//! Capability checks.
//!
//! Two levels exist: "authenticated" (any valid session) and "admin".
//! Framework permission objects are replaced by pure functions over the
//! authenticated identity; the table is:
//!
//! | operation                         | capability    |
//! |-----------------------------------|---------------|
//! | catalog reads, search, purchase   | authenticated |
//! | catalog writes, restock           | admin         |

use serde::{Deserialize, Serialize};

use sweetshop_core::UserId;

/// The authenticated identity attached to a request.
///
/// Derived from verified token claims; holding a value of this type already
/// proves authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub email: String,
    pub is_admin: bool,
}

/// Any authenticated identity may read the catalog (and purchase).
pub fn can_read(_identity: &Identity) -> bool {
    true
}

/// Only admin identities may write the catalog (and restock).
pub fn can_write(identity: &Identity) -> bool {
    identity.is_admin
}
