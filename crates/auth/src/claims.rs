use serde::{Deserialize, Serialize};

use sweetshop_core::UserId;

use crate::capability::Identity;

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

/// JWT claims model.
///
/// The minimal set of claims the API needs once a token has been decoded and
/// verified: who the caller is, whether they hold the admin capability, and
/// the usual time window. `token_type` distinguishes access tokens (the only
/// kind accepted by the request middleware) from refresh tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: UserId,

    /// Login email at issuance time.
    pub email: String,

    /// Admin capability flag at issuance time.
    pub is_admin: bool,

    /// "access" or "refresh".
    pub token_type: String,

    /// Issued-at (Unix timestamp).
    pub iat: i64,

    /// Expiration (Unix timestamp).
    pub exp: i64,
}

impl Claims {
    pub fn is_access(&self) -> bool {
        self.token_type == TOKEN_TYPE_ACCESS
    }

    /// The request identity these claims vouch for.
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.sub,
            email: self.email.clone(),
            is_admin: self.is_admin,
        }
    }
}
