//! HS256 token codec: issues access/refresh pairs and verifies access tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::claims::{Claims, TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};
use crate::error::AuthError;
use crate::user::User;

/// An access/refresh token pair, issued together on register and login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Issues and verifies bearer tokens for one signing secret.
pub struct TokenCodec {
    secret: Vec<u8>,
    access_lifetime_secs: i64,
    refresh_lifetime_secs: i64,
}

impl TokenCodec {
    pub fn new(secret: impl Into<Vec<u8>>, access_lifetime_secs: i64, refresh_lifetime_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            access_lifetime_secs,
            refresh_lifetime_secs,
        }
    }

    /// Issue a fresh access/refresh pair for an authenticated user.
    pub fn issue_pair(&self, user: &User) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access: self.issue(user, TOKEN_TYPE_ACCESS, self.access_lifetime_secs)?,
            refresh: self.issue(user, TOKEN_TYPE_REFRESH, self.refresh_lifetime_secs)?,
        })
    }

    fn issue(&self, user: &User, token_type: &str, lifetime_secs: i64) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            is_admin: user.is_admin,
            token_type: token_type.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(lifetime_secs)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    /// Verify signature and expiry, returning the claims.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &Validation::default(),
        )
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(data.claims)
    }

    /// Verify a token and require it to be an access token.
    ///
    /// Refresh tokens are never accepted for API requests.
    pub fn decode_access(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = self.decode(token)?;
        if !claims.is_access() {
            return Err(AuthError::WrongTokenType {
                expected: TOKEN_TYPE_ACCESS,
            });
        }
        Ok(claims)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn extract_bearer(header: &str) -> Option<&str> {
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new("test-secret".as_bytes().to_vec(), 3600, 86_400)
    }

    fn user(is_admin: bool) -> User {
        let mut user = User::new(
            "alice@example.com".to_string(),
            "alice".to_string(),
            "$argon2id$fake".to_string(),
        );
        user.is_admin = is_admin;
        user
    }

    #[test]
    fn access_token_round_trips() {
        let codec = codec();
        let user = user(true);

        let pair = codec.issue_pair(&user).unwrap();
        let claims = codec.decode_access(&pair.access).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "alice@example.com");
        assert!(claims.is_admin);
        assert_eq!(claims.token_type, TOKEN_TYPE_ACCESS);
    }

    #[test]
    fn refresh_tokens_are_rejected_as_access_tokens() {
        let codec = codec();
        let pair = codec.issue_pair(&user(false)).unwrap();

        let err = codec.decode_access(&pair.refresh).unwrap_err();
        assert_eq!(
            err,
            AuthError::WrongTokenType {
                expected: TOKEN_TYPE_ACCESS
            }
        );
    }

    #[test]
    fn tokens_from_another_secret_are_rejected() {
        let pair = codec().issue_pair(&user(false)).unwrap();

        let other = TokenCodec::new("other-secret".as_bytes().to_vec(), 3600, 86_400);
        assert!(matches!(
            other.decode_access(&pair.access),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        // Well past the decoder's default leeway.
        let expired = TokenCodec::new("test-secret".as_bytes().to_vec(), -600, -600);
        let pair = expired.issue_pair(&user(false)).unwrap();

        assert!(matches!(
            codec().decode_access(&pair.access),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn bearer_extraction() {
        assert_eq!(extract_bearer("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_bearer("Bearer   "), None);
        assert_eq!(extract_bearer("Basic abc"), None);
    }
}
