use thiserror::Error;

/// Authentication failures.
///
/// `InvalidCredentials` deliberately carries one message for both unknown
/// email and wrong password so callers cannot probe which accounts exist.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("expected an {expected} token")]
    WrongTokenType { expected: &'static str },

    #[error("failed to hash password")]
    PasswordHashing,
}
