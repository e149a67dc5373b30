//! `sweetshop-auth` — authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: the user
//! record, claims model, token codec, password hashing, capability checks
//! and registration validation live here; middleware and persistence do not.

pub mod capability;
pub mod claims;
pub mod error;
pub mod password;
pub mod tokens;
pub mod user;
pub mod validation;

pub use capability::{Identity, can_read, can_write};
pub use claims::{Claims, TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};
pub use error::AuthError;
pub use password::{hash_password, verify_password};
pub use tokens::{TokenCodec, TokenPair, extract_bearer};
pub use user::User;
pub use validation::{Registration, RegistrationInput, validate_registration};
