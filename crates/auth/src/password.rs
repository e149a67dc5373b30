//! Password hashing with argon2id.
//!
//! Hashes are stored as PHC strings, so the salt and parameters travel with
//! the hash and verification needs no external state.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::AuthError;

/// Hash a plaintext password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHashing)
}

/// Check a plaintext password against a stored PHC hash string.
///
/// An unparseable stored hash verifies as false rather than erroring, so a
/// corrupted row behaves like a wrong password.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_verifies() {
        let hash = hash_password("hunter2hunter2").unwrap();
        assert!(verify_password("hunter2hunter2", &hash));
    }

    #[test]
    fn wrong_password_fails() {
        let hash = hash_password("hunter2hunter2").unwrap();
        assert!(!verify_password("hunter3hunter3", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same-password").unwrap();
        let b = hash_password("same-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_stored_hash_is_a_mismatch() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
