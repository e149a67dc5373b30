//! Registration input validation.

use serde::Deserialize;

use sweetshop_core::FieldErrors;

pub const MAX_EMAIL_LEN: usize = 255;
pub const MAX_USERNAME_LEN: usize = 150;
pub const MIN_PASSWORD_LEN: usize = 8;

/// Raw registration body. Every field optional so missing keys surface as
/// field errors instead of a deserialization failure.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RegistrationInput {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub password2: Option<String>,
}

/// A registration that passed validation. The password is still plaintext
/// here; the caller hashes it before constructing a [`crate::User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Validate a registration body, collecting every problem per field.
///
/// - `email` is trimmed and lowercased, must look like `local@domain`, and
///   must fit in 255 chars.
/// - `username` is trimmed, non-empty, at most 150 chars.
/// - `password` must be at least 8 chars and `password2` must repeat it.
///
/// Uniqueness of email and username is the store's concern, not this
/// function's.
pub fn validate_registration(input: RegistrationInput) -> Result<Registration, FieldErrors> {
    let mut errors = FieldErrors::default();

    let email = input
        .email
        .as_deref()
        .map(|e| e.trim().to_lowercase())
        .unwrap_or_default();
    if email.is_empty() {
        errors.push("email", "This field is required.");
    } else if !looks_like_email(&email) {
        errors.push("email", "Enter a valid email address.");
    } else if email.len() > MAX_EMAIL_LEN {
        errors.push("email", "Email must be 255 characters or fewer.");
    }

    let username = input
        .username
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    if username.is_empty() {
        errors.push("username", "This field is required.");
    } else if username.len() > MAX_USERNAME_LEN {
        errors.push("username", "Username must be 150 characters or fewer.");
    }

    let password = input.password.unwrap_or_default();
    if password.is_empty() {
        errors.push("password", "This field is required.");
    } else if password.len() < MIN_PASSWORD_LEN {
        errors.push("password", "Password must be at least 8 characters.");
    }

    match input.password2 {
        None => errors.push("password2", "This field is required."),
        Some(repeat) if !password.is_empty() && repeat != password => {
            errors.push("password", "Password fields didn't match.");
        }
        Some(_) => {}
    }

    errors.into_result(Registration {
        email,
        username,
        password,
    })
}

fn looks_like_email(candidate: &str) -> bool {
    match candidate.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_input() -> RegistrationInput {
        RegistrationInput {
            email: Some("Alice@Example.COM ".to_string()),
            username: Some("alice".to_string()),
            password: Some("correct horse".to_string()),
            password2: Some("correct horse".to_string()),
        }
    }

    #[test]
    fn valid_input_normalizes_email() {
        let reg = validate_registration(full_input()).unwrap();
        assert_eq!(reg.email, "alice@example.com");
        assert_eq!(reg.username, "alice");
        assert_eq!(reg.password, "correct horse");
    }

    #[test]
    fn missing_fields_are_each_reported() {
        let errors = validate_registration(RegistrationInput::default()).unwrap_err();
        for field in ["email", "username", "password", "password2"] {
            assert!(!errors.messages_for(field).is_empty(), "missing {field}");
        }
    }

    #[test]
    fn malformed_email_is_rejected() {
        for bad in ["plainaddress", "@nodomain", "nolocal@"] {
            let input = RegistrationInput {
                email: Some(bad.to_string()),
                ..full_input()
            };
            let errors = validate_registration(input).unwrap_err();
            assert_eq!(errors.messages_for("email"), ["Enter a valid email address."]);
        }
    }

    #[test]
    fn short_password_is_rejected() {
        let input = RegistrationInput {
            password: Some("short".to_string()),
            password2: Some("short".to_string()),
            ..full_input()
        };
        let errors = validate_registration(input).unwrap_err();
        assert_eq!(
            errors.messages_for("password"),
            ["Password must be at least 8 characters."]
        );
    }

    #[test]
    fn mismatched_passwords_are_rejected() {
        let input = RegistrationInput {
            password2: Some("something else".to_string()),
            ..full_input()
        };
        let errors = validate_registration(input).unwrap_err();
        assert_eq!(
            errors.messages_for("password"),
            ["Password fields didn't match."]
        );
    }

    #[test]
    fn overlong_username_is_rejected() {
        let input = RegistrationInput {
            username: Some("u".repeat(151)),
            ..full_input()
        };
        let errors = validate_registration(input).unwrap_err();
        assert_eq!(
            errors.messages_for("username"),
            ["Username must be 150 characters or fewer."]
        );
    }
}
