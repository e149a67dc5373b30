//! Registration, login, and profile.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use sweetshop_auth::{
    Identity, RegistrationInput, User, hash_password, validate_registration, verify_password,
};
use sweetshop_infra::StoreError;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// Routes reachable without a token.
pub fn public_router() -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// Routes behind the auth middleware.
pub fn protected_router() -> Router {
    Router::new().route("/auth/profile", get(profile))
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    body: Option<Json<RegistrationInput>>,
) -> axum::response::Response {
    let input = body.map(|Json(b)| b).unwrap_or_default();

    let registration = match validate_registration(input) {
        Ok(r) => r,
        Err(fields) => return errors::validation_error(fields),
    };

    let password_hash = match hash_password(&registration.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!(error = %e, "password hashing failed");
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal error",
            );
        }
    };

    let user = User::new(registration.email, registration.username, password_hash);
    let user = match services.users.insert(user).await {
        Ok(user) => user,
        Err(StoreError::Duplicate { field, .. }) => {
            let mut fields = sweetshop_core::FieldErrors::new();
            fields.push(field, format!("A user with this {field} already exists"));
            return errors::validation_error(fields);
        }
        Err(e) => return errors::store_error_to_response(e),
    };

    let pair = match services.tokens.issue_pair(&user) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!(error = %e, "token issuance failed");
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal error",
            );
        }
    };

    (
        StatusCode::CREATED,
        Json(json!({
            "user": dto::user_to_json(&user),
            "access": pair.access,
            "refresh": pair.refresh,
        })),
    )
        .into_response()
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    body: Option<Json<dto::LoginRequest>>,
) -> axum::response::Response {
    let body = body.map(|Json(b)| b).unwrap_or_default();

    let mut fields = sweetshop_core::FieldErrors::new();
    let email = body
        .email
        .as_deref()
        .map(|e| e.trim().to_lowercase())
        .unwrap_or_default();
    if email.is_empty() {
        fields.push("email", "This field is required");
    }
    let password = body.password.unwrap_or_default();
    if password.is_empty() {
        fields.push("password", "This field is required");
    }
    if !fields.is_empty() {
        return errors::validation_error(fields);
    }

    // One message for unknown email and wrong password alike.
    let invalid = || {
        errors::json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            "Invalid email or password",
        )
    };

    let user = match services.users.find_by_email(&email).await {
        Ok(Some(user)) => user,
        Ok(None) => return invalid(),
        Err(e) => return errors::store_error_to_response(e),
    };

    if !verify_password(&password, &user.password_hash) {
        return invalid();
    }

    let pair = match services.tokens.issue_pair(&user) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!(error = %e, "token issuance failed");
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal error",
            );
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "user": dto::user_to_json(&user),
            "access": pair.access,
            "refresh": pair.refresh,
        })),
    )
        .into_response()
}

pub async fn profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
) -> axum::response::Response {
    match services.users.get(identity.user_id).await {
        Ok(user) => (StatusCode::OK, Json(dto::user_to_json(&user))).into_response(),
        // A valid token for a deleted account.
        Err(StoreError::NotFound) => {
            errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", "unknown account")
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
