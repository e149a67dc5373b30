use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use sweetshop_auth::{TokenCodec, extract_bearer};

use crate::app::errors;

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<TokenCodec>,
}

/// Require a valid bearer access token; on success, the request gains an
/// [`sweetshop_auth::Identity`] extension.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = bearer_token(req.headers())?;

    let claims = state.tokens.decode_access(token).map_err(|_| {
        errors::json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "invalid or expired token",
        )
    })?;

    req.extensions_mut().insert(claims.identity());

    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, Response> {
    let unauthorized = || {
        errors::json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "authentication credentials were not provided",
        )
    };

    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(unauthorized)?;

    let header = header.to_str().map_err(|_| unauthorized())?;

    extract_bearer(header).ok_or_else(unauthorized)
}
