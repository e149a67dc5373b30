//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: store and token-codec wiring (in-memory or Postgres)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use crate::middleware;
use services::AppServices;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router over already-wired services.
pub fn app_with_services(services: Arc<AppServices>) -> Router {
    let auth_state = middleware::AuthState {
        tokens: Arc::clone(&services.tokens),
    };

    // Protected routes: everything behind bearer auth.
    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::auth::public_router())
        .merge(protected)
        .layer(Extension(services))
}
