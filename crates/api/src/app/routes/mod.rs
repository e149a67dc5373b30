use axum::Router;

pub mod auth;
pub mod inventory;
pub mod sweets;
pub mod system;

/// Router for all authenticated endpoints.
///
/// Catalog routes are registered at their literal paths (trailing slash
/// included); nesting would drop the slash from the collection routes.
pub fn router() -> Router {
    Router::new()
        .merge(auth::protected_router())
        .merge(sweets::router())
        .merge(inventory::router())
}
