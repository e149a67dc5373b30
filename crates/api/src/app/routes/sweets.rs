//! Catalog CRUD and search.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use sweetshop_auth::{Identity, can_read, can_write};
use sweetshop_catalog::{SweetInput, validate_sweet_input};
use sweetshop_core::SweetId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/sweets/", get(list).post(create))
        .route("/sweets/search/", get(search))
        .route("/sweets/:id/", get(retrieve).put(replace).delete(remove))
}

pub(super) fn parse_id(raw: &str) -> Result<SweetId, axum::response::Response> {
    raw.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid sweet id")
    })
}

pub(super) fn require_read(identity: &Identity) -> Result<(), axum::response::Response> {
    if can_read(identity) {
        Ok(())
    } else {
        Err(errors::json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            "read capability required",
        ))
    }
}

pub(super) fn require_admin(identity: &Identity) -> Result<(), axum::response::Response> {
    if can_write(identity) {
        Ok(())
    } else {
        Err(errors::json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            "admin capability required",
        ))
    }
}

pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
) -> axum::response::Response {
    if let Err(response) = require_read(&identity) {
        return response;
    }

    match services.sweets.list().await {
        Ok(sweets) => {
            let items: Vec<_> = sweets.iter().map(dto::sweet_to_json).collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn search(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<dto::SearchQuery>,
) -> axum::response::Response {
    if let Err(response) = require_read(&identity) {
        return response;
    }

    let filter = match dto::parse_search_query(query) {
        Ok(filter) => filter,
        Err(response) => return response,
    };

    match services.sweets.search(&filter).await {
        Ok(sweets) => {
            let items: Vec<_> = sweets.iter().map(dto::sweet_to_json).collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn retrieve(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(response) = require_read(&identity) {
        return response;
    }

    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match services.sweets.get(id).await {
        Ok(sweet) => (StatusCode::OK, Json(dto::sweet_to_json(&sweet))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    body: Option<Json<SweetInput>>,
) -> axum::response::Response {
    if let Err(response) = require_admin(&identity) {
        return response;
    }

    let input = body.map(|Json(b)| b).unwrap_or_default();
    let draft = match validate_sweet_input(input) {
        Ok(draft) => draft,
        Err(fields) => return errors::validation_error(fields),
    };

    match services.sweets.insert(draft).await {
        Ok(sweet) => (StatusCode::CREATED, Json(dto::sweet_to_json(&sweet))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn replace(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    body: Option<Json<SweetInput>>,
) -> axum::response::Response {
    if let Err(response) = require_admin(&identity) {
        return response;
    }

    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let input = body.map(|Json(b)| b).unwrap_or_default();
    let draft = match validate_sweet_input(input) {
        Ok(draft) => draft,
        Err(fields) => return errors::validation_error(fields),
    };

    match services.sweets.replace(id, draft).await {
        Ok(sweet) => (StatusCode::OK, Json(dto::sweet_to_json(&sweet))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn remove(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(response) = require_admin(&identity) {
        return response;
    }

    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match services.sweets.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
