//! Stock adjustment endpoints: purchase and restock.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde_json::json;

use sweetshop_auth::Identity;
use sweetshop_inventory::{
    DEFAULT_PURCHASE_QUANTITY, DEFAULT_RESTOCK_QUANTITY, PurchaseReceipt, RestockReceipt,
};

use crate::app::routes::sweets::{parse_id, require_admin, require_read};
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/sweets/:id/purchase/", post(purchase))
        .route("/sweets/:id/restock/", post(restock))
}

/// Resolve the requested quantity from the raw request body. An empty body
/// or an absent field falls back to the default; a body that fails to parse
/// as `{"quantity": <integer>}` is a validation error rather than a silent
/// fallback, and anything non-positive is rejected before touching the store.
fn requested_quantity(body: &Bytes, default: i64) -> Result<i64, axum::response::Response> {
    let quantity = if body.is_empty() {
        default
    } else {
        match serde_json::from_slice::<dto::QuantityRequest>(body) {
            Ok(request) => request.quantity.unwrap_or(default),
            Err(_) => {
                let mut fields = sweetshop_core::FieldErrors::new();
                fields.push("quantity", "A valid integer is required");
                return Err(errors::validation_error(fields));
            }
        }
    };
    if quantity <= 0 {
        let mut fields = sweetshop_core::FieldErrors::new();
        fields.push("quantity", "Quantity must be a positive integer");
        return Err(errors::validation_error(fields));
    }
    Ok(quantity)
}

pub async fn purchase(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    body: Bytes,
) -> axum::response::Response {
    if let Err(response) = require_read(&identity) {
        return response;
    }

    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let quantity = match requested_quantity(&body, DEFAULT_PURCHASE_QUANTITY) {
        Ok(quantity) => quantity,
        Err(response) => return response,
    };

    let sweet = match services.sweets.purchase(id, quantity).await {
        Ok(sweet) => sweet,
        Err(e) => return errors::store_error_to_response(e),
    };

    let receipt = PurchaseReceipt::new(sweet, quantity);
    (
        StatusCode::OK,
        Json(json!({
            "message": format!(
                "Successfully purchased {} unit(s) of {}",
                receipt.purchased_quantity, receipt.sweet.name
            ),
            "sweet": dto::sweet_to_json(&receipt.sweet),
            "purchased_quantity": receipt.purchased_quantity,
            "remaining_quantity": receipt.remaining_quantity,
            "total_cost": receipt.total_cost.to_string(),
        })),
    )
        .into_response()
}

pub async fn restock(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    body: Bytes,
) -> axum::response::Response {
    if let Err(response) = require_admin(&identity) {
        return response;
    }

    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let quantity = match requested_quantity(&body, DEFAULT_RESTOCK_QUANTITY) {
        Ok(quantity) => quantity,
        Err(response) => return response,
    };

    let sweet = match services.sweets.restock(id, quantity).await {
        Ok(sweet) => sweet,
        Err(e) => return errors::store_error_to_response(e),
    };

    let receipt = RestockReceipt::new(sweet, quantity);
    (
        StatusCode::OK,
        Json(json!({
            "message": format!("Successfully restocked {}", receipt.sweet.name),
            "sweet": dto::sweet_to_json(&receipt.sweet),
            "previous_quantity": receipt.previous_quantity,
            "added_quantity": receipt.added_quantity,
            "new_quantity": receipt.new_quantity,
        })),
    )
        .into_response()
}
