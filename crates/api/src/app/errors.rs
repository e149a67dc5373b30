use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use sweetshop_core::FieldErrors;
use sweetshop_infra::StoreError;
use sweetshop_inventory::StockError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// 400 with the field-keyed message map from validation.
pub fn validation_error(fields: FieldErrors) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        axum::Json(json!({
            "error": "validation_error",
            "message": "validation failed",
            "fields": fields,
        })),
    )
        .into_response()
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        StoreError::Duplicate { field, .. } => {
            let mut fields = FieldErrors::new();
            fields.push(field, format!("A record with this {field} already exists"));
            validation_error(fields)
        }
        StoreError::Stock(stock) => stock_error_to_response(stock),
        StoreError::Contention => json_error(
            StatusCode::CONFLICT,
            "conflict",
            "the record was modified concurrently, try again",
        ),
        StoreError::Database(e) => {
            tracing::error!(error = %e, "store operation failed");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal error",
            )
        }
    }
}

fn stock_error_to_response(err: StockError) -> axum::response::Response {
    match err {
        StockError::OutOfStock { .. } => {
            json_error(StatusCode::BAD_REQUEST, "out_of_stock", err.to_string())
        }
        StockError::InsufficientStock { available, .. } => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({
                "error": "insufficient_stock",
                "message": err.to_string(),
                "available_quantity": available,
            })),
        )
            .into_response(),
    }
}
