//! Request DTOs and JSON mapping helpers.

use std::str::FromStr;

use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use sweetshop_auth::User;
use sweetshop_catalog::{Category, Sweet, SweetFilter};

use crate::app::errors;

/// Login body; fields optional so missing keys become field errors.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body of purchase/restock; an absent body or field applies the default.
#[derive(Debug, Default, Deserialize)]
pub struct QuantityRequest {
    pub quantity: Option<i64>,
}

/// Raw search query string parameters.
///
/// Numeric bounds arrive as strings so an unparsable value can be rejected
/// with a named message instead of a generic deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub name: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

/// Parse the raw query into a [`SweetFilter`], rejecting unknown categories
/// and unparsable price bounds.
pub fn parse_search_query(query: SearchQuery) -> Result<SweetFilter, axum::response::Response> {
    let category = match query.category.as_deref() {
        None => None,
        Some(raw) => Some(raw.parse::<Category>().map_err(|_| {
            errors::json_error(
                StatusCode::BAD_REQUEST,
                "validation_error",
                format!("\"{raw}\" is not a valid category"),
            )
        })?),
    };

    let min_price = parse_price_bound(query.min_price.as_deref(), "min_price")?;
    let max_price = parse_price_bound(query.max_price.as_deref(), "max_price")?;

    Ok(SweetFilter {
        name: query.name,
        category,
        min_price,
        max_price,
    })
}

fn parse_price_bound(
    raw: Option<&str>,
    field: &str,
) -> Result<Option<Decimal>, axum::response::Response> {
    match raw {
        None => Ok(None),
        Some(raw) => Decimal::from_str(raw.trim()).map(Some).map_err(|_| {
            errors::json_error(
                StatusCode::BAD_REQUEST,
                "validation_error",
                format!("Invalid {field} value"),
            )
        }),
    }
}

pub fn sweet_to_json(sweet: &Sweet) -> serde_json::Value {
    json!({
        "id": sweet.id.to_string(),
        "name": sweet.name,
        "category": sweet.category.as_str(),
        "description": sweet.description,
        "price": sweet.price.to_string(),
        "quantity": sweet.quantity,
        "is_in_stock": sweet.is_in_stock(),
        "created_at": sweet.created_at,
        "updated_at": sweet.updated_at,
    })
}

pub fn user_to_json(user: &User) -> serde_json::Value {
    json!({
        "id": user.id.to_string(),
        "email": user.email,
        "username": user.username,
        "is_admin": user.is_admin,
        "created_at": user.created_at,
    })
}
