//! Explicit input validation for catalog writes.
//!
//! Declarative schema objects are replaced by plain functions: raw input in,
//! either a validated [`SweetDraft`] or a field-keyed error list out. Nothing
//! is persisted until validation has passed in full.

use rust_decimal::Decimal;
use serde::Deserialize;

use sweetshop_core::FieldErrors;

use crate::sweet::{Category, SweetDraft};

/// Maximum accepted name length.
pub const MAX_NAME_LEN: usize = 200;

/// Minimum accepted price (one cent).
pub fn min_price() -> Decimal {
    Decimal::new(1, 2)
}

/// Raw, untrusted field set for a create or full-replace write.
///
/// Every field is optional here so that missing fields surface as per-field
/// "is required" errors instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SweetInput {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i64>,
}

/// Validate raw input into a [`SweetDraft`].
///
/// Rules: name non-empty (trimmed) and at most [`MAX_NAME_LEN`] chars;
/// category one of the known set (missing defaults to `Other`); price at
/// least 0.01 with at most two decimal places; quantity present and `>= 0`.
pub fn validate_sweet_input(input: SweetInput) -> Result<SweetDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = match input.name.as_deref().map(str::trim) {
        None => {
            errors.push("name", "This field is required");
            String::new()
        }
        Some("") => {
            errors.push("name", "This field may not be blank");
            String::new()
        }
        Some(name) if name.chars().count() > MAX_NAME_LEN => {
            errors.push(
                "name",
                format!("Ensure this field has no more than {MAX_NAME_LEN} characters"),
            );
            String::new()
        }
        Some(name) => name.to_string(),
    };

    let category = match input.category.as_deref() {
        None => Category::default(),
        Some(raw) => match raw.parse::<Category>() {
            Ok(category) => category,
            Err(_) => {
                errors.push("category", format!("\"{raw}\" is not a valid choice"));
                Category::default()
            }
        },
    };

    let price = match input.price {
        None => {
            errors.push("price", "This field is required");
            Decimal::ZERO
        }
        Some(price) => {
            if price < min_price() {
                errors.push("price", "Ensure this value is greater than or equal to 0.01");
            }
            if price.scale() > 2 {
                errors.push("price", "Ensure that there are no more than 2 decimal places");
            }
            price
        }
    };

    let quantity = match input.quantity {
        None => {
            errors.push("quantity", "This field is required");
            0
        }
        Some(quantity) => {
            if quantity < 0 {
                errors.push("quantity", "Ensure this value is greater than or equal to 0");
            }
            quantity
        }
    };

    errors.into_result(SweetDraft {
        name,
        category,
        description: input.description.unwrap_or_default(),
        price,
        quantity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> SweetInput {
        SweetInput {
            name: Some("Dark Chocolate Bar".to_string()),
            category: Some("Chocolate".to_string()),
            description: Some("70% cocoa".to_string()),
            price: Some(Decimal::new(350, 2)),
            quantity: Some(20),
        }
    }

    #[test]
    fn accepts_a_fully_valid_payload() {
        let draft = validate_sweet_input(valid_input()).unwrap();
        assert_eq!(draft.name, "Dark Chocolate Bar");
        assert_eq!(draft.category, Category::Chocolate);
        assert_eq!(draft.price, Decimal::new(350, 2));
        assert_eq!(draft.quantity, 20);
    }

    #[test]
    fn missing_category_defaults_to_other() {
        let mut input = valid_input();
        input.category = None;
        let draft = validate_sweet_input(input).unwrap();
        assert_eq!(draft.category, Category::Other);
    }

    #[test]
    fn missing_description_defaults_to_empty() {
        let mut input = valid_input();
        input.description = None;
        let draft = validate_sweet_input(input).unwrap();
        assert_eq!(draft.description, "");
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut input = valid_input();
        input.name = Some("   ".to_string());
        let errors = validate_sweet_input(input).unwrap_err();
        assert!(!errors.messages_for("name").is_empty());
    }

    #[test]
    fn zero_and_negative_prices_are_rejected() {
        for price in [Decimal::ZERO, Decimal::new(-100, 2)] {
            let mut input = valid_input();
            input.price = Some(price);
            let errors = validate_sweet_input(input).unwrap_err();
            assert!(!errors.messages_for("price").is_empty());
        }
    }

    #[test]
    fn price_with_three_decimal_places_is_rejected() {
        let mut input = valid_input();
        input.price = Some(Decimal::new(1234, 3)); // 1.234
        let errors = validate_sweet_input(input).unwrap_err();
        assert!(!errors.messages_for("price").is_empty());
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let mut input = valid_input();
        input.quantity = Some(-1);
        let errors = validate_sweet_input(input).unwrap_err();
        assert!(!errors.messages_for("quantity").is_empty());
    }

    #[test]
    fn unknown_category_is_a_field_error_not_a_silent_default() {
        let mut input = valid_input();
        input.category = Some("Candy Floss".to_string());
        let errors = validate_sweet_input(input).unwrap_err();
        assert!(!errors.messages_for("category").is_empty());
    }

    #[test]
    fn errors_accumulate_across_fields() {
        let errors = validate_sweet_input(SweetInput::default()).unwrap_err();
        let fields: Vec<_> = errors.fields().collect();
        assert_eq!(fields, ["name", "price", "quantity"]);
    }
}
