//! Composable search predicate over the catalog.

use rust_decimal::Decimal;

use crate::sweet::{Category, Sweet};

/// Conjunctive search filter: every present field must match.
///
/// `name` is a case-insensitive substring match, `category` an exact match,
/// and the price bounds are inclusive. An empty filter matches everything.
/// Parsing raw query strings into this type (and rejecting unparsable
/// bounds) is the caller's job; this type only decides matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweetFilter {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl SweetFilter {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    pub fn matches(&self, sweet: &Sweet) -> bool {
        if let Some(needle) = &self.name {
            if !sweet.name.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }
        if let Some(category) = self.category {
            if sweet.category != category {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if sweet.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if sweet.price > max {
                return false;
            }
        }
        true
    }
}
