use chrono::{DateTime, Utc};
use core::str::FromStr;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sweetshop_core::{DomainError, SweetId};

/// Catalog category.
///
/// The wire and storage form is the display string (e.g. `"Hard Candy"`),
/// which keeps stored rows and JSON payloads human-readable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Chocolate,
    Gummy,
    #[serde(rename = "Hard Candy")]
    HardCandy,
    Lollipop,
    Sour,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Chocolate,
        Category::Gummy,
        Category::HardCandy,
        Category::Lollipop,
        Category::Sour,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Chocolate => "Chocolate",
            Category::Gummy => "Gummy",
            Category::HardCandy => "Hard Candy",
            Category::Lollipop => "Lollipop",
            Category::Sour => "Sour",
            Category::Other => "Other",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown category: {s}")))
    }
}

/// A catalog record: a sellable sweet with price and stock quantity.
///
/// Invariants: `price > 0` and `quantity >= 0`, both enforced before any
/// record is constructed (validation) and after every mutation (stores).
#[derive(Debug, Clone, PartialEq)]
pub struct Sweet {
    pub id: SweetId,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub price: Decimal,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Sweet {
    pub fn is_in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Materialize a draft into a new record with a fresh id and timestamps.
    pub fn from_draft(draft: SweetDraft) -> Self {
        let now = Utc::now();
        Self {
            id: SweetId::new(),
            name: draft.name,
            category: draft.category,
            description: draft.description,
            price: draft.price,
            quantity: draft.quantity,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Validated field set for a create or full-replace write.
///
/// Only obtainable through [`crate::validation::validate_sweet_input`], so a
/// `SweetDraft` always satisfies the record invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct SweetDraft {
    pub name: String,
    pub category: Category,
    pub description: String,
    pub price: Decimal,
    pub quantity: i64,
}
