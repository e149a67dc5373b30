//! `sweetshop-catalog` — the sweets catalog domain.
//!
//! Pure types and rules only: the `Sweet` record, its category enumeration,
//! explicit input validation, and the composable search filter. Persistence
//! lives in `sweetshop-infra`.

pub mod filter;
pub mod sweet;
pub mod validation;

pub use filter::SweetFilter;
pub use sweet::{Category, Sweet, SweetDraft};
pub use validation::{SweetInput, validate_sweet_input};
