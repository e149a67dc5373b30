//! Receipts returned to the caller after a stock adjustment.

use rust_decimal::Decimal;

use sweetshop_catalog::Sweet;

/// Outcome of a successful purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseReceipt {
    /// The record as persisted after the decrement.
    pub sweet: Sweet,
    pub purchased_quantity: i64,
    pub remaining_quantity: i64,
    /// `price * purchased_quantity`, exact decimal arithmetic.
    pub total_cost: Decimal,
}

impl PurchaseReceipt {
    /// Build a receipt from the already-decremented record.
    pub fn new(sweet: Sweet, purchased_quantity: i64) -> Self {
        let total_cost = sweet.price * Decimal::from(purchased_quantity);
        let remaining_quantity = sweet.quantity;
        Self {
            sweet,
            purchased_quantity,
            remaining_quantity,
            total_cost,
        }
    }
}

/// Outcome of a successful restock.
#[derive(Debug, Clone, PartialEq)]
pub struct RestockReceipt {
    /// The record as persisted after the increment.
    pub sweet: Sweet,
    pub previous_quantity: i64,
    pub added_quantity: i64,
    pub new_quantity: i64,
}

impl RestockReceipt {
    /// Build a receipt from the already-incremented record.
    pub fn new(sweet: Sweet, added_quantity: i64) -> Self {
        let new_quantity = sweet.quantity;
        Self {
            sweet,
            previous_quantity: new_quantity - added_quantity,
            added_quantity,
            new_quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use sweetshop_catalog::{Category, Sweet, SweetDraft};

    use super::*;

    fn sweet(price: Decimal, quantity: i64) -> Sweet {
        Sweet::from_draft(SweetDraft {
            name: "Toffee".to_string(),
            category: Category::Other,
            description: String::new(),
            price,
            quantity,
        })
    }

    #[test]
    fn purchase_receipt_computes_total_cost_exactly() {
        // quantity 10, price 2.50, purchase 3 => remaining 7, total 7.50
        let after = sweet(Decimal::new(250, 2), 7);
        let receipt = PurchaseReceipt::new(after, 3);
        assert_eq!(receipt.purchased_quantity, 3);
        assert_eq!(receipt.remaining_quantity, 7);
        assert_eq!(receipt.total_cost, Decimal::new(750, 2));
        assert_eq!(receipt.total_cost.to_string(), "7.50");
    }

    #[test]
    fn restock_receipt_reports_before_and_after() {
        let after = sweet(Decimal::new(100, 2), 15);
        let receipt = RestockReceipt::new(after, 10);
        assert_eq!(receipt.previous_quantity, 5);
        assert_eq!(receipt.added_quantity, 10);
        assert_eq!(receipt.new_quantity, 15);
    }
}
