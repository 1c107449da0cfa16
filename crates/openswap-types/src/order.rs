//! The order model.
//!
//! An order is a standing intent to swap: the maker names what they want
//! and what they offer. Nothing is escrowed at creation time; sufficiency
//! is checked against live balances when the order is filled. Orders are
//! never deleted; they form an append-only, id-indexed log where only the
//! two terminal flags ever change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, Amount, Asset, OrderId};

/// A resting swap order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Sequential id, unique over the book's lifetime.
    pub id: OrderId,
    /// The account that posted the order.
    pub maker: AccountId,
    /// Asset and quantity the maker wants to receive.
    pub asset_wanted: Asset,
    pub amount_wanted: Amount,
    /// Asset and quantity the maker is offering in return.
    pub asset_offered: Asset,
    pub amount_offered: Amount,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
    /// Terminal flag: a successful cancel sets this, permanently.
    pub cancelled: bool,
    /// Terminal flag: a successful fill sets this, permanently.
    pub filled: bool,
}

impl Order {
    /// Whether the order has reached a terminal state. At most one of the
    /// two flags ever becomes true.
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.cancelled || self.filled
    }

    /// Whether the order can still be cancelled or filled.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.is_finalized()
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Order[{}] {} wants {} {} for {} {}",
            self.id.0,
            self.maker.short(),
            self.amount_wanted,
            self.asset_wanted,
            self.amount_offered,
            self.asset_offered,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_order() -> Order {
        Order {
            id: OrderId::FIRST,
            maker: AccountId([1; 20]),
            asset_wanted: Asset::Token(crate::TokenId([2; 20])),
            amount_wanted: Amount(100),
            asset_offered: Asset::Native,
            amount_offered: Amount(1),
            created_at: Utc::now(),
            cancelled: false,
            filled: false,
        }
    }

    #[test]
    fn fresh_order_is_open() {
        let order = open_order();
        assert!(order.is_open());
        assert!(!order.is_finalized());
    }

    #[test]
    fn cancelled_order_is_finalized() {
        let mut order = open_order();
        order.cancelled = true;
        assert!(order.is_finalized());
        assert!(!order.is_open());
    }

    #[test]
    fn filled_order_is_finalized() {
        let mut order = open_order();
        order.filled = true;
        assert!(order.is_finalized());
    }

    #[test]
    fn display_names_both_sides() {
        let order = open_order();
        let s = format!("{order}");
        assert!(s.contains("Order[1]"));
        assert!(s.contains("native"));
    }

    #[test]
    fn order_serde_roundtrip() {
        let order = open_order();
        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, back);
    }
}
