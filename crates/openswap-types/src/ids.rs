//! Identifiers used throughout OpenSwap.
//!
//! Accounts and tokens are identified by opaque 20-byte addresses supplied
//! by the host environment. Order ids are allocated sequentially by the
//! order book, starting at 1.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// Opaque identity of a user account: a 20-byte address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AccountId(pub [u8; 20]);

impl AccountId {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Abbreviated hex form for log output.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// TokenId
// ---------------------------------------------------------------------------

/// Opaque identity of a token type: the 20-byte address of its contract
/// in the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TokenId(pub [u8; 20]);

impl TokenId {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "token:0x{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// OrderId
// ---------------------------------------------------------------------------

/// Sequential order identifier. The first order is id 1; ids are strictly
/// increasing in creation order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl OrderId {
    /// The id assigned to the first order ever created.
    pub const FIRST: Self = Self(crate::constants::FIRST_ORDER_ID);

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_display_is_full_hex() {
        let id = AccountId([0xab; 20]);
        let s = format!("{id}");
        assert!(s.starts_with("0x"));
        assert_eq!(s.len(), 2 + 40);
    }

    #[test]
    fn account_id_short_is_four_bytes() {
        let id = AccountId([0xcd; 20]);
        assert_eq!(id.short(), "cdcdcdcd");
    }

    #[test]
    fn token_id_display_abbreviates() {
        let id = TokenId([0x11; 20]);
        assert_eq!(format!("{id}"), "token:0x1111111111111111");
    }

    #[test]
    fn order_id_starts_at_one() {
        assert_eq!(OrderId::FIRST, OrderId(1));
    }

    #[test]
    fn order_id_next_increments() {
        assert_eq!(OrderId(41).next(), OrderId(42));
    }

    #[test]
    fn order_id_ordering_follows_creation() {
        assert!(OrderId::FIRST < OrderId::FIRST.next());
    }

    #[test]
    fn serde_roundtrips() {
        let account = AccountId([7; 20]);
        let json = serde_json::to_string(&account).unwrap();
        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(account, back);

        let order = OrderId(99);
        let json = serde_json::to_string(&order).unwrap();
        let back: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(order, back);
    }
}
