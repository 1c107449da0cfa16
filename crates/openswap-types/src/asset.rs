//! Asset identity and integer amounts.
//!
//! The native asset and token types share one ledger keyspace but take
//! disjoint custody paths: tokens move through the external
//! `AssetTransferService`, the native asset arrives with the call itself.
//! [`Asset`] makes the distinction a tagged variant so every path match
//! is exhaustive.
//!
//! All quantities are integers in the smallest indivisible unit
//! (wei-scale). Arithmetic is checked: an overflowing credit is a fatal
//! [`ExchangeError::Overflow`], never a silent wrap.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ExchangeError, Result, TokenId};

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

/// A fungible value type tracked by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Asset {
    /// The host environment's native asset.
    Native,
    /// A token type, identified by its contract address.
    Token(TokenId),
}

impl Asset {
    #[must_use]
    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }

    /// The token id behind this asset, or [`ExchangeError::InvalidAsset`]
    /// for the native asset. Used by the token-only custody paths.
    pub fn require_token(&self) -> Result<TokenId> {
        match self {
            Self::Native => Err(ExchangeError::InvalidAsset { asset: *self }),
            Self::Token(token) => Ok(*token),
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Token(token) => write!(f, "{token}"),
        }
    }
}

impl From<TokenId> for Asset {
    fn from(token: TokenId) -> Self {
        Self::Token(token)
    }
}

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

/// A non-negative quantity in the smallest indivisible unit of an asset.
///
/// Human-scale quantities are pre-scaled by the collaborator before they
/// enter the core; the core never divides below unit granularity.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct Amount(pub u128);

impl Amount {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Sum that fails with [`ExchangeError::Overflow`] instead of wrapping.
    pub fn checked_add(self, rhs: Self) -> Result<Self> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or(ExchangeError::Overflow)
    }

    /// Difference, or `None` when `rhs` exceeds `self`. Callers translate
    /// `None` into the error appropriate for their context.
    #[must_use]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for Amount {
    fn from(raw: u128) -> Self {
        Self(raw)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
