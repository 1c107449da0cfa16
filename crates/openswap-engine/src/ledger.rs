//! The balance ledger.
//!
//! Pure bookkeeping of per-(asset, account) balances. The ledger knows no
//! business rules beyond non-negativity: every balance change anywhere in
//! the system is expressed as credit/debit calls, and a balance is never
//! directly settable.

use std::collections::HashMap;

use openswap_types::{AccountId, Amount, Asset, ExchangeError, Result};

/// Authoritative balance store for all assets and accounts.
///
/// Entries are created implicitly on first credit and persist forever;
/// a zero balance is a valid steady state, not a deletion.
#[derive(Debug, Default)]
pub struct Ledger {
    /// Per-(asset, account) balances.
    balances: HashMap<(Asset, AccountId), Amount>,
}

impl Ledger {
    /// Create a new empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
        }
    }

    /// The balance for a (asset, account) pair. Zero for unknown keys;
    /// never fails.
    #[must_use]
    pub fn balance_of(&self, asset: Asset, account: AccountId) -> Amount {
        self.balances
            .get(&(asset, account))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Increase a balance. Returns the new balance.
    ///
    /// # Errors
    /// Returns [`ExchangeError::Overflow`] if the credit would exceed the
    /// representable range. That error is fatal; it must never be papered
    /// over with a wrap.
    pub fn credit(&mut self, asset: Asset, account: AccountId, amount: Amount) -> Result<Amount> {
        let entry = self.balances.entry((asset, account)).or_default();
        let updated = entry.checked_add(amount)?;
        *entry = updated;
        Ok(updated)
    }

    /// Decrease a balance. Returns the new balance.
    ///
    /// # Errors
    /// Returns [`ExchangeError::InsufficientBalance`] if `amount` exceeds
    /// the current balance; the ledger is unchanged in that case.
    pub fn debit(&mut self, asset: Asset, account: AccountId, amount: Amount) -> Result<Amount> {
        let available = self.balance_of(asset, account);
        let updated = available
            .checked_sub(amount)
            .ok_or(ExchangeError::InsufficientBalance {
                needed: amount,
                available,
            })?;
        if let Some(entry) = self.balances.get_mut(&(asset, account)) {
            *entry = updated;
        }
        Ok(updated)
    }

    /// Total supply of an asset held in custody (sum over all accounts).
    ///
    /// # Errors
    /// Returns [`ExchangeError::Overflow`] if the sum is unrepresentable,
    /// which honest bookkeeping cannot produce.
    pub fn total_supply(&self, asset: Asset) -> Result<Amount> {
        self.balances
            .iter()
            .filter(|((a, _), _)| *a == asset)
            .try_fold(Amount::ZERO, |sum, (_, amount)| sum.checked_add(*amount))
    }

    /// Number of (asset, account) entries ever touched.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.balances.len()
    }
}
