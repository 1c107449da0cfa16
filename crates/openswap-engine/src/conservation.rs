//! Supply conservation invariant checker.
//!
//! Invariant enforced against the ledger:
//! ```text
//! ∀ asset: Σ balances == Σ deposits - Σ withdrawals
//! ```
//!
//! Deposits and withdrawals move value across the custody boundary;
//! fills only redistribute it. If the invariant ever breaks, something
//! has gone catastrophically wrong and the caller must halt.

use std::collections::HashMap;

use openswap_types::{Amount, Asset, ExchangeError, Result};

/// Tracks per-asset boundary totals and validates conservation.
#[derive(Debug, Default)]
pub struct SupplyAudit {
    /// Total deposits per asset since genesis.
    deposits: HashMap<Asset, Amount>,
    /// Total withdrawals per asset since genesis.
    withdrawals: HashMap<Asset, Amount>,
}

impl SupplyAudit {
    #[must_use]
    pub fn new() -> Self {
        Self {
            deposits: HashMap::new(),
            withdrawals: HashMap::new(),
        }
    }

    /// Whether a further deposit of `amount` keeps the running total
    /// representable. Checked before any external value moves.
    pub fn check_deposit(&self, asset: Asset, amount: Amount) -> Result<()> {
        self.total_deposits(asset).checked_add(amount).map(|_| ())
    }

    /// Record a deposit.
    pub fn record_deposit(&mut self, asset: Asset, amount: Amount) -> Result<()> {
        let total = self.deposits.entry(asset).or_default();
        *total = total.checked_add(amount)?;
        Ok(())
    }

    /// Record a withdrawal.
    pub fn record_withdrawal(&mut self, asset: Asset, amount: Amount) -> Result<()> {
        let total = self.withdrawals.entry(asset).or_default();
        *total = total.checked_add(amount)?;
        Ok(())
    }

    /// Expected in-custody supply: deposits minus withdrawals. The ledger
    /// never lets withdrawals outrun deposits, so a negative result is
    /// itself an invariant violation.
    pub fn expected_supply(&self, asset: Asset) -> Result<Amount> {
        let deposited = self.total_deposits(asset);
        let withdrawn = self.total_withdrawals(asset);
        deposited
            .checked_sub(withdrawn)
            .ok_or_else(|| ExchangeError::SupplyInvariantViolation {
                reason: format!(
                    "Asset {asset}: withdrawals {withdrawn} exceed deposits {deposited}"
                ),
            })
    }

    /// Verify that the actual supply (sum of all ledger balances) matches
    /// the expected supply for an asset.
    ///
    /// # Errors
    /// Returns [`ExchangeError::SupplyInvariantViolation`] on mismatch.
    pub fn verify(&self, asset: Asset, actual_supply: Amount) -> Result<()> {
        let expected = self.expected_supply(asset)?;
        if actual_supply != expected {
            return Err(ExchangeError::SupplyInvariantViolation {
                reason: format!(
                    "Asset {asset}: actual supply {actual_supply} != expected {expected} \
                     (deposits={}, withdrawals={})",
                    self.total_deposits(asset),
                    self.total_withdrawals(asset),
                ),
            });
        }
        Ok(())
    }

    /// Total deposits for an asset.
    #[must_use]
    pub fn total_deposits(&self, asset: Asset) -> Amount {
        self.deposits.get(&asset).copied().unwrap_or(Amount::ZERO)
    }

    /// Total withdrawals for an asset.
    #[must_use]
    pub fn total_withdrawals(&self, asset: Asset) -> Amount {
        self.withdrawals
            .get(&asset)
            .copied()
            .unwrap_or(Amount::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use openswap_types::TokenId;

    use super::*;

    #[test]
    fn empty_supply_is_zero() {
        let audit = SupplyAudit::new();
        assert_eq!(audit.expected_supply(Asset::Native).unwrap(), Amount::ZERO);
        assert!(audit.verify(Asset::Native, Amount::ZERO).is_ok());
    }

    #[test]
    fn deposits_increase_expected() {
        let mut audit = SupplyAudit::new();
        audit.record_deposit(Asset::Native, Amount(1_000)).unwrap();
        audit.record_deposit(Asset::Native, Amount(500)).unwrap();
        assert_eq!(audit.expected_supply(Asset::Native).unwrap(), Amount(1_500));
    }

    #[test]
    fn withdrawals_decrease_expected() {
        let mut audit = SupplyAudit::new();
        audit.record_deposit(Asset::Native, Amount(1_000)).unwrap();
        audit.record_withdrawal(Asset::Native, Amount(300)).unwrap();
        assert_eq!(audit.expected_supply(Asset::Native).unwrap(), Amount(700));
    }

    #[test]
    fn verify_passes_when_balanced() {
        let mut audit = SupplyAudit::new();
        audit.record_deposit(Asset::Native, Amount(10)).unwrap();
        audit.record_withdrawal(Asset::Native, Amount(3)).unwrap();
        assert!(audit.verify(Asset::Native, Amount(7)).is_ok());
    }

    #[test]
    fn verify_fails_when_imbalanced() {
        let mut audit = SupplyAudit::new();
        audit.record_deposit(Asset::Native, Amount(10)).unwrap();
        let err = audit.verify(Asset::Native, Amount(11)).unwrap_err();
        assert!(matches!(
            err,
            ExchangeError::SupplyInvariantViolation { .. }
        ));
    }

    #[test]
    fn overdrawn_expectation_is_a_violation() {
        let mut audit = SupplyAudit::new();
        audit.record_withdrawal(Asset::Native, Amount(1)).unwrap();
        let err = audit.expected_supply(Asset::Native).unwrap_err();
        assert!(matches!(
            err,
            ExchangeError::SupplyInvariantViolation { .. }
        ));
    }

    #[test]
    fn assets_are_independent() {
        let mut audit = SupplyAudit::new();
        let token = Asset::Token(TokenId([5; 20]));
        audit.record_deposit(Asset::Native, Amount(5)).unwrap();
        audit.record_deposit(token, Amount(50_000)).unwrap();
        assert_eq!(audit.expected_supply(Asset::Native).unwrap(), Amount(5));
        assert_eq!(audit.expected_supply(token).unwrap(), Amount(50_000));
    }

    #[test]
    fn check_deposit_flags_unrepresentable_totals() {
        let mut audit = SupplyAudit::new();
        audit.record_deposit(Asset::Native, Amount(u128::MAX)).unwrap();
        let err = audit.check_deposit(Asset::Native, Amount(1)).unwrap_err();
        assert!(matches!(err, ExchangeError::Overflow));
        // check_deposit never records.
        assert_eq!(audit.total_deposits(Asset::Native), Amount(u128::MAX));
    }
}
