//! In-memory token custody: the reference `AssetTransferService`.
//!
//! Models the token contracts the exchange drives in the host
//! environment: named fungible tokens with a fixed supply assigned to
//! their creator, direct transfers, and allowance-gated delegated
//! transfers. Deposits require a prior `approve` for the exchange's
//! custody account, exactly like the delegated-transfer flow the real
//! custody path uses.
//!
//! Native value has no contract; a native `transfer_out` is recorded as
//! a payout (the host chain releases the value).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use openswap_types::{AccountId, Amount, Asset, ExchangeError, Result, TokenId};

use crate::transfer::AssetTransferService;

/// Immutable descriptive data of a token type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
    pub total_supply: Amount,
}

/// Per-token custody state.
#[derive(Debug)]
struct TokenState {
    meta: TokenMetadata,
    /// External balances per holder.
    balances: HashMap<AccountId, Amount>,
    /// Approved delegated-spend budgets, keyed by (owner, spender).
    allowances: HashMap<(AccountId, AccountId), Amount>,
}

/// In-memory external custody for tokens and native payouts.
#[derive(Debug)]
pub struct TokenVault {
    /// The exchange's custody account: delegated transfers on the deposit
    /// path land here, withdrawals leave from here.
    custody: AccountId,
    tokens: HashMap<TokenId, TokenState>,
    /// Count of tokens created; seeds the next token address.
    created: u64,
    /// Native value paid out per recipient.
    native_paid: HashMap<AccountId, Amount>,
}

impl TokenVault {
    /// Create a vault with the given exchange custody account.
    #[must_use]
    pub fn new(custody: AccountId) -> Self {
        Self {
            custody,
            tokens: HashMap::new(),
            created: 0,
            native_paid: HashMap::new(),
        }
    }

    #[must_use]
    pub fn custody_account(&self) -> AccountId {
        self.custody
    }

    /// Create a token and assign its full supply to `creator`. The token
    /// address is derived from the creation counter, so it never collides
    /// with the all-zero address.
    pub fn create_token(
        &mut self,
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u32,
        total_supply: Amount,
        creator: AccountId,
    ) -> TokenId {
        self.created += 1;
        let mut address = [0u8; 20];
        address[12..].copy_from_slice(&self.created.to_be_bytes());
        let id = TokenId(address);

        let mut balances = HashMap::new();
        balances.insert(creator, total_supply);
        self.tokens.insert(
            id,
            TokenState {
                meta: TokenMetadata {
                    name: name.into(),
                    symbol: symbol.into(),
                    decimals,
                    total_supply,
                },
                balances,
                allowances: HashMap::new(),
            },
        );
        id
    }

    /// Descriptive data of a token.
    pub fn metadata(&self, token: TokenId) -> Result<&TokenMetadata> {
        self.tokens
            .get(&token)
            .map(|state| &state.meta)
            .ok_or(ExchangeError::UnknownToken(token))
    }

    /// External balance of `account` in `token`. Zero for unknown holders
    /// and unknown tokens.
    #[must_use]
    pub fn balance_of(&self, token: TokenId, account: AccountId) -> Amount {
        self.tokens
            .get(&token)
            .and_then(|state| state.balances.get(&account))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Remaining delegated-spend budget granted by `owner` to `spender`.
    #[must_use]
    pub fn allowance(&self, token: TokenId, owner: AccountId, spender: AccountId) -> Amount {
        self.tokens
            .get(&token)
            .and_then(|state| state.allowances.get(&(owner, spender)))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Grant `spender` a delegated-spend budget over `owner`'s balance.
    /// Overwrites any earlier grant.
    pub fn approve(
        &mut self,
        token: TokenId,
        owner: AccountId,
        spender: AccountId,
        amount: Amount,
    ) -> Result<()> {
        let state = self
            .tokens
            .get_mut(&token)
            .ok_or(ExchangeError::UnknownToken(token))?;
        state.allowances.insert((owner, spender), amount);
        Ok(())
    }

    /// Move `amount` of `token` directly from `from` to `to`.
    pub fn transfer(
        &mut self,
        token: TokenId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<()> {
        let state = self
            .tokens
            .get_mut(&token)
            .ok_or(ExchangeError::UnknownToken(token))?;

        let available = state.balances.get(&from).copied().unwrap_or(Amount::ZERO);
        let debited = available
            .checked_sub(amount)
            .ok_or(ExchangeError::InsufficientBalance {
                needed: amount,
                available,
            })?;
        let credited = state
            .balances
            .get(&to)
            .copied()
            .unwrap_or(Amount::ZERO)
            .checked_add(amount)?;

        state.balances.insert(from, debited);
        state.balances.insert(to, credited);
        Ok(())
    }

    /// Delegated transfer: `spender` moves `amount` from `from` to `to`
    /// against the allowance `from` granted them. The allowance shrinks
    /// by the moved amount.
    pub fn transfer_from(
        &mut self,
        token: TokenId,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<()> {
        let granted = self.allowance(token, from, spender);
        let remaining = granted
            .checked_sub(amount)
            .ok_or(ExchangeError::InsufficientAllowance {
                needed: amount,
                available: granted,
            })?;

        self.transfer(token, from, to, amount)?;

        // Only reachable with a known token; the transfer above proved it.
        if let Some(state) = self.tokens.get_mut(&token) {
            state.allowances.insert((from, spender), remaining);
        }
        Ok(())
    }

    /// Native value paid out to `account` over the vault's lifetime.
    #[must_use]
    pub fn native_withdrawn(&self, account: AccountId) -> Amount {
        self.native_paid
            .get(&account)
            .copied()
            .unwrap_or(Amount::ZERO)
    }
}

impl AssetTransferService for TokenVault {
    fn transfer_in(&mut self, token: TokenId, from: AccountId, amount: Amount) -> Result<()> {
        let custody = self.custody;
        self.transfer_from(token, custody, from, custody, amount)
            .map_err(|err| ExchangeError::TransferFailed {
                reason: err.to_string(),
            })
    }

    fn transfer_out(&mut self, asset: Asset, to: AccountId, amount: Amount) -> Result<()> {
        match asset {
            Asset::Native => {
                let paid = self.native_paid.entry(to).or_default();
                *paid = paid
                    .checked_add(amount)
                    .map_err(|err| ExchangeError::TransferFailed {
                        reason: err.to_string(),
                    })?;
                Ok(())
            }
            Asset::Token(token) => {
                let custody = self.custody;
                self.transfer(token, custody, to, amount)
                    .map_err(|err| ExchangeError::TransferFailed {
                        reason: err.to_string(),
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXCHANGE: AccountId = AccountId([0xec; 20]);
    const DEPLOYER: AccountId = AccountId([1; 20]);
    const RECEIVER: AccountId = AccountId([2; 20]);

    fn vault_with_token() -> (TokenVault, TokenId) {
        let mut vault = TokenVault::new(EXCHANGE);
        let token = vault.create_token("Tacoin", "TACO", 18, Amount(1_000_000), DEPLOYER);
        (vault, token)
    }

    #[test]
    fn create_token_tracks_metadata_and_supply() {
        let (vault, token) = vault_with_token();
        let meta = vault.metadata(token).unwrap();
        assert_eq!(meta.name, "Tacoin");
        assert_eq!(meta.symbol, "TACO");
        assert_eq!(meta.decimals, 18);
        assert_eq!(meta.total_supply, Amount(1_000_000));
        // Full supply assigned to the creator.
        assert_eq!(vault.balance_of(token, DEPLOYER), Amount(1_000_000));
    }

    #[test]
    fn token_addresses_are_distinct() {
        let mut vault = TokenVault::new(EXCHANGE);
        let a = vault.create_token("A", "A", 18, Amount(1), DEPLOYER);
        let b = vault.create_token("B", "B", 18, Amount(1), DEPLOYER);
        assert_ne!(a, b);
    }

    #[test]
    fn transfer_moves_balances() {
        let (mut vault, token) = vault_with_token();
        vault.transfer(token, DEPLOYER, RECEIVER, Amount(100)).unwrap();
        assert_eq!(vault.balance_of(token, DEPLOYER), Amount(999_900));
        assert_eq!(vault.balance_of(token, RECEIVER), Amount(100));
    }

    #[test]
    fn transfer_rejects_insufficient_balance() {
        let (mut vault, token) = vault_with_token();
        // More than total supply.
        let err = vault
            .transfer(token, DEPLOYER, RECEIVER, Amount(100_000_000))
            .unwrap_err();
        assert!(matches!(err, ExchangeError::InsufficientBalance { .. }));
        // Sender with no tokens at all.
        let err = vault
            .transfer(token, RECEIVER, DEPLOYER, Amount(10))
            .unwrap_err();
        assert!(matches!(err, ExchangeError::InsufficientBalance { .. }));
    }

    #[test]
    fn unknown_token_rejected() {
        let mut vault = TokenVault::new(EXCHANGE);
        let bogus = TokenId([0xff; 20]);
        assert!(matches!(
            vault.metadata(bogus),
            Err(ExchangeError::UnknownToken(_))
        ));
        assert!(matches!(
            vault.transfer(bogus, DEPLOYER, RECEIVER, Amount(1)),
            Err(ExchangeError::UnknownToken(_))
        ));
        assert_eq!(vault.balance_of(bogus, DEPLOYER), Amount::ZERO);
    }

    #[test]
    fn approve_sets_allowance() {
        let (mut vault, token) = vault_with_token();
        vault.approve(token, DEPLOYER, EXCHANGE, Amount(100)).unwrap();
        assert_eq!(vault.allowance(token, DEPLOYER, EXCHANGE), Amount(100));
    }

    #[test]
    fn transfer_from_moves_and_consumes_allowance() {
        let (mut vault, token) = vault_with_token();
        vault.approve(token, DEPLOYER, EXCHANGE, Amount(100)).unwrap();
        vault
            .transfer_from(token, EXCHANGE, DEPLOYER, RECEIVER, Amount(100))
            .unwrap();
        assert_eq!(vault.balance_of(token, DEPLOYER), Amount(999_900));
        assert_eq!(vault.balance_of(token, RECEIVER), Amount(100));
        assert_eq!(vault.allowance(token, DEPLOYER, EXCHANGE), Amount::ZERO);
    }

    #[test]
    fn transfer_from_beyond_allowance_rejected() {
        let (mut vault, token) = vault_with_token();
        vault.approve(token, DEPLOYER, EXCHANGE, Amount(50)).unwrap();
        let err = vault
            .transfer_from(token, EXCHANGE, DEPLOYER, RECEIVER, Amount(51))
            .unwrap_err();
        assert!(matches!(err, ExchangeError::InsufficientAllowance { .. }));
        // Nothing moved.
        assert_eq!(vault.balance_of(token, DEPLOYER), Amount(1_000_000));
        assert_eq!(vault.allowance(token, DEPLOYER, EXCHANGE), Amount(50));
    }

    #[test]
    fn transfer_in_requires_prior_approval() {
        let (mut vault, token) = vault_with_token();
        let err = vault.transfer_in(token, DEPLOYER, Amount(10)).unwrap_err();
        assert!(matches!(err, ExchangeError::TransferFailed { .. }));
        assert_eq!(vault.balance_of(token, EXCHANGE), Amount::ZERO);
    }

    #[test]
    fn transfer_in_moves_into_custody() {
        let (mut vault, token) = vault_with_token();
        vault.approve(token, DEPLOYER, EXCHANGE, Amount(10)).unwrap();
        vault.transfer_in(token, DEPLOYER, Amount(10)).unwrap();
        assert_eq!(vault.balance_of(token, EXCHANGE), Amount(10));
        assert_eq!(vault.balance_of(token, DEPLOYER), Amount(999_990));
    }

    #[test]
    fn transfer_out_token_returns_custody() {
        let (mut vault, token) = vault_with_token();
        vault.approve(token, DEPLOYER, EXCHANGE, Amount(10)).unwrap();
        vault.transfer_in(token, DEPLOYER, Amount(10)).unwrap();

        vault
            .transfer_out(Asset::Token(token), DEPLOYER, Amount(10))
            .unwrap();
        assert_eq!(vault.balance_of(token, DEPLOYER), Amount(1_000_000));
        assert_eq!(vault.balance_of(token, EXCHANGE), Amount::ZERO);
    }

    #[test]
    fn transfer_out_token_without_custody_fails() {
        let (mut vault, token) = vault_with_token();
        let err = vault
            .transfer_out(Asset::Token(token), RECEIVER, Amount(1))
            .unwrap_err();
        assert!(matches!(err, ExchangeError::TransferFailed { .. }));
    }

    #[test]
    fn metadata_serde_roundtrip() {
        let (vault, token) = vault_with_token();
        let meta = vault.metadata(token).unwrap();
        let json = serde_json::to_string(meta).unwrap();
        let back: TokenMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(*meta, back);
    }

    #[test]
    fn transfer_out_native_records_payout() {
        let mut vault = TokenVault::new(EXCHANGE);
        vault.transfer_out(Asset::Native, RECEIVER, Amount(7)).unwrap();
        vault.transfer_out(Asset::Native, RECEIVER, Amount(3)).unwrap();
        assert_eq!(vault.native_withdrawn(RECEIVER), Amount(10));
        assert_eq!(vault.native_withdrawn(DEPLOYER), Amount::ZERO);
    }
}
