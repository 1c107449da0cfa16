//! The settlement engine: the exchange core's public operations.
//!
//! One engine instance owns the ledger, the order book, the configuration,
//! and the transfer collaborator. Every public operation is a single
//! atomic unit of work: it validates, mutates, and returns the domain
//! event describing the mutation, or fails with no mutation at all.
//!
//! ## Operation flow
//!
//! ```text
//! caller -> SettlementEngine.{deposit,withdraw,make,cancel,fill}
//!        -> Ledger / OrderBook mutation (all-or-nothing)
//!        -> ExchangeEvent (returned, not emitted as a side channel)
//! ```
//!
//! The engine is defined single-threaded per instance (`&mut self`
//! throughout); concurrent environments serialize around it. The only
//! internal boundary calls are the explicit `AssetTransferService`
//! invocations on the token-deposit and withdrawal paths.

use std::collections::HashMap;

use chrono::Utc;

use openswap_types::{
    AccountId, Amount, Asset, ExchangeConfig, ExchangeError, ExchangeEvent, Order, OrderId, Result,
};

use crate::conservation::SupplyAudit;
use crate::ledger::Ledger;
use crate::orderbook::OrderBook;
use crate::transfer::AssetTransferService;

/// The custodial exchange core.
pub struct SettlementEngine<T: AssetTransferService> {
    config: ExchangeConfig,
    ledger: Ledger,
    book: OrderBook,
    transfers: T,
    supply: SupplyAudit,
}

impl<T: AssetTransferService> SettlementEngine<T> {
    /// Create an engine with the given configuration and transfer
    /// collaborator. Configuration is immutable from here on.
    #[must_use]
    pub fn new(config: ExchangeConfig, transfers: T) -> Self {
        Self {
            config,
            ledger: Ledger::new(),
            book: OrderBook::new(),
            transfers,
            supply: SupplyAudit::new(),
        }
    }

    // =================================================================
    // Custody: deposits
    // =================================================================

    /// Credit a native-asset deposit. The host environment moved the
    /// value with the call itself, so no `transfer_in` is issued; the
    /// engine trusts `amount` to equal the value actually received.
    pub fn deposit_native(&mut self, account: AccountId, amount: Amount) -> Result<ExchangeEvent> {
        self.supply.check_deposit(Asset::Native, amount)?;
        let balance = self.ledger.credit(Asset::Native, account, amount)?;
        self.supply.record_deposit(Asset::Native, amount)?;

        tracing::info!(
            account = %account.short(),
            amount = %amount,
            balance = %balance,
            "Native deposit credited"
        );
        Ok(ExchangeEvent::Deposit {
            asset: Asset::Native,
            account,
            amount,
            balance,
            at: Utc::now(),
        })
    }

    /// Credit a token deposit. The external `transfer_in` runs first; on
    /// failure it propagates and the ledger is untouched.
    ///
    /// # Errors
    /// `InvalidAsset` for the native asset: tokens and native value use
    /// disjoint deposit paths because only token custody needs the
    /// fallible transfer-in step.
    pub fn deposit_token(
        &mut self,
        asset: Asset,
        account: AccountId,
        amount: Amount,
    ) -> Result<ExchangeEvent> {
        let token = asset.require_token()?;

        // Pre-flight: the credit and the audit total must both be
        // representable before any external value moves.
        self.supply.check_deposit(asset, amount)?;
        self.ledger.balance_of(asset, account).checked_add(amount)?;

        if let Err(err) = self.transfers.transfer_in(token, account, amount) {
            tracing::warn!(
                token = %token,
                account = %account.short(),
                amount = %amount,
                error = %err,
                "Token deposit rejected by transfer collaborator"
            );
            return Err(err);
        }

        let balance = self.ledger.credit(asset, account, amount)?;
        self.supply.record_deposit(asset, amount)?;

        tracing::info!(
            token = %token,
            account = %account.short(),
            amount = %amount,
            balance = %balance,
            "Token deposit credited"
        );
        Ok(ExchangeEvent::Deposit {
            asset,
            account,
            amount,
            balance,
            at: Utc::now(),
        })
    }

    // =================================================================
    // Custody: withdrawals
    // =================================================================

    /// Withdraw native value: ledger debit first, then `transfer_out`.
    pub fn withdraw_native(&mut self, account: AccountId, amount: Amount) -> Result<ExchangeEvent> {
        self.settle_withdrawal(Asset::Native, account, amount)
    }

    /// Withdraw a token balance: ledger debit first, then `transfer_out`.
    ///
    /// # Errors
    /// `InvalidAsset` for the native asset; use [`Self::withdraw_native`].
    pub fn withdraw_token(
        &mut self,
        asset: Asset,
        account: AccountId,
        amount: Amount,
    ) -> Result<ExchangeEvent> {
        asset.require_token()?;
        self.settle_withdrawal(asset, account, amount)
    }

    fn settle_withdrawal(
        &mut self,
        asset: Asset,
        account: AccountId,
        amount: Amount,
    ) -> Result<ExchangeEvent> {
        // Debit first: an insufficient balance aborts before any
        // external call is attempted.
        let balance = self.ledger.debit(asset, account, amount)?;
        self.supply.record_withdrawal(asset, amount)?;

        if let Err(err) = self.transfers.transfer_out(asset, account, amount) {
            // The debit stands and no compensating credit path exists:
            // custody now disagrees with the ledger. Non-recoverable.
            tracing::error!(
                asset = %asset,
                account = %account.short(),
                amount = %amount,
                error = %err,
                "Transfer-out failed after ledger debit; custody is inconsistent"
            );
            return Err(err);
        }

        tracing::info!(
            asset = %asset,
            account = %account.short(),
            amount = %amount,
            balance = %balance,
            "Withdrawal settled"
        );
        Ok(ExchangeEvent::Withdraw {
            asset,
            account,
            amount,
            balance,
            at: Utc::now(),
        })
    }

    // =================================================================
    // Orders
    // =================================================================

    /// Post a standing order. Nothing is checked or escrowed here: the
    /// maker's offered balance is validated against live state at fill
    /// time, not at creation time.
    pub fn make_order(
        &mut self,
        maker: AccountId,
        asset_wanted: Asset,
        amount_wanted: Amount,
        asset_offered: Asset,
        amount_offered: Amount,
    ) -> Result<ExchangeEvent> {
        let id = self.book.next_id();
        let order = Order {
            id,
            maker,
            asset_wanted,
            amount_wanted,
            asset_offered,
            amount_offered,
            created_at: Utc::now(),
            cancelled: false,
            filled: false,
        };
        self.book.insert(order.clone())?;

        tracing::info!(
            order = %id,
            maker = %maker.short(),
            wanted = %amount_wanted,
            asset_wanted = %asset_wanted,
            offered = %amount_offered,
            asset_offered = %asset_offered,
            "Order placed"
        );
        Ok(ExchangeEvent::OrderPlaced { order })
    }

    /// Cancel an open order. Only the maker may cancel, and only once.
    pub fn cancel_order(&mut self, caller: AccountId, id: OrderId) -> Result<ExchangeEvent> {
        let order = self.book.get(id)?;
        if order.maker != caller {
            return Err(ExchangeError::Unauthorized { order: id, caller });
        }
        if order.is_finalized() {
            return Err(ExchangeError::AlreadyFinalized(id));
        }

        let mut snapshot = order.clone();
        self.book.mark_cancelled(id)?;
        snapshot.cancelled = true;

        tracing::info!(order = %id, maker = %caller.short(), "Order cancelled");
        Ok(ExchangeEvent::OrderCancelled {
            order: snapshot,
            at: Utc::now(),
        })
    }

    /// Fill an open order: the atomic swap.
    ///
    /// The taker pays `amount_wanted` plus the fee (both in
    /// `asset_wanted`), the maker's offered side moves to the taker, and
    /// the fee routes to the fee account. No partial fill exists: the
    /// whole settlement sequence is proven on scratch balances before the
    /// ledger is touched, so any failure leaves every balance unchanged,
    /// even when accounts or assets alias each other.
    pub fn fill_order(&mut self, taker: AccountId, id: OrderId) -> Result<ExchangeEvent> {
        let order = self.book.get(id)?.clone();
        if order.is_finalized() {
            return Err(ExchangeError::AlreadyFinalized(id));
        }

        // Fee is always denominated in the asset the taker pays in.
        let fee = self.config.fees.fee_on(order.amount_wanted)?;
        let charge = order.amount_wanted.checked_add(fee)?;

        let mut scratch = FillScratch::new(&self.ledger);
        scratch.debit(order.asset_wanted, taker, charge)?;
        scratch.debit(order.asset_offered, order.maker, order.amount_offered)?;
        scratch.credit(order.asset_wanted, order.maker, order.amount_wanted)?;
        scratch.credit(order.asset_offered, taker, order.amount_offered)?;
        scratch.credit(order.asset_wanted, self.config.fee_account, fee)?;

        // Commit: replay the proven sequence on the ledger.
        self.ledger.debit(order.asset_wanted, taker, charge)?;
        self.ledger
            .debit(order.asset_offered, order.maker, order.amount_offered)?;
        self.ledger
            .credit(order.asset_wanted, order.maker, order.amount_wanted)?;
        self.ledger
            .credit(order.asset_offered, taker, order.amount_offered)?;
        self.ledger
            .credit(order.asset_wanted, self.config.fee_account, fee)?;
        self.book.mark_filled(id)?;

        tracing::info!(
            order = %id,
            maker = %order.maker.short(),
            taker = %taker.short(),
            wanted = %order.amount_wanted,
            offered = %order.amount_offered,
            fee = %fee,
            "Trade settled"
        );

        let mut snapshot = order;
        snapshot.filled = true;
        Ok(ExchangeEvent::TradeExecuted {
            order: snapshot,
            taker,
            at: Utc::now(),
        })
    }

    // =================================================================
    // Queries
    // =================================================================

    /// The balance for a (asset, account) pair. Zero for unknown keys.
    #[must_use]
    pub fn balance_of(&self, asset: Asset, account: AccountId) -> Amount {
        self.ledger.balance_of(asset, account)
    }

    /// Number of orders ever created.
    #[must_use]
    pub fn order_count(&self) -> u64 {
        self.book.order_count()
    }

    /// Look up an order by id.
    pub fn order(&self, id: OrderId) -> Result<&Order> {
        self.book.get(id)
    }

    /// Iterate all orders in creation order.
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.book.iter()
    }

    /// Whether the order has been filled.
    pub fn is_filled(&self, id: OrderId) -> Result<bool> {
        self.book.is_filled(id)
    }

    /// Whether the order has been cancelled.
    pub fn is_cancelled(&self, id: OrderId) -> Result<bool> {
        self.book.is_cancelled(id)
    }

    /// The account receiving all trade fees.
    #[must_use]
    pub fn fee_account(&self) -> AccountId {
        self.config.fee_account
    }

    /// The fee rate in whole percent.
    #[must_use]
    pub fn fee_percent(&self) -> u8 {
        self.config.fees.percent()
    }

    /// Check supply conservation for an asset against the ledger.
    pub fn verify_supply(&self, asset: Asset) -> Result<()> {
        self.supply.verify(asset, self.ledger.total_supply(asset)?)
    }

    /// The transfer collaborator.
    pub fn transfer_service(&self) -> &T {
        &self.transfers
    }

    /// Mutable access to the transfer collaborator, for the approval and
    /// funding steps that precede deposits.
    pub fn transfer_service_mut(&mut self) -> &mut T {
        &mut self.transfers
    }
}

/// Scratch balances for proving a fill before committing it.
///
/// Keys alias exactly the way ledger keys do, so a fill where the maker,
/// taker, and fee account (or both assets) coincide is still checked
/// against the true sequential balances.
struct FillScratch<'a> {
    ledger: &'a Ledger,
    balances: HashMap<(Asset, AccountId), Amount>,
}

impl<'a> FillScratch<'a> {
    fn new(ledger: &'a Ledger) -> Self {
        Self {
            ledger,
            balances: HashMap::new(),
        }
    }

    fn current(&mut self, asset: Asset, account: AccountId) -> Amount {
        let ledger = self.ledger;
        *self
            .balances
            .entry((asset, account))
            .or_insert_with(|| ledger.balance_of(asset, account))
    }

    fn debit(&mut self, asset: Asset, account: AccountId, amount: Amount) -> Result<()> {
        let available = self.current(asset, account);
        let updated = available
            .checked_sub(amount)
            .ok_or(ExchangeError::InsufficientBalance {
                needed: amount,
                available,
            })?;
        self.balances.insert((asset, account), updated);
        Ok(())
    }

    fn credit(&mut self, asset: Asset, account: AccountId, amount: Amount) -> Result<()> {
        let updated = self.current(asset, account).checked_add(amount)?;
        self.balances.insert((asset, account), updated);
        Ok(())
    }
}
