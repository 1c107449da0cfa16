//! Domain events returned by the settlement engine.
//!
//! Events are the only externally observable record of state change
//! beyond direct queries: each operation returns exactly one event, and
//! each event carries the resulting balance or order snapshot an observer
//! needs to reconstruct state without re-querying.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, Amount, Asset, Order};

/// The event produced by one successful engine operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExchangeEvent {
    /// Value entered custody and was credited to the ledger.
    Deposit {
        asset: Asset,
        account: AccountId,
        amount: Amount,
        /// The account's balance in `asset` after the credit.
        balance: Amount,
        at: DateTime<Utc>,
    },
    /// The ledger was debited and value left custody.
    Withdraw {
        asset: Asset,
        account: AccountId,
        amount: Amount,
        /// The account's balance in `asset` after the debit.
        balance: Amount,
        at: DateTime<Utc>,
    },
    /// A new order entered the book. The snapshot carries `created_at`.
    OrderPlaced { order: Order },
    /// An open order was cancelled by its maker.
    OrderCancelled { order: Order, at: DateTime<Utc> },
    /// An open order was filled by `taker` in one atomic settlement.
    TradeExecuted {
        order: Order,
        taker: AccountId,
        at: DateTime<Utc>,
    },
}

impl ExchangeEvent {
    /// Stable event tag, matching the host environment's event names.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Deposit { .. } => "DEPOSIT",
            Self::Withdraw { .. } => "WITHDRAW",
            Self::OrderPlaced { .. } => "ORDER",
            Self::OrderCancelled { .. } => "CANCEL",
            Self::TradeExecuted { .. } => "TRADE",
        }
    }
}

impl std::fmt::Display for ExchangeEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deposit {
                asset,
                account,
                amount,
                balance,
                ..
            } => write!(
                f,
                "DEPOSIT {amount} {asset} to {} (balance {balance})",
                account.short()
            ),
            Self::Withdraw {
                asset,
                account,
                amount,
                balance,
                ..
            } => write!(
                f,
                "WITHDRAW {amount} {asset} from {} (balance {balance})",
                account.short()
            ),
            Self::OrderPlaced { order } => write!(f, "ORDER {order}"),
            Self::OrderCancelled { order, .. } => write!(f, "CANCEL {order}"),
            Self::TradeExecuted { order, taker, .. } => {
                write!(f, "TRADE {order} filled by {}", taker.short())
            }
        }
    }
}
