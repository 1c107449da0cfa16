//! The asset-transfer boundary.
//!
//! The engine never moves external value itself; it drives a collaborator
//! through this trait. Both calls are synchronous and fallible. On the
//! deposit path the engine applies no ledger mutation until `transfer_in`
//! has succeeded; on the withdrawal path the ledger debit happens first,
//! and a `transfer_out` failure afterwards is a non-recoverable
//! inconsistency (there is no compensating credit path).

use openswap_types::{AccountId, Amount, Asset, Result, TokenId};

/// Moves value between external custody and the exchange.
///
/// Implementations report failure as
/// [`ExchangeError::TransferFailed`](openswap_types::ExchangeError::TransferFailed);
/// the engine propagates it unchanged.
pub trait AssetTransferService {
    /// Move `amount` of `token` from `from`'s external custody into the
    /// exchange's custody. Called only on the token deposit path; the
    /// native asset arrives with the call itself and never routes here.
    fn transfer_in(&mut self, token: TokenId, from: AccountId, amount: Amount) -> Result<()>;

    /// Move `amount` of `asset` from exchange custody to `to`. Called
    /// only on the withdrawal paths, after the ledger debit succeeded.
    fn transfer_out(&mut self, asset: Asset, to: AccountId, amount: Amount) -> Result<()>;
}
