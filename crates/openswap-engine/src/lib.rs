//! # openswap-engine
//!
//! The OpenSwap exchange core: custodial balances, an append-only order
//! log, and atomic one-shot fills with fee routing.
//!
//! ## Architecture
//!
//! Leaf-first:
//! 1. **Ledger**: per-(asset, account) balance bookkeeping, non-negative
//!    by construction
//! 2. **OrderBook**: order storage plus sequential id allocation
//! 3. **SettlementEngine**: the public operations (deposit, withdraw,
//!    make, cancel, fill) over Ledger + OrderBook, with fee routing
//! 4. **AssetTransferService**: the boundary trait external custody
//!    implements; [`TokenVault`] is the in-memory reference
//! 5. **SupplyAudit**: the conservation invariant checker
//!
//! ## Operation flow
//!
//! ```text
//! caller -> SettlementEngine -> Ledger / OrderBook (atomic mutation)
//!        -> ExchangeEvent (returned to the caller)
//! ```
//!
//! Every operation either fully completes or fully fails; no partial
//! state is ever observable.

pub mod conservation;
pub mod engine;
pub mod ledger;
pub mod orderbook;
pub mod transfer;
pub mod vault;

pub use conservation::SupplyAudit;
pub use engine::SettlementEngine;
pub use ledger::Ledger;
pub use orderbook::OrderBook;
pub use transfer::AssetTransferService;
pub use vault::{TokenMetadata, TokenVault};
