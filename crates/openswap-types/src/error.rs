//! Error types for the OpenSwap exchange core.
//!
//! All errors use the `OSW_ERR_` prefix convention for easy grepping in
//! logs. Error codes are grouped by subsystem:
//! - 1xx: Order errors
//! - 2xx: Balance errors
//! - 3xx: Asset / transfer errors
//! - 9xx: General errors

use thiserror::Error;

use crate::{AccountId, Amount, Asset, OrderId, TokenId};

/// Central error enum for all OpenSwap operations.
///
/// Every validation failure aborts the whole operation with no partial
/// mutation; none of these are retried internally.
#[derive(Debug, Error)]
pub enum ExchangeError {
    // =================================================================
    // Order Errors (1xx)
    // =================================================================
    /// The requested order id was never allocated.
    #[error("OSW_ERR_100: Order not found: {0}")]
    OrderNotFound(OrderId),

    /// The order was already cancelled or filled; both states are terminal.
    #[error("OSW_ERR_101: Order already finalized: {0}")]
    AlreadyFinalized(OrderId),

    /// Cancellation attempted by an account other than the order's maker.
    #[error("OSW_ERR_102: Unauthorized: {caller} is not the maker of {order}")]
    Unauthorized { order: OrderId, caller: AccountId },

    /// An order with this id is already stored.
    #[error("OSW_ERR_103: Order already exists: {0}")]
    DuplicateOrder(OrderId),

    // =================================================================
    // Balance Errors (2xx)
    // =================================================================
    /// A debit exceeds the current balance.
    #[error("OSW_ERR_200: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    /// A credit would exceed the representable range. Fatal: indicates a
    /// deeper invariant breach, since honest supply cannot reach it.
    #[error("OSW_ERR_201: Balance overflow")]
    Overflow,

    // =================================================================
    // Asset / Transfer Errors (3xx)
    // =================================================================
    /// The native asset was used where a token is required.
    #[error("OSW_ERR_300: Invalid asset for token operation: {asset}")]
    InvalidAsset { asset: Asset },

    /// The external transfer collaborator reported failure.
    #[error("OSW_ERR_301: Transfer failed: {reason}")]
    TransferFailed { reason: String },

    /// The token id is not registered with the custody collaborator.
    #[error("OSW_ERR_302: Unknown token: {0}")]
    UnknownToken(TokenId),

    /// Supply conservation invariant violated. Critical safety alert.
    #[error("OSW_ERR_303: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    /// A delegated transfer exceeds the approved allowance.
    #[error("OSW_ERR_304: Insufficient allowance: need {needed}, have {available}")]
    InsufficientAllowance { needed: Amount, available: Amount },

    // =================================================================
    // General (9xx)
    // =================================================================
    /// Configuration error (fee rate out of range, etc.).
    #[error("OSW_ERR_900: Configuration error: {0}")]
    Configuration(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, ExchangeError>;
