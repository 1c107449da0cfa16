//! Exchange configuration.

use serde::{Deserialize, Serialize};

use crate::{AccountId, FeeSchedule, Result};

/// Configuration fixed at engine construction and immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// The distinguished account that receives all trade fees.
    pub fee_account: AccountId,
    /// The fee schedule applied to every fill.
    pub fees: FeeSchedule,
}

impl ExchangeConfig {
    /// Create a validated configuration.
    pub fn new(fee_account: AccountId, fee_percent: u8) -> Result<Self> {
        Ok(Self {
            fee_account,
            fees: FeeSchedule::new(fee_percent)?,
        })
    }
}
