//! Fee policy.
//!
//! The fee rate is an integer percentage fixed at construction. The fee on
//! a fill is `floor(amount * percent / 100)` with truncating integer
//! division; settlement amounts must match the host environment
//! bit-for-bit, so no rounding.

use serde::{Deserialize, Serialize};

use crate::{Amount, ExchangeError, Result, constants};

/// An immutable integer-percent fee schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    percent: u8,
}

impl FeeSchedule {
    /// Create a schedule. Rates above 100% are a configuration error.
    pub fn new(percent: u8) -> Result<Self> {
        if percent > constants::MAX_FEE_PERCENT {
            return Err(ExchangeError::Configuration(format!(
                "fee percent {percent} exceeds {}",
                constants::MAX_FEE_PERCENT
            )));
        }
        Ok(Self { percent })
    }

    #[must_use]
    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Fee charged on `amount`: `floor(amount * percent / 100)`.
    pub fn fee_on(&self, amount: Amount) -> Result<Amount> {
        let scaled = amount
            .0
            .checked_mul(u128::from(self.percent))
            .ok_or(ExchangeError::Overflow)?;
        Ok(Amount(scaled / 100))
    }
}
