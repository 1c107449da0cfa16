//! System-wide constants for the OpenSwap exchange core.

/// Highest representable fee rate (whole percent).
pub const MAX_FEE_PERCENT: u8 = 100;

/// Fee rate used by the reference deployment (whole percent).
pub const DEFAULT_FEE_PERCENT: u8 = 10;

/// The id assigned to the first order.
pub const FIRST_ORDER_ID: u64 = 1;

/// Decimal places of the native asset's smallest unit.
pub const NATIVE_DECIMALS: u32 = 18;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "OpenSwap";
