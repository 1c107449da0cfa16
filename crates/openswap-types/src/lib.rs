//! # openswap-types
//!
//! Shared types, errors, and configuration for the **OpenSwap** custodial
//! exchange core.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`TokenId`], [`OrderId`]
//! - **Asset model**: [`Asset`], [`Amount`]
//! - **Order model**: [`Order`]
//! - **Event model**: [`ExchangeEvent`]
//! - **Fee policy**: [`FeeSchedule`]
//! - **Configuration**: [`ExchangeConfig`]
//! - **Errors**: [`ExchangeError`] with `OSW_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod asset;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod fee;
pub mod ids;
pub mod order;

// Re-export all primary types at crate root for ergonomic imports:
//   use openswap_types::{Asset, Amount, Order, ExchangeEvent, ...};

pub use asset::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use fee::*;
pub use ids::*;
pub use order::*;

// Constants are accessed via `openswap_types::constants::FOO`
// (not re-exported to avoid name collisions).
