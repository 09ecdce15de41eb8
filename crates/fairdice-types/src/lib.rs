//! # fairdice-types
//!
//! Shared types, errors, and configuration for the **FairDice** game.
//!
//! This crate is the leaf dependency of the workspace. Every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountName`], [`BetId`], [`Checksum256`], [`OraclePublicKey`]
//! - **Currency model**: [`Asset`], [`Symbol`]
//! - **Wager model**: [`Bet`], [`RollUnder`], [`BetResult`]
//! - **Effects**: [`Effect`], [`TokenTransfer`]
//! - **Configuration**: [`GameConfig`]
//! - **Host capabilities**: [`HostEnv`], [`CryptoProvider`], [`HostCrypto`]
//! - **Errors**: [`FairdiceError`] with `FD_ERR_` prefix codes
//! - **Constants**: game parameters and default accounts

pub mod asset;
pub mod bet;
pub mod config;
pub mod constants;
pub mod effect;
pub mod error;
pub mod host;
pub mod ids;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

// Re-export all primary types at crate root for ergonomic imports:
//   use fairdice_types::{Asset, Bet, Checksum256, FairdiceError, ...};

pub use asset::*;
pub use bet::*;
pub use config::*;
pub use effect::*;
pub use error::*;
pub use host::*;
pub use ids::*;

// Constants are accessed via `fairdice_types::constants::FOO`
// (not re-exported to avoid name collisions).
