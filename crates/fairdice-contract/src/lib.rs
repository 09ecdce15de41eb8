//! # fairdice-contract
//!
//! The FairDice game as a host-embeddable contract.
//!
//! ## Entry points
//!
//! | action | authority | effect |
//! |---|---|---|
//! | [`FairDice::on_transfer`] | token transfer notification | admit a bet |
//! | [`FairDice::reveal`] | configured revealer | settle a bet |
//! | [`FairDice::receipt`] | the contract itself | acknowledge admission |
//!
//! Invocations are all-or-nothing. Effects (payouts, receipts, settlement
//! records) are returned to the host only when the invocation commits.

pub mod contract;
pub mod telemetry;

pub use contract::FairDice;
pub use telemetry::{LogFormat, init_tracing};
