//! # fairdice-settlement
//!
//! **Finality plane**: opens seed commitments and closes bets.
//!
//! ## Architecture
//!
//! A privileged reveal hands the Settlement Engine a bet id and a seed:
//! 1. **roll**: checks `sha256(hex(seed)) == seed_hash` and derives
//!    `roll = (first 8 seed bytes, big-endian) % 100 + 1`
//! 2. **settle**: sizes the payout, releases escrow, queues payouts and the
//!    public [`BetResult`](fairdice_types::BetResult)
//! 3. **memos**: human-readable text for outbound transfers
//!
//! A bet is settled at most once: settlement removes it from the store.

pub mod memos;
pub mod roll;
pub mod settle;

pub use memos::{referral_memo, winner_memo};
pub use roll::{compute_roll, uint64_hash, verify_seed};
pub use settle::SettlementEngine;
