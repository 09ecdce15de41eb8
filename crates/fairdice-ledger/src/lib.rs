//! # fairdice-ledger
//!
//! **State plane**: everything the game persists between invocations, plus
//! the arithmetic that sizes payouts against it.
//!
//! ## Components
//!
//! 1. **FundPool**: how much of the contract balance is locked by open bets
//! 2. **CommitmentRegistry**: active seed hashes with lazy expiration sweep
//! 3. **BetStore**: the authoritative record of open wagers
//! 4. **IdCounter**: monotonic bet identifiers seeded from the store
//! 5. **EscrowAudit**: checks `locked == Σ open bets` after every invocation
//! 6. **Outbox**: effects deferred until the invocation commits
//!
//! Only the offer and settlement engines mutate this state.

pub mod bet_store;
pub mod commitment;
pub mod escrow_audit;
pub mod fund_pool;
pub mod id_counter;
pub mod outbox;
pub mod payout;
pub mod state;

pub use bet_store::BetStore;
pub use commitment::{CommitmentEntry, CommitmentRegistry};
pub use escrow_audit::EscrowAudit;
pub use fund_pool::FundPool;
pub use id_counter::IdCounter;
pub use outbox::Outbox;
pub use payout::{compute_payout, max_payout, referral_reward};
pub use state::ContractState;
