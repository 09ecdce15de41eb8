//! Escrow conservation invariant checker.
//!
//! Invariant enforced after every committed invocation:
//! ```text
//! Σ(locks) - Σ(unlocks) == fund_pool.locked == Σ(open bet amounts)
//! ```
//!
//! If this ever breaks, the invocation is refused. Funds locked without a
//! bet, or bets without locked funds, mean the pool can no longer promise
//! to cover what it owes.

use fairdice_types::{Asset, FairdiceError, Result, Symbol};
use serde::{Deserialize, Serialize};

use crate::{bet_store::BetStore, fund_pool::FundPool};

/// Lifetime lock/unlock totals, in base units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowAudit {
    locked_total: u128,
    released_total: u128,
}

impl EscrowAudit {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_lock(&mut self, amount: &Asset) {
        self.locked_total += u128::try_from(amount.amount).unwrap_or(0);
    }

    pub fn record_release(&mut self, amount: &Asset) {
        self.released_total += u128::try_from(amount.amount).unwrap_or(0);
    }

    /// `Σ(locks) - Σ(unlocks)`, or `None` if more was released than locked.
    #[must_use]
    pub fn expected_locked(&self) -> Option<u128> {
        self.locked_total.checked_sub(self.released_total)
    }

    #[must_use]
    pub fn total_locked(&self) -> u128 {
        self.locked_total
    }

    #[must_use]
    pub fn total_released(&self) -> u128 {
        self.released_total
    }

    /// Check the pool against the ledger of locks and the open bets.
    ///
    /// # Errors
    /// Returns [`FairdiceError::EscrowInvariantViolation`] on any mismatch.
    pub fn verify(&self, pool: &FundPool, bets: &BetStore, symbol: &Symbol) -> Result<()> {
        let locked = pool.locked();
        if locked.amount < 0 {
            return Err(violation(format!("negative locked total {locked}")));
        }
        let open = bets
            .total_escrowed(symbol)
            .ok_or_else(|| violation("open bet total overflows".into()))?;
        if &open != locked {
            return Err(violation(format!(
                "locked {locked} != open bets {open} ({} bets)",
                bets.len()
            )));
        }
        let expected = self
            .expected_locked()
            .ok_or_else(|| violation("released more than was ever locked".into()))?;
        if u128::try_from(locked.amount).ok() != Some(expected) {
            return Err(violation(format!(
                "locked {locked} != locks {} - releases {}",
                self.locked_total, self.released_total
            )));
        }
        Ok(())
    }
}

fn violation(reason: String) -> FairdiceError {
    FairdiceError::EscrowInvariantViolation { reason }
}
