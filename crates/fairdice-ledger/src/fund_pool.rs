//! Fund pool: escrow accounting for open wagers.
//!
//! Tracks how much of the contract balance is locked against open bets.
//! Two invariants hold at all times:
//!
//! ```text
//! locked ≥ 0
//! available = balance - locked ≥ 0
//! ```
//!
//! All mutations are atomic: either the full operation succeeds or the pool
//! is unchanged.

use fairdice_types::{Asset, FairdiceError, Result, Symbol, constants};
use serde::{Deserialize, Serialize};

/// Funds reserved against open bets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundPool {
    locked: Asset,
}

impl FundPool {
    /// An empty pool for `symbol`.
    #[must_use]
    pub fn new(symbol: Symbol) -> Self {
        Self {
            locked: Asset::zero(symbol),
        }
    }

    #[must_use]
    pub fn locked(&self) -> &Asset {
        &self.locked
    }

    /// Reserve `amount` for a newly admitted bet.
    ///
    /// # Errors
    /// Returns `ArithmeticOverflow` on symbol mismatch or overflow.
    pub fn lock(&mut self, amount: &Asset) -> Result<()> {
        self.locked = self
            .locked
            .checked_add(amount)
            .ok_or_else(|| FairdiceError::ArithmeticOverflow {
                reason: format!("lock {amount} onto {}", self.locked),
            })?;
        Ok(())
    }

    /// Release `amount` once its bet is resolved.
    ///
    /// # Errors
    /// Returns `FundUnlockUnderflow` if `locked` would go negative.
    pub fn unlock(&mut self, amount: &Asset) -> Result<()> {
        let next = self
            .locked
            .checked_sub(amount)
            .ok_or_else(|| FairdiceError::ArithmeticOverflow {
                reason: format!("unlock {amount} from {}", self.locked),
            })?;
        if next.amount < 0 {
            return Err(FairdiceError::FundUnlockUnderflow {
                locked: self.locked.clone(),
                amount: amount.clone(),
            });
        }
        self.locked = next;
        Ok(())
    }

    /// Unlocked part of `balance`.
    ///
    /// # Errors
    /// Returns `FundPoolOverdraw` if `balance < locked`.
    pub fn available(&self, balance: &Asset) -> Result<Asset> {
        let available = balance.checked_sub(&self.locked).ok_or_else(|| {
            FairdiceError::ArithmeticOverflow {
                reason: format!("balance {balance} minus locked {}", self.locked),
            }
        })?;
        if available.amount < 0 {
            return Err(FairdiceError::FundPoolOverdraw {
                balance: balance.clone(),
                locked: self.locked.clone(),
            });
        }
        Ok(available)
    }

    /// The most a single wager may win: 1% of the available balance.
    ///
    /// # Errors
    /// Propagates [`FundPool::available`] errors.
    pub fn max_bonus(&self, balance: &Asset) -> Result<Asset> {
        Ok(self.available(balance)?.div(constants::BONUS_DIVISOR))
    }
}
