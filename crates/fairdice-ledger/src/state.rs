//! The complete persistent state of one game contract.
//!
//! The state is a plain value: the contract clones it at the start of each
//! invocation and swaps the clone back in only when the invocation succeeds.

use fairdice_types::{Asset, Result, Symbol};
use serde::{Deserialize, Serialize};

use crate::{
    bet_store::BetStore, commitment::CommitmentRegistry, escrow_audit::EscrowAudit,
    fund_pool::FundPool, id_counter::IdCounter,
};

/// All tables owned by the game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractState {
    pub bets: BetStore,
    pub commitments: CommitmentRegistry,
    pub ids: IdCounter,
    /// Created lazily on first access.
    fund_pool: Option<FundPool>,
    audit: EscrowAudit,
}

impl ContractState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current fund pool; an empty pool if none was created yet.
    #[must_use]
    pub fn fund_pool(&self, symbol: &Symbol) -> FundPool {
        self.fund_pool
            .clone()
            .unwrap_or_else(|| FundPool::new(symbol.clone()))
    }

    /// The fund pool, created on first access.
    pub fn fund_pool_mut(&mut self, symbol: &Symbol) -> &mut FundPool {
        self.fund_pool
            .get_or_insert_with(|| FundPool::new(symbol.clone()))
    }

    /// Lock `amount` in the pool and record it for the escrow audit.
    ///
    /// # Errors
    /// Propagates [`FundPool::lock`] errors; nothing is recorded on failure.
    pub fn lock(&mut self, amount: &Asset) -> Result<()> {
        self.fund_pool_mut(&amount.symbol).lock(amount)?;
        self.audit.record_lock(amount);
        Ok(())
    }

    /// Unlock `amount` in the pool and record it for the escrow audit.
    ///
    /// # Errors
    /// Propagates [`FundPool::unlock`] errors; nothing is recorded on failure.
    pub fn unlock(&mut self, amount: &Asset) -> Result<()> {
        self.fund_pool_mut(&amount.symbol).unlock(amount)?;
        self.audit.record_release(amount);
        Ok(())
    }

    /// Unlocked part of the contract `balance`.
    ///
    /// # Errors
    /// Returns `FundPoolOverdraw` if `balance` is below the locked total.
    pub fn available_balance(&self, balance: &Asset) -> Result<Asset> {
        self.fund_pool(&balance.symbol).available(balance)
    }

    /// The most any single wager may win right now.
    ///
    /// # Errors
    /// Returns `FundPoolOverdraw` if `balance` is below the locked total.
    pub fn max_bonus(&self, balance: &Asset) -> Result<Asset> {
        self.fund_pool(&balance.symbol).max_bonus(balance)
    }

    /// Verify `Σ locks - Σ unlocks == locked == Σ open bets`.
    ///
    /// # Errors
    /// Returns `EscrowInvariantViolation` on any mismatch.
    pub fn verify_escrow(&self, symbol: &Symbol) -> Result<()> {
        self.audit
            .verify(&self.fund_pool(symbol), &self.bets, symbol)
    }

    #[must_use]
    pub fn escrow_audit(&self) -> &EscrowAudit {
        &self.audit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eos(amount: i64) -> Asset {
        Asset::new(amount, Symbol::eos())
    }

    #[test]
    fn fund_pool_lazily_created() {
        let mut state = ContractState::new();
        assert!(state.fund_pool(&Symbol::eos()).locked().is_zero());
        assert_eq!(state, ContractState::new(), "reading must not create the pool");

        state.lock(&eos(1000)).unwrap();
        assert_eq!(state.fund_pool(&Symbol::eos()).locked(), &eos(1000));
    }

    #[test]
    fn failed_unlock_records_nothing() {
        let mut state = ContractState::new();
        state.lock(&eos(100)).unwrap();
        assert!(state.unlock(&eos(200)).is_err());
        assert_eq!(state.escrow_audit().total_released(), 0);
        assert_eq!(state.fund_pool(&Symbol::eos()).locked(), &eos(100));
    }

    #[test]
    fn bonus_uses_available_balance() {
        let mut state = ContractState::new();
        state.lock(&eos(10_000)).unwrap();
        assert_eq!(state.available_balance(&eos(110_000)).unwrap(), eos(100_000));
        assert_eq!(state.max_bonus(&eos(110_000)).unwrap(), eos(1000));
    }
}
