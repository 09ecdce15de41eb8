//! Bet store: the authoritative record of open wagers.

use std::collections::BTreeMap;

use fairdice_types::{Asset, Bet, BetId, FairdiceError, Result, Symbol};
use serde::{Deserialize, Serialize};

/// Open bets keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Bet>", into = "Vec<Bet>")]
pub struct BetStore {
    bets: BTreeMap<BetId, Bet>,
}

impl BetStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The lowest id above every stored key (`0` when empty).
    #[must_use]
    pub fn available_primary_key(&self) -> u64 {
        self.bets
            .last_key_value()
            .map_or(0, |(id, _)| id.0.saturating_add(1))
    }

    /// Persist a newly admitted bet.
    ///
    /// # Errors
    /// Returns [`FairdiceError::DuplicateBet`] if the id is taken.
    pub fn insert(&mut self, bet: Bet) -> Result<()> {
        if self.bets.contains_key(&bet.id) {
            return Err(FairdiceError::DuplicateBet(bet.id));
        }
        self.bets.insert(bet.id, bet);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: BetId) -> Option<&Bet> {
        self.bets.get(&id)
    }

    /// Look up a bet or fail with "bet not found".
    ///
    /// # Errors
    /// Returns [`FairdiceError::BetNotFound`].
    pub fn find_or_error(&self, id: BetId) -> Result<&Bet> {
        self.get(id).ok_or(FairdiceError::BetNotFound(id))
    }

    /// Delete a bet, returning it.
    ///
    /// # Errors
    /// Returns [`FairdiceError::BetNotFound`].
    pub fn remove(&mut self, id: BetId) -> Result<Bet> {
        self.bets.remove(&id).ok_or(FairdiceError::BetNotFound(id))
    }

    /// Open bets in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Bet> {
        self.bets.values()
    }

    /// Sum of open wagers in `symbol`. `None` on overflow.
    #[must_use]
    pub fn total_escrowed(&self, symbol: &Symbol) -> Option<Asset> {
        self.bets
            .values()
            .filter(|bet| &bet.amount.symbol == symbol)
            .try_fold(Asset::zero(symbol.clone()), |acc, bet| {
                acc.checked_add(&bet.amount)
            })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bets.is_empty()
    }
}

impl From<Vec<Bet>> for BetStore {
    fn from(bets: Vec<Bet>) -> Self {
        Self {
            bets: bets.into_iter().map(|bet| (bet.id, bet)).collect(),
        }
    }
}

impl From<BetStore> for Vec<Bet> {
    fn from(store: BetStore) -> Self {
        store.bets.into_values().collect()
    }
}
