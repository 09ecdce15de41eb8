//! Monotonic bet identifier counter.
//!
//! The counter is seeded on first use from the bet store's key space, so a
//! counter introduced after bets already exist cannot collide with them.

use fairdice_types::BetId;
use serde::{Deserialize, Serialize};

use crate::bet_store::BetStore;

/// Singleton counter state. `None` until the first admission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdCounter {
    current_id: Option<u64>,
}

impl IdCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment and return the next identifier.
    pub fn next_id(&mut self, bets: &BetStore) -> BetId {
        let current = self
            .current_id
            .unwrap_or_else(|| bets.available_primary_key());
        let next = BetId(current).next();
        self.current_id = Some(next.0);
        next
    }
}

#[cfg(test)]
mod tests {
    use fairdice_types::{AccountName, Asset, Bet, Checksum256, RollUnder, Symbol};

    use super::*;

    fn bet(id: u64) -> Bet {
        Bet {
            id: BetId(id),
            player: AccountName::parse("alice").unwrap(),
            referrer: AccountName::parse("fairdicegame").unwrap(),
            amount: Asset::new(1000, Symbol::eos()),
            roll_under: RollUnder::new(50).unwrap(),
            seed_hash: Checksum256::ZERO,
            created_at: 0,
        }
    }

    #[test]
    fn first_id_on_empty_store() {
        let mut counter = IdCounter::new();
        assert_eq!(counter.current_id, None);
        assert_eq!(counter.next_id(&BetStore::new()), BetId(1));
        assert_eq!(counter.current_id, Some(1));
    }

    #[test]
    fn monotonic() {
        let mut counter = IdCounter::new();
        let store = BetStore::new();
        let ids: Vec<_> = (0..5).map(|_| counter.next_id(&store)).collect();
        assert_eq!(ids, vec![BetId(1), BetId(2), BetId(3), BetId(4), BetId(5)]);
    }

    #[test]
    fn seeded_from_existing_bets() {
        let mut store = BetStore::new();
        store.insert(bet(41)).unwrap();
        let mut counter = IdCounter::new();
        let id = counter.next_id(&store);
        assert!(id > BetId(41), "must not collide with pre-existing ids");
        assert_eq!(id, BetId(43));
    }

    #[test]
    fn never_reuses_after_store_drains() {
        let mut store = BetStore::new();
        let mut counter = IdCounter::new();
        let first = counter.next_id(&store);
        store.insert(bet(first.0)).unwrap();
        store.remove(first).unwrap();
        assert_eq!(counter.next_id(&store), BetId(2));
    }
}
