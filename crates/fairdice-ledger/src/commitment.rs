//! Commitment registry: replay protection for seed hashes.
//!
//! Every admitted bet registers its seed hash with an expiration time. While
//! the entry exists the same hash cannot be used again. Entries are swept
//! lazily: each admission first removes every entry whose expiration is at
//! or before the current time, earliest first.
//!
//! Expiration bounds hash *replay*, not settlement: an open bet's entry may
//! be swept before the bet is revealed.

use std::collections::{BTreeSet, HashMap};

use fairdice_types::{Checksum256, FairdiceError, Result};
use serde::{Deserialize, Serialize};

/// One active commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentEntry {
    pub hash: Checksum256,
    pub expiration: u64,
}

/// Active commitments, indexed by hash and by `(expiration, hash)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CommitmentEntry>", into = "Vec<CommitmentEntry>")]
pub struct CommitmentRegistry {
    /// hash → expiration.
    entries: HashMap<Checksum256, u64>,
    /// Secondary index ordered by expiration for range sweeps.
    by_expiration: BTreeSet<(u64, Checksum256)>,
}

impl CommitmentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Is `hash` an active commitment?
    #[must_use]
    pub fn contains(&self, hash: &Checksum256) -> bool {
        self.entries.contains_key(hash)
    }

    /// Fail if `hash` is already committed.
    ///
    /// # Errors
    /// Returns [`FairdiceError::DuplicateSeedHash`].
    pub fn ensure_unused(&self, hash: &Checksum256) -> Result<()> {
        if self.contains(hash) {
            return Err(FairdiceError::DuplicateSeedHash(*hash));
        }
        Ok(())
    }

    /// Register a new commitment.
    ///
    /// # Errors
    /// Returns [`FairdiceError::DuplicateSeedHash`] if `hash` is active.
    pub fn insert(&mut self, hash: Checksum256, expiration: u64) -> Result<()> {
        self.ensure_unused(&hash)?;
        self.entries.insert(hash, expiration);
        self.by_expiration.insert((expiration, hash));
        Ok(())
    }

    /// Remove every entry with `expiration <= now`. Returns how many were removed.
    pub fn sweep(&mut self, now: u64) -> usize {
        let mut removed = 0;
        while let Some(&(expiration, hash)) = self.by_expiration.first() {
            if expiration > now {
                break;
            }
            self.by_expiration.pop_first();
            self.entries.remove(&hash);
            removed += 1;
        }
        if removed > 0 {
            tracing::debug!(removed, now, remaining = self.entries.len(), "Swept expired commitments");
        }
        removed
    }

    /// Expiration of an active commitment.
    #[must_use]
    pub fn expiration(&self, hash: &Checksum256) -> Option<u64> {
        self.entries.get(hash).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<CommitmentEntry>> for CommitmentRegistry {
    fn from(entries: Vec<CommitmentEntry>) -> Self {
        let mut registry = Self::new();
        for entry in entries {
            registry.entries.insert(entry.hash, entry.expiration);
            registry.by_expiration.insert((entry.expiration, entry.hash));
        }
        registry
    }
}

impl From<CommitmentRegistry> for Vec<CommitmentEntry> {
    fn from(registry: CommitmentRegistry) -> Self {
        registry
            .by_expiration
            .into_iter()
            .map(|(expiration, hash)| CommitmentEntry { hash, expiration })
            .collect()
    }
}
