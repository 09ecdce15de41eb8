//! # Bet: one open wager and its settlement record
//!
//! ## Lifecycle
//!
//! ```text
//!   transfer + signed memo    reveal(id, seed)
//!   ─────────────────────▶ OPEN ─────────────────▶ (removed, BetResult emitted)
//! ```
//!
//! A bet is never partially updated: it exists in the store exactly as it
//! was admitted until the settlement that deletes it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountName, Asset, BetId, Checksum256, FairdiceError, Result, constants};

/// The player's win threshold. A roll strictly below it wins.
///
/// Always within `[ROLL_UNDER_MIN, ROLL_UNDER_MAX]`; outside that range the
/// payout odds degenerate (`roll_under = 1` never wins) or exceed the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RollUnder(u8);

impl RollUnder {
    /// # Errors
    /// Returns [`FairdiceError::RollUnderOutOfRange`] outside `[2, 96]`.
    pub fn new(value: u64) -> Result<Self> {
        match u8::try_from(value) {
            Ok(v) if (constants::ROLL_UNDER_MIN..=constants::ROLL_UNDER_MAX).contains(&v) => {
                Ok(Self(v))
            }
            _ => Err(FairdiceError::RollUnderOutOfRange(value)),
        }
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Does `roll` (in `1..=100`) win against this threshold?
    #[must_use]
    pub fn wins(self, roll: u8) -> bool {
        roll < self.0
    }

    /// Win probability in percent: `roll_under - 1`.
    #[must_use]
    pub fn win_chance_percent(self) -> u8 {
        self.0 - 1
    }
}

impl TryFrom<u8> for RollUnder {
    type Error = FairdiceError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(u64::from(value))
    }
}

impl From<RollUnder> for u8 {
    fn from(r: RollUnder) -> Self {
        r.0
    }
}

impl std::fmt::Display for RollUnder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An open wager: escrowed funds bound to an oracle commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    pub id: BetId,
    /// The account that funded the wager.
    pub player: AccountName,
    /// Receives the referral reward. The contract itself when none was named.
    pub referrer: AccountName,
    /// Escrowed wager.
    pub amount: Asset,
    pub roll_under: RollUnder,
    /// Commitment to the oracle's not-yet-revealed seed.
    pub seed_hash: Checksum256,
    /// Admission time, unix seconds.
    pub created_at: u64,
}

impl Bet {
    /// Admission time as a UTC timestamp, if representable.
    #[must_use]
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(i64::try_from(self.created_at).ok()?, 0)
    }
}

/// Immutable, public settlement record. Proves which committed seed produced
/// the roll and what was paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetResult {
    pub bet_id: BetId,
    pub player: AccountName,
    pub referrer: AccountName,
    pub amount: Asset,
    pub roll_under: RollUnder,
    /// Outcome in `1..=100`.
    pub random_roll: u8,
    /// The revealed seed.
    pub seed: Checksum256,
    /// The commitment the seed was checked against.
    pub seed_hash: Checksum256,
    /// Zero on a loss.
    pub payout: Asset,
}

impl BetResult {
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.roll_under.wins(self.random_roll)
    }
}
