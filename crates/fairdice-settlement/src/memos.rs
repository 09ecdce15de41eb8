//! Memo text attached to outbound payouts.

use fairdice_types::{AccountName, BetId};

#[must_use]
pub fn winner_memo(id: BetId, player: &AccountName) -> String {
    format!("bet id:{id} player: {player} winner!")
}

#[must_use]
pub fn referral_memo(id: BetId, player: &AccountName) -> String {
    format!("bet id:{id} player: {player} referral reward!")
}
