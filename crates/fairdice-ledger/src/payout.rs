//! Payout arithmetic.
//!
//! ```text
//! max_payout    = floor(amount * 98 / (roll_under - 1))
//! bonus_ceiling = available / 100
//! payout        = min(max_payout, bonus_ceiling)
//! referral      = amount / 200
//! ```
//!
//! The 98 numerator fixes a 2% house edge independent of the threshold.

use fairdice_types::{Asset, RollUnder, constants};

/// Best-case winnings for a wager at `roll_under`, before the bonus cap.
///
/// Computed in 128-bit space; saturates at the largest valid asset amount.
#[must_use]
pub fn max_payout(roll_under: RollUnder, offer: &Asset) -> Asset {
    let stake = u128::try_from(offer.amount.max(0)).unwrap_or(0);
    let odds_denominator = u128::from(roll_under.win_chance_percent());
    let raw = stake * constants::PAYOUT_ODDS_NUMERATOR / odds_denominator;
    let amount = i64::try_from(raw)
        .unwrap_or(constants::MAX_ASSET_AMOUNT)
        .min(constants::MAX_ASSET_AMOUNT);
    Asset::new(amount, offer.symbol.clone())
}

/// Winnings actually paid: `max_payout` capped by `max_bonus`.
#[must_use]
pub fn compute_payout(roll_under: RollUnder, offer: &Asset, max_bonus: &Asset) -> Asset {
    max_payout(roll_under, offer).min(max_bonus.clone())
}

/// The referrer's share of a wager, independent of the outcome.
#[must_use]
pub fn referral_reward(amount: &Asset) -> Asset {
    amount.div(constants::REFERRAL_DIVISOR)
}
