//! Offer Engine: turns an inbound deposit into an escrowed [`Bet`].
//!
//! Every check runs before the first mutation. A rejected deposit leaves the
//! state as it found it, and the contract additionally discards its scratch
//! copy on error.

use fairdice_ledger::{ContractState, Outbox, max_payout};
use fairdice_types::{
    Asset, Bet, BetId, CryptoProvider, FairdiceError, GameConfig, HostEnv, Result, RollUnder,
    TokenTransfer,
};

use crate::memo::OfferMemo;

/// Validates deposits and admits bets.
pub struct OfferEngine<'a, C: CryptoProvider + ?Sized> {
    config: &'a GameConfig,
    crypto: &'a C,
}

impl<'a, C: CryptoProvider + ?Sized> OfferEngine<'a, C> {
    #[must_use]
    pub fn new(config: &'a GameConfig, crypto: &'a C) -> Self {
        Self { config, crypto }
    }

    /// Handle a token transfer notification.
    ///
    /// Returns `Ok(None)` for transfers that are not deposits into the game
    /// (outgoing payouts, or transfers between other accounts).
    ///
    /// # Errors
    /// Any validation failure; `state` and `outbox` are untouched on error.
    pub fn offer<E: HostEnv + ?Sized>(
        &self,
        state: &mut ContractState,
        env: &E,
        transfer: &TokenTransfer,
        outbox: &mut Outbox,
    ) -> Result<Option<BetId>> {
        let contract = &self.config.contract;
        if transfer.from == *contract || transfer.to != *contract {
            tracing::trace!(from = %transfer.from, to = %transfer.to, "Transfer ignored");
            return Ok(None);
        }

        let quantity = &transfer.quantity;
        self.check_quantity(quantity)?;

        let memo = OfferMemo::parse(&transfer.memo)?;
        let roll_under = RollUnder::new(memo.roll_under)?;

        let balance = env.balance_of(contract, &self.config.symbol);
        let max_bonus = state.max_bonus(&balance)?;
        let best_case = max_payout(roll_under, quantity);
        if best_case.amount > max_bonus.amount {
            return Err(FairdiceError::PayoutExceedsBonus {
                max_payout: best_case,
                max_bonus,
            });
        }

        state.commitments.ensure_unused(&memo.seed_hash)?;

        let now = env.now();
        if memo.expiration <= now {
            return Err(FairdiceError::SeedHashExpired {
                expiration: memo.expiration,
                now,
            });
        }

        self.verify_signature(&memo)?;

        let player = transfer.from.clone();
        let referrer = memo.referrer.unwrap_or_else(|| contract.clone());
        if referrer == player {
            return Err(FairdiceError::SelfReferral);
        }

        // Validation complete; mutate.
        let id = state.ids.next_id(&state.bets);
        let bet = Bet {
            id,
            player,
            referrer,
            amount: quantity.clone(),
            roll_under,
            seed_hash: memo.seed_hash,
            created_at: now,
        };
        state.bets.insert(bet.clone())?;
        let swept = state.commitments.sweep(now);
        state.commitments.insert(memo.seed_hash, memo.expiration)?;
        state.lock(quantity)?;

        tracing::info!(
            bet_id = %id,
            player = %bet.player,
            amount = %bet.amount,
            roll_under = %roll_under,
            seed_hash = %memo.seed_hash.short(),
            swept,
            "Bet admitted"
        );
        outbox.receipt(bet);
        Ok(Some(id))
    }

    fn check_quantity(&self, quantity: &Asset) -> Result<()> {
        if quantity.symbol != self.config.symbol {
            return Err(FairdiceError::WrongSymbol {
                expected: self.config.symbol.to_string(),
                actual: quantity.symbol.to_string(),
            });
        }
        if !quantity.is_valid() {
            return Err(FairdiceError::InvalidQuantity(quantity.to_string()));
        }
        let minimum = self.config.min_deposit_asset();
        if quantity.amount < minimum.amount {
            return Err(FairdiceError::DepositTooSmall {
                minimum,
                actual: quantity.clone(),
            });
        }
        Ok(())
    }

    fn verify_signature(&self, memo: &OfferMemo) -> Result<()> {
        let signature = hex::decode(&memo.signature).map_err(|_| FairdiceError::InvalidSignature)?;
        let valid = self.crypto.verify_signature(
            memo.signed_payload.as_bytes(),
            &signature,
            &self.config.oracle_public_key,
        );
        if !valid {
            tracing::warn!(payload = %memo.signed_payload, "Oracle signature rejected");
            return Err(FairdiceError::InvalidSignature);
        }
        Ok(())
    }
}
