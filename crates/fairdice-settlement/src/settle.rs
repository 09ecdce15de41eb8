//! Settlement Engine: opens a commitment, rolls, pays, and closes the bet.
//!
//! Order of operations for one reveal:
//! 1. Look up the bet (a settled bet is gone, so double settlement fails here)
//! 2. Verify the seed against the stored commitment
//! 3. Derive the roll
//! 4. On a win, size the payout while the wager is still locked
//! 5. Unlock the wager
//! 6. Pay the referral reward unless the referrer is the house or it
//!    rounds down to zero
//! 7. Remove the bet
//! 8. Publish the [`BetResult`]

use fairdice_ledger::{ContractState, Outbox, compute_payout, referral_reward};
use fairdice_types::{
    Asset, BetId, BetResult, Checksum256, CryptoProvider, GameConfig, HostEnv, Result,
};

use crate::{
    memos::{referral_memo, winner_memo},
    roll::{compute_roll, verify_seed},
};

/// Settles open bets once the oracle reveals their seeds.
pub struct SettlementEngine<'a, C: CryptoProvider + ?Sized> {
    config: &'a GameConfig,
    crypto: &'a C,
}

impl<'a, C: CryptoProvider + ?Sized> SettlementEngine<'a, C> {
    #[must_use]
    pub fn new(config: &'a GameConfig, crypto: &'a C) -> Self {
        Self { config, crypto }
    }

    /// Settle bet `id` with the revealed `seed`.
    ///
    /// The caller must already have checked that the revealer authorised
    /// this call.
    ///
    /// # Errors
    /// - `BetNotFound` if `id` is not open
    /// - `InvalidSeed` if `seed` does not open the bet's commitment
    /// - accounting errors from the fund pool
    pub fn reveal<E: HostEnv + ?Sized>(
        &self,
        state: &mut ContractState,
        env: &E,
        id: BetId,
        seed: &Checksum256,
        outbox: &mut Outbox,
    ) -> Result<BetResult> {
        let bet = state.bets.find_or_error(id)?.clone();
        if let Err(err) = verify_seed(self.crypto, &bet, seed) {
            tracing::warn!(
                bet_id = %id,
                seed_hash = %bet.seed_hash.short(),
                "Revealed seed does not match commitment"
            );
            return Err(err);
        }

        let random_roll = compute_roll(seed);
        let contract = &self.config.contract;

        let payout = if bet.roll_under.wins(random_roll) {
            let balance = env.balance_of(contract, &bet.amount.symbol);
            let max_bonus = state.max_bonus(&balance)?;
            compute_payout(bet.roll_under, &bet.amount, &max_bonus)
        } else {
            Asset::zero(bet.amount.symbol.clone())
        };
        if !payout.is_zero() {
            outbox.transfer(contract, &bet.player, payout.clone(), winner_memo(id, &bet.player));
        }

        state.unlock(&bet.amount)?;

        let reward = referral_reward(&bet.amount);
        if bet.referrer != *contract && !reward.is_zero() {
            outbox.transfer(contract, &bet.referrer, reward, referral_memo(id, &bet.player));
        }

        let bet = state.bets.remove(id)?;
        let result = BetResult {
            bet_id: id,
            player: bet.player,
            referrer: bet.referrer,
            amount: bet.amount,
            roll_under: bet.roll_under,
            random_roll,
            seed: *seed,
            seed_hash: bet.seed_hash,
            payout,
        };

        tracing::info!(
            bet_id = %id,
            roll = random_roll,
            roll_under = %result.roll_under,
            payout = %result.payout,
            win = result.is_win(),
            "Bet settled"
        );
        outbox.audit_result(&self.config.audit_log, result.clone());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use fairdice_types::{
        AccountName, Bet, Effect, FairdiceError, HostCrypto, OraclePublicKey, RollUnder, Symbol,
        seed_commitment, testing::seed_for_roll,
    };

    use super::*;

    struct FixedEnv {
        balance: i64,
    }

    impl HostEnv for FixedEnv {
        fn now(&self) -> u64 {
            1_700_000_000
        }

        fn balance_of(&self, _: &AccountName, symbol: &Symbol) -> Asset {
            Asset::new(self.balance, symbol.clone())
        }
    }

    fn name(s: &str) -> AccountName {
        AccountName::parse(s).unwrap()
    }

    fn config() -> GameConfig {
        GameConfig::eos(OraclePublicKey([1u8; 32]))
    }

    /// Admit a bet directly into `state`, bypassing the Offer Engine.
    fn open_bet(
        state: &mut ContractState,
        roll_under: u64,
        amount: i64,
        referrer: &str,
        seed: &Checksum256,
    ) -> BetId {
        let id = state.ids.next_id(&state.bets);
        let bet = Bet {
            id,
            player: name("alice"),
            referrer: name(referrer),
            amount: Asset::new(amount, Symbol::eos()),
            roll_under: RollUnder::new(roll_under).unwrap(),
            seed_hash: seed_commitment(&HostCrypto, seed),
            created_at: 1_700_000_000,
        };
        state.lock(&bet.amount).unwrap();
        state.bets.insert(bet).unwrap();
        id
    }

    fn transfers(outbox: &Outbox) -> Vec<(String, i64, String)> {
        outbox
            .pending()
            .iter()
            .filter_map(Effect::as_transfer)
            .map(|t| (t.to.to_string(), t.quantity.amount, t.memo.clone()))
            .collect()
    }

    #[test]
    fn winning_bet_with_referrer() {
        let config = config();
        let mut state = ContractState::new();
        let seed = seed_for_roll(20, 1);
        let id = open_bet(&mut state, 50, 1000, "bob", &seed);

        let mut outbox = Outbox::new();
        let result = SettlementEngine::new(&config, &HostCrypto)
            .reveal(&mut state, &FixedEnv { balance: 10_000_000 }, id, &seed, &mut outbox)
            .unwrap();

        assert_eq!(result.random_roll, 20);
        assert!(result.is_win());
        assert_eq!(result.payout.amount, 2000);
        assert_eq!(
            transfers(&outbox),
            vec![
                ("alice".to_string(), 2000, "bet id:1 player: alice winner!".to_string()),
                ("bob".to_string(), 5, "bet id:1 player: alice referral reward!".to_string()),
            ]
        );
        assert!(matches!(
            outbox.pending().last(),
            Some(Effect::AuditResult { log, .. }) if log == &config.audit_log
        ));
        assert!(state.bets.is_empty());
        assert!(state.fund_pool(&Symbol::eos()).locked().is_zero());
        state.verify_escrow(&Symbol::eos()).unwrap();
    }

    #[test]
    fn losing_bet_pays_referral_only() {
        let config = config();
        let mut state = ContractState::new();
        let seed = seed_for_roll(50, 1);
        let id = open_bet(&mut state, 50, 1000, "bob", &seed);

        let mut outbox = Outbox::new();
        let result = SettlementEngine::new(&config, &HostCrypto)
            .reveal(&mut state, &FixedEnv { balance: 10_000_000 }, id, &seed, &mut outbox)
            .unwrap();

        assert!(!result.is_win(), "roll equal to threshold loses");
        assert!(result.payout.is_zero());
        assert_eq!(
            transfers(&outbox),
            vec![("bob".to_string(), 5, "bet id:1 player: alice referral reward!".to_string())]
        );
    }

    #[test]
    fn house_referrer_gets_nothing() {
        let config = config();
        let mut state = ContractState::new();
        let seed = seed_for_roll(99, 1);
        let id = open_bet(&mut state, 50, 1000, "fairdicegame", &seed);

        let mut outbox = Outbox::new();
        SettlementEngine::new(&config, &HostCrypto)
            .reveal(&mut state, &FixedEnv { balance: 10_000_000 }, id, &seed, &mut outbox)
            .unwrap();
        assert!(transfers(&outbox).is_empty());
        assert_eq!(outbox.len(), 1);
    }

    #[test]
    fn payout_capped_by_bonus_while_still_locked() {
        let config = config();
        let mut state = ContractState::new();
        let seed = seed_for_roll(1, 1);
        let id = open_bet(&mut state, 2, 1000, "fairdicegame", &seed);

        // available = 51_000 - 1_000 locked -> bonus 500
        let mut outbox = Outbox::new();
        let result = SettlementEngine::new(&config, &HostCrypto)
            .reveal(&mut state, &FixedEnv { balance: 51_000 }, id, &seed, &mut outbox)
            .unwrap();
        assert_eq!(result.payout.amount, 500);
    }

    #[test]
    fn wrong_seed_leaves_bet_open() {
        let config = config();
        let mut state = ContractState::new();
        let id = open_bet(&mut state, 50, 1000, "bob", &seed_for_roll(20, 1));
        let before = state.clone();

        let mut outbox = Outbox::new();
        let err = SettlementEngine::new(&config, &HostCrypto)
            .reveal(
                &mut state,
                &FixedEnv { balance: 10_000_000 },
                id,
                &seed_for_roll(20, 2),
                &mut outbox,
            )
            .unwrap_err();
        assert_eq!(err, FairdiceError::InvalidSeed(id));
        assert_eq!(state, before);
        assert!(outbox.is_empty());
    }

    #[test]
    fn second_reveal_finds_nothing() {
        let config = config();
        let mut state = ContractState::new();
        let seed = seed_for_roll(20, 1);
        let id = open_bet(&mut state, 50, 1000, "bob", &seed);
        let engine = SettlementEngine::new(&config, &HostCrypto);
        let env = FixedEnv { balance: 10_000_000 };

        engine.reveal(&mut state, &env, id, &seed, &mut Outbox::new()).unwrap();
        assert_eq!(
            engine
                .reveal(&mut state, &env, id, &seed, &mut Outbox::new())
                .unwrap_err(),
            FairdiceError::BetNotFound(id)
        );
    }

    #[test]
    fn sub_divisor_stake_skips_zero_referral() {
        let mut config = config();
        config.min_deposit = 100;
        let mut state = ContractState::new();
        let seed = seed_for_roll(20, 1);
        let id = open_bet(&mut state, 50, 150, "bob", &seed);

        let mut outbox = Outbox::new();
        let result = SettlementEngine::new(&config, &HostCrypto)
            .reveal(&mut state, &FixedEnv { balance: 10_000_000 }, id, &seed, &mut outbox)
            .unwrap();

        assert_eq!(result.payout.amount, 300);
        assert_eq!(
            transfers(&outbox),
            vec![("alice".to_string(), 300, "bet id:1 player: alice winner!".to_string())]
        );
        assert!(
            outbox
                .pending()
                .iter()
                .filter_map(Effect::as_transfer)
                .all(|t| !t.quantity.is_zero())
        );
        assert!(state.bets.is_empty());
    }

    #[test]
    fn overdrawn_pool_refuses_winning_reveal() {
        let config = config();
        let mut state = ContractState::new();
        let seed = seed_for_roll(20, 1);
        let id = open_bet(&mut state, 50, 1000, "bob", &seed);
        let before = state.clone();

        let mut outbox = Outbox::new();
        let err = SettlementEngine::new(&config, &HostCrypto)
            .reveal(&mut state, &FixedEnv { balance: 500 }, id, &seed, &mut outbox)
            .unwrap_err();

        assert!(matches!(err, FairdiceError::FundPoolOverdraw { .. }));
        assert_eq!(state, before);
        assert!(state.bets.get(id).is_some());
        assert_eq!(state.fund_pool(&Symbol::eos()).locked().amount, 1000);
        assert!(outbox.is_empty());
    }
}
