//! The FairDice contract.
//!
//! Every entry point follows the same transaction shape:
//! 1. Check authorization against the caller
//! 2. Clone the state into a scratch copy and open a fresh [`Outbox`]
//! 3. Run the engine against the scratch copy
//! 4. Verify the escrow audit
//! 5. Swap the scratch copy in and hand the effects to the host
//!
//! Any error before step 5 drops the scratch copy and the outbox, so a
//! rejected invocation has no observable effect.

use fairdice_ingress::OfferEngine;
use fairdice_ledger::{ContractState, FundPool, Outbox};
use fairdice_settlement::SettlementEngine;
use fairdice_types::{
    AccountName, Asset, Bet, BetId, Checksum256, CryptoProvider, Effect, FairdiceError,
    GameConfig, HostCrypto, HostEnv, Result, TokenTransfer, constants,
};

/// A deployed game: fixed configuration, crypto capability, and state.
pub struct FairDice<C: CryptoProvider = HostCrypto> {
    config: GameConfig,
    crypto: C,
    state: ContractState,
}

impl FairDice<HostCrypto> {
    /// Fresh deployment using the host's SHA-256 and ed25519.
    ///
    /// # Errors
    /// Returns `Configuration` if `config` fails validation.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_crypto(config, HostCrypto)
    }
}

impl<C: CryptoProvider> FairDice<C> {
    /// Fresh deployment with an explicit crypto provider.
    ///
    /// # Errors
    /// Returns `Configuration` if `config` fails validation.
    pub fn with_crypto(config: GameConfig, crypto: C) -> Result<Self> {
        Self::from_state(config, crypto, ContractState::new())
    }

    /// Resume from persisted state.
    ///
    /// # Errors
    /// Returns `Configuration` for an invalid config and
    /// `EscrowInvariantViolation` if `state` does not balance.
    pub fn from_state(config: GameConfig, crypto: C, state: ContractState) -> Result<Self> {
        config.validate()?;
        state.verify_escrow(&config.symbol)?;
        tracing::info!(
            version = constants::VERSION,
            contract = %config.contract,
            open_bets = state.bets.len(),
            commitments = state.commitments.len(),
            "FairDice loaded"
        );
        Ok(Self {
            config,
            crypto,
            state,
        })
    }

    /// Token transfer notification issued by the token contract `code`.
    /// Deposits become bets. Transfers of tokens issued by any contract other
    /// than the configured token contract are ignored, as is every transfer
    /// that is not a deposit into the game.
    ///
    /// # Errors
    /// Any admission failure. Nothing is committed on error.
    pub fn on_transfer<E: HostEnv + ?Sized>(
        &mut self,
        env: &E,
        code: &AccountName,
        transfer: &TokenTransfer,
    ) -> Result<Vec<Effect>> {
        if *code != self.config.token_contract {
            tracing::debug!(
                code = %code,
                expected = %self.config.token_contract,
                from = %transfer.from,
                "Transfer from foreign token contract ignored"
            );
            return Ok(Vec::new());
        }

        let mut scratch = self.state.clone();
        let mut outbox = Outbox::new();
        let admitted = OfferEngine::new(&self.config, &self.crypto)
            .offer(&mut scratch, env, transfer, &mut outbox)
            .map_err(|err| rejected("transfer", err))?;
        match admitted {
            Some(_) => self.commit(scratch, outbox),
            None => Ok(Vec::new()),
        }
    }

    /// Oracle reveal: settles bet `id` with `seed`.
    ///
    /// # Errors
    /// `Unauthorized` unless `caller` is the configured revealer, then any
    /// settlement failure. Nothing is committed on error.
    pub fn reveal<E: HostEnv + ?Sized>(
        &mut self,
        env: &E,
        caller: &AccountName,
        id: BetId,
        seed: Checksum256,
    ) -> Result<Vec<Effect>> {
        require_auth(caller, &self.config.revealer).map_err(|err| rejected("reveal", err))?;

        let mut scratch = self.state.clone();
        let mut outbox = Outbox::new();
        SettlementEngine::new(&self.config, &self.crypto)
            .reveal(&mut scratch, env, id, &seed, &mut outbox)
            .map_err(|err| rejected("reveal", err))?;
        self.commit(scratch, outbox)
    }

    /// Admission acknowledgement. Carries the bet into the action history and
    /// changes no state; only the contract itself may send it.
    ///
    /// # Errors
    /// `Unauthorized` for any other caller.
    pub fn receipt(&self, caller: &AccountName, bet: &Bet) -> Result<()> {
        require_auth(caller, &self.config.contract).map_err(|err| rejected("receipt", err))?;
        tracing::debug!(bet_id = %bet.id, player = %bet.player, "Receipt acknowledged");
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn bet(&self, id: BetId) -> Option<&Bet> {
        self.state.bets.get(id)
    }

    /// Open bets in id order.
    pub fn open_bets(&self) -> impl Iterator<Item = &Bet> {
        self.state.bets.iter()
    }

    #[must_use]
    pub fn fund_pool(&self) -> FundPool {
        self.state.fund_pool(&self.config.symbol)
    }

    /// Contract balance not reserved by open bets.
    ///
    /// # Errors
    /// Returns `FundPoolOverdraw` if the balance is below the locked total.
    pub fn available_balance<E: HostEnv + ?Sized>(&self, env: &E) -> Result<Asset> {
        let balance = env.balance_of(&self.config.contract, &self.config.symbol);
        self.state.available_balance(&balance)
    }

    #[must_use]
    pub fn state(&self) -> &ContractState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> ContractState {
        self.state
    }

    fn commit(&mut self, scratch: ContractState, outbox: Outbox) -> Result<Vec<Effect>> {
        if let Err(err) = scratch.verify_escrow(&self.config.symbol) {
            tracing::error!(error = %err, "Escrow audit failed; invocation discarded");
            return Err(err);
        }
        self.state = scratch;
        Ok(outbox.into_effects())
    }
}

fn require_auth(caller: &AccountName, required: &AccountName) -> Result<()> {
    if caller != required {
        return Err(FairdiceError::Unauthorized {
            required: required.clone(),
            caller: caller.clone(),
        });
    }
    Ok(())
}

fn rejected(action: &'static str, err: FairdiceError) -> FairdiceError {
    tracing::warn!(action, code = err.code(), error = %err, "Invocation rejected");
    err
}
