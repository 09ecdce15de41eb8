//! Transactional outbox.
//!
//! Effects queued during an invocation are handed to the host only when the
//! invocation commits. A failed invocation drops its outbox unread.

use fairdice_types::{AccountName, Asset, Bet, BetResult, Effect, TokenTransfer};

/// Effects pending for the current invocation.
#[derive(Debug, Default)]
pub struct Outbox {
    pending: Vec<Effect>,
}

impl Outbox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: Effect) {
        tracing::debug!(effect = %effect, "Effect queued");
        self.pending.push(effect);
    }

    /// Queue an outbound token transfer.
    pub fn transfer(&mut self, from: &AccountName, to: &AccountName, quantity: Asset, memo: String) {
        self.push(Effect::Transfer(TokenTransfer {
            from: from.clone(),
            to: to.clone(),
            quantity,
            memo,
        }));
    }

    /// Queue the admission acknowledgement.
    pub fn receipt(&mut self, bet: Bet) {
        self.push(Effect::Receipt(bet));
    }

    /// Queue a settlement record for the audit log.
    pub fn audit_result(&mut self, log: &AccountName, result: BetResult) {
        self.push(Effect::AuditResult {
            log: log.clone(),
            result,
        });
    }

    #[must_use]
    pub fn pending(&self) -> &[Effect] {
        &self.pending
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Release the queued effects, in the order they were pushed.
    #[must_use]
    pub fn into_effects(self) -> Vec<Effect> {
        self.pending
    }
}
