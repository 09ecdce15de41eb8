//! Outbound effects produced by an invocation.
//!
//! Entry points never touch the token ledger or the audit sink directly.
//! They push [`Effect`]s into an outbox; the host executes them if and only
//! if the whole invocation succeeded.

use serde::{Deserialize, Serialize};

use crate::{AccountName, Asset, Bet, BetResult};

/// A token transfer, inbound (deposit notification) or outbound (payout).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTransfer {
    pub from: AccountName,
    pub to: AccountName,
    pub quantity: Asset,
    pub memo: String,
}

/// One deferred side effect of a successful invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Pay out from the contract's balance.
    Transfer(TokenTransfer),
    /// Acknowledge an admitted bet (the full bet as persisted).
    Receipt(Bet),
    /// Append a settlement result to the audit log account.
    AuditResult { log: AccountName, result: BetResult },
}

impl Effect {
    #[must_use]
    pub fn as_transfer(&self) -> Option<&TokenTransfer> {
        match self {
            Self::Transfer(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_result(&self) -> Option<&BetResult> {
        match self {
            Self::AuditResult { result, .. } => Some(result),
            _ => None,
        }
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transfer(t) => write!(f, "TRANSFER {} -> {} {}", t.from, t.to, t.quantity),
            Self::Receipt(bet) => write!(f, "RECEIPT bet {}", bet.id),
            Self::AuditResult { log, result } => {
                write!(f, "RESULT bet {} -> {log}", result.bet_id)
            }
        }
    }
}
