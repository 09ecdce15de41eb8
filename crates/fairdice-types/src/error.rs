//! Error types for the FairDice game.
//!
//! All errors use the `FD_ERR_` prefix convention for easy grepping in logs.
//! Every error aborts the invocation that raised it; nothing is retried.
//! Error codes are grouped by category:
//! - 1xx: Input malformation
//! - 2xx: Commitment violations
//! - 3xx: Temporal violations
//! - 4xx: Accounting violations
//! - 5xx: Lookup failures
//! - 6xx: Authorization failures
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::{AccountName, Asset, BetId, Checksum256};

/// Central error enum for all FairDice operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FairdiceError {
    // =================================================================
    // Input Malformation (1xx)
    // =================================================================
    /// The deposit uses a currency other than the accepted one.
    #[error("FD_ERR_100: quantity must be {expected} symbol, got {actual}")]
    WrongSymbol { expected: String, actual: String },

    /// The deposit amount or symbol is out of the representable range.
    #[error("FD_ERR_101: quantity invalid: {0}")]
    InvalidQuantity(String),

    /// The deposit is below the minimum wager.
    #[error("FD_ERR_102: deposit too small: minimum {minimum}, got {actual}")]
    DepositTooSmall { minimum: Asset, actual: Asset },

    /// The memo could not be parsed into a wager.
    #[error("FD_ERR_103: malformed memo: {reason}")]
    MalformedMemo { reason: String },

    /// The roll-under threshold is outside `[2, 96]`.
    #[error("FD_ERR_104: roll_under overflow, must be between 2 and 96, got {0}")]
    RollUnderOutOfRange(u64),

    /// The referrer named in the memo is the player.
    #[error("FD_ERR_105: referrer can not be self")]
    SelfReferral,

    /// An account name failed validation.
    #[error("FD_ERR_106: invalid account name: {0:?}")]
    InvalidAccountName(String),

    /// A currency symbol failed validation.
    #[error("FD_ERR_107: invalid symbol: {0}")]
    InvalidSymbol(String),

    // =================================================================
    // Commitment Violations (2xx)
    // =================================================================
    /// The memo carries no oracle signature.
    #[error("FD_ERR_200: no signature")]
    MissingSignature,

    /// The oracle signature does not verify over the memo.
    #[error("FD_ERR_201: signature verification failed")]
    InvalidSignature,

    /// The memo carries no seed hash.
    #[error("FD_ERR_202: no seed")]
    MissingSeedHash,

    /// The seed hash is already registered as an active commitment.
    #[error("FD_ERR_203: hash duplicate: {0}")]
    DuplicateSeedHash(Checksum256),

    /// The revealed seed does not hash to the committed value.
    #[error("FD_ERR_204: invalid seed for {0}")]
    InvalidSeed(BetId),

    // =================================================================
    // Temporal Violations (3xx)
    // =================================================================
    /// The commitment's expiration is not in the future.
    #[error("FD_ERR_300: seed hash expired: expiration {expiration}, now {now}")]
    SeedHashExpired { expiration: u64, now: u64 },

    // =================================================================
    // Accounting Violations (4xx)
    // =================================================================
    /// The best-case payout exceeds what the pool may pay a single wager.
    #[error(
        "FD_ERR_400: offered overflow, expected earning {max_payout} is greater than the maximum bonus {max_bonus}"
    )]
    PayoutExceedsBonus { max_payout: Asset, max_bonus: Asset },

    /// Unlocking would drive the locked total below zero.
    #[error("FD_ERR_401: fund unlock error: locked {locked}, unlocking {amount}")]
    FundUnlockUnderflow { locked: Asset, amount: Asset },

    /// The contract balance is lower than the locked total.
    #[error("FD_ERR_402: fund pool overdraw: balance {balance}, locked {locked}")]
    FundPoolOverdraw { balance: Asset, locked: Asset },

    /// An asset computation overflowed or mixed symbols.
    #[error("FD_ERR_403: arithmetic overflow: {reason}")]
    ArithmeticOverflow { reason: String },

    /// Locked funds no longer match the open wagers. Critical.
    #[error("FD_ERR_404: escrow invariant violation: {reason}")]
    EscrowInvariantViolation { reason: String },

    // =================================================================
    // Lookup Failures (5xx)
    // =================================================================
    /// No open bet with this identifier (never created or already settled).
    #[error("FD_ERR_500: bet not found: {0}")]
    BetNotFound(BetId),

    /// A bet with this identifier already exists.
    #[error("FD_ERR_501: bet already exists: {0}")]
    DuplicateBet(BetId),

    // =================================================================
    // Authorization Failures (6xx)
    // =================================================================
    /// The caller is not the account authorized for this action.
    #[error("FD_ERR_600: missing authority of {required}, called by {caller}")]
    Unauthorized {
        required: AccountName,
        caller: AccountName,
    },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("FD_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("FD_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, missing fields, etc.).
    #[error("FD_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

impl FairdiceError {
    /// The numeric code embedded in the message (e.g. `204` for `InvalidSeed`).
    #[must_use]
    pub fn code(&self) -> u16 {
        match self {
            Self::WrongSymbol { .. } => 100,
            Self::InvalidQuantity(_) => 101,
            Self::DepositTooSmall { .. } => 102,
            Self::MalformedMemo { .. } => 103,
            Self::RollUnderOutOfRange(_) => 104,
            Self::SelfReferral => 105,
            Self::InvalidAccountName(_) => 106,
            Self::InvalidSymbol(_) => 107,
            Self::MissingSignature => 200,
            Self::InvalidSignature => 201,
            Self::MissingSeedHash => 202,
            Self::DuplicateSeedHash(_) => 203,
            Self::InvalidSeed(_) => 204,
            Self::SeedHashExpired { .. } => 300,
            Self::PayoutExceedsBonus { .. } => 400,
            Self::FundUnlockUnderflow { .. } => 401,
            Self::FundPoolOverdraw { .. } => 402,
            Self::ArithmeticOverflow { .. } => 403,
            Self::EscrowInvariantViolation { .. } => 404,
            Self::BetNotFound(_) => 500,
            Self::DuplicateBet(_) => 501,
            Self::Unauthorized { .. } => 600,
            Self::Internal(_) => 900,
            Self::Serialization(_) => 901,
            Self::Configuration(_) => 902,
        }
    }

    /// Whether this is an authorization failure rather than a business rejection.
    #[must_use]
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, FairdiceError>;

impl From<serde_json::Error> for FairdiceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Symbol;

    #[test]
    fn error_display_contains_prefix() {
        let err = FairdiceError::BetNotFound(BetId(7));
        let msg = format!("{err}");
        assert!(msg.starts_with("FD_ERR_500"), "Got: {msg}");
        assert!(msg.contains("bet not found"));
    }

    #[test]
    fn code_matches_display_prefix() {
        let errors = vec![
            FairdiceError::SelfReferral,
            FairdiceError::MissingSignature,
            FairdiceError::InvalidSeed(BetId(1)),
            FairdiceError::SeedHashExpired {
                expiration: 1,
                now: 2,
            },
            FairdiceError::Internal("boom".into()),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with(&format!("FD_ERR_{}", err.code())),
                "code {} does not match message {msg}",
                err.code()
            );
        }
    }

    #[test]
    fn payout_overflow_display_mentions_both_amounts() {
        let eos = Symbol::eos();
        let err = FairdiceError::PayoutExceedsBonus {
            max_payout: Asset::new(98_000, eos.clone()),
            max_bonus: Asset::new(5_000, eos),
        };
        let msg = format!("{err}");
        assert!(msg.contains("FD_ERR_400"));
        assert!(msg.contains("9.8000 EOS"));
        assert!(msg.contains("0.5000 EOS"));
    }

    #[test]
    fn only_unauthorized_is_authorization() {
        let unauthorized = FairdiceError::Unauthorized {
            required: AccountName::parse("dicerevealer").unwrap(),
            caller: AccountName::parse("alice").unwrap(),
        };
        assert!(unauthorized.is_authorization());
        assert!(!FairdiceError::InvalidSignature.is_authorization());
    }
}
