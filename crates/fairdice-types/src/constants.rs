//! Game-wide constants for FairDice.

/// Symbol code of the only accepted currency.
pub const SYMBOL_CODE: &str = "EOS";

/// Decimal precision of the accepted currency.
pub const SYMBOL_PRECISION: u8 = 4;

/// Minimum deposit in base units (0.1000 EOS).
pub const MIN_DEPOSIT_AMOUNT: i64 = 1000;

/// Largest representable asset amount, `2^62 - 1`.
pub const MAX_ASSET_AMOUNT: i64 = (1 << 62) - 1;

/// Lowest accepted roll-under threshold.
pub const ROLL_UNDER_MIN: u8 = 2;

/// Highest accepted roll-under threshold.
pub const ROLL_UNDER_MAX: u8 = 96;

/// Number of faces on the die. Rolls land in `1..=ROLL_FACES`.
pub const ROLL_FACES: u64 = 100;

/// Payout odds numerator: `amount * 98 / (roll_under - 1)` keeps a 2% edge.
pub const PAYOUT_ODDS_NUMERATOR: u128 = 98;

/// A single wager may claim at most `available / BONUS_DIVISOR` (1%).
pub const BONUS_DIVISOR: i64 = 100;

/// Referrers receive `amount / REFERRAL_DIVISOR` (0.5%).
pub const REFERRAL_DIVISOR: i64 = 200;

/// Separator between memo segments.
pub const MEMO_SEPARATOR: char = '-';

/// Maximum length of an account name.
pub const MAX_ACCOUNT_NAME_LEN: usize = 12;

/// Default account hosting the game contract (also the house).
pub const DEFAULT_CONTRACT_ACCOUNT: &str = "fairdicegame";

/// Default token contract issuing the accepted currency.
pub const DEFAULT_TOKEN_CONTRACT: &str = "eosio.token";

/// Default privileged account allowed to reveal seeds.
pub const DEFAULT_REVEALER: &str = "dicerevealer";

/// Default audit-log sink receiving settlement results.
pub const DEFAULT_AUDIT_LOG: &str = "fairdicelogs";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
