//! Identifiers used throughout FairDice.
//!
//! Accounts follow ledger naming rules (up to 12 characters from
//! `a-z`, `1-5` and `.`). Hashes and keys are fixed-size byte arrays that
//! travel as lowercase hex.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{FairdiceError, Result, constants};

// ---------------------------------------------------------------------------
// AccountName
// ---------------------------------------------------------------------------

/// A ledger account name, e.g. `alice` or `eosio.token`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountName(pub(crate) String);

impl AccountName {
    /// Validate and wrap an account name.
    ///
    /// # Errors
    /// Returns [`FairdiceError::InvalidAccountName`] if the name is empty,
    /// longer than 12 characters, or uses characters outside `a-z1-5.`.
    pub fn parse(name: &str) -> Result<Self> {
        let valid_chars = name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || (b'1'..=b'5').contains(&b) || b == b'.');
        if name.is_empty()
            || name.len() > constants::MAX_ACCOUNT_NAME_LEN
            || !valid_chars
            || name.ends_with('.')
        {
            return Err(FairdiceError::InvalidAccountName(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AccountName {
    type Err = FairdiceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AccountName {
    type Error = FairdiceError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<AccountName> for String {
    fn from(name: AccountName) -> Self {
        name.0
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// BetId
// ---------------------------------------------------------------------------

/// Ordinal identifier of an admitted wager. Assigned once, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct BetId(pub u64);

impl BetId {
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for BetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Checksum256
// ---------------------------------------------------------------------------

/// A 256-bit value: a SHA-256 digest or a revealed seed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Checksum256(pub [u8; 32]);

impl Checksum256 {
    pub const ZERO: Self = Self([0u8; 32]);

    /// Parse exactly 64 hex characters.
    ///
    /// # Errors
    /// Returns [`FairdiceError::Serialization`] on bad length or non-hex input.
    pub fn from_hex(s: &str) -> Result<Self> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| FairdiceError::Serialization(format!("checksum256 {s:?}: {e}")))?;
        Ok(Self(bytes))
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// First four bytes in hex, for log lines.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Debug for Checksum256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Checksum256({})", self.to_hex())
    }
}

impl fmt::Display for Checksum256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Checksum256 {
    type Err = FairdiceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Checksum256 {
    type Error = FairdiceError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<Checksum256> for String {
    fn from(sum: Checksum256) -> Self {
        sum.to_hex()
    }
}

// ---------------------------------------------------------------------------
// OraclePublicKey
// ---------------------------------------------------------------------------

/// The trusted oracle's ed25519 public key (32 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OraclePublicKey(pub [u8; 32]);

impl OraclePublicKey {
    /// # Errors
    /// Returns [`FairdiceError::Configuration`] on bad length or non-hex input.
    pub fn from_hex(s: &str) -> Result<Self> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| FairdiceError::Configuration(format!("oracle public key: {e}")))?;
        Ok(Self(bytes))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for OraclePublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "oracle:{}", hex::encode(&self.0[..8]))
    }
}

impl TryFrom<String> for OraclePublicKey {
    type Error = FairdiceError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<OraclePublicKey> for String {
    fn from(key: OraclePublicKey) -> Self {
        hex::encode(key.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
