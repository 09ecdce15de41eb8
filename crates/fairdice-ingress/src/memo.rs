//! Commitment memo parser.
//!
//! Format, whitespace-insensitive:
//! ```text
//! <roll_under>-<seed_hash_hex>-<expiration>[-<referrer>]-<signature_hex>
//! ```
//!
//! The signature covers the stripped memo up to (not including) the last
//! separator, so the referrer segment is signed when present.

use std::str::FromStr;

use fairdice_types::{AccountName, Checksum256, FairdiceError, constants};
use thiserror::Error;

/// Why a memo could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoError {
    #[error("missing {0} segment")]
    MissingSegment(&'static str),

    #[error("{field} is not a number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("no signature")]
    MissingSignature,

    #[error("no seed")]
    MissingSeedHash,

    #[error("seed hash must be 64 hex characters: {0:?}")]
    InvalidSeedHash(String),

    #[error("invalid referrer: {0:?}")]
    InvalidReferrer(String),
}

impl From<MemoError> for FairdiceError {
    fn from(err: MemoError) -> Self {
        match err {
            MemoError::MissingSignature => Self::MissingSignature,
            MemoError::MissingSeedHash => Self::MissingSeedHash,
            MemoError::InvalidReferrer(name) => Self::InvalidAccountName(name),
            other => Self::MalformedMemo {
                reason: other.to_string(),
            },
        }
    }
}

/// A parsed offer memo. Range and authenticity checks are left to the
/// Offer Engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferMemo {
    pub roll_under: u64,
    pub seed_hash: Checksum256,
    pub expiration: u64,
    /// `None` when the segment is absent or empty.
    pub referrer: Option<AccountName>,
    /// Hex text as it appeared in the memo; decoded at verification time.
    pub signature: String,
    /// The exact bytes the oracle signed.
    pub signed_payload: String,
}

impl OfferMemo {
    /// Parse a raw transfer memo.
    ///
    /// # Errors
    /// Returns a [`MemoError`] naming the first offending segment.
    pub fn parse(memo: &str) -> Result<Self, MemoError> {
        let stripped: String = memo.chars().filter(|c| !c.is_whitespace()).collect();
        let sep = constants::MEMO_SEPARATOR;

        let (signed_payload, signature) = stripped
            .rsplit_once(sep)
            .ok_or(MemoError::MissingSegment("signature"))?;

        let mut fields = signed_payload.splitn(4, sep);
        let roll_under = fields.next().unwrap_or_default();
        let seed_hash = fields.next().ok_or(MemoError::MissingSegment("seed_hash"))?;
        let expiration = fields.next().ok_or(MemoError::MissingSegment("expiration"))?;
        let referrer = fields.next();

        if signature.is_empty() {
            return Err(MemoError::MissingSignature);
        }
        if seed_hash.is_empty() {
            return Err(MemoError::MissingSeedHash);
        }

        Ok(Self {
            roll_under: parse_number("roll_under", roll_under)?,
            seed_hash: Checksum256::from_hex(seed_hash)
                .map_err(|_| MemoError::InvalidSeedHash(seed_hash.to_string()))?,
            expiration: parse_number("expiration", expiration)?,
            referrer: parse_referrer(referrer)?,
            signature: signature.to_string(),
            signed_payload: signed_payload.to_string(),
        })
    }
}

impl FromStr for OfferMemo {
    type Err = MemoError;

    fn from_str(s: &str) -> Result<Self, MemoError> {
        Self::parse(s)
    }
}

fn parse_number(field: &'static str, value: &str) -> Result<u64, MemoError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MemoError::InvalidNumber {
            field,
            value: value.to_string(),
        });
    }
    value.parse().map_err(|_| MemoError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn parse_referrer(segment: Option<&str>) -> Result<Option<AccountName>, MemoError> {
    match segment {
        None | Some("") => Ok(None),
        Some(name) => AccountName::parse(name)
            .map(Some)
            .map_err(|_| MemoError::InvalidReferrer(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "ab12ab12ab12ab12ab12ab12ab12ab12ab12ab12ab12ab12ab12ab12ab12ab12";

    #[test]
    fn parses_without_referrer() {
        let memo = OfferMemo::parse(&format!("50-{HASH}-1700000000-beef")).unwrap();
        assert_eq!(memo.roll_under, 50);
        assert_eq!(memo.seed_hash.to_hex(), HASH);
        assert_eq!(memo.expiration, 1_700_000_000);
        assert_eq!(memo.referrer, None);
        assert_eq!(memo.signature, "beef");
        assert_eq!(memo.signed_payload, format!("50-{HASH}-1700000000"));
    }

    #[test]
    fn parses_with_referrer() {
        let memo = OfferMemo::parse(&format!("2-{HASH}-99-bob-beef")).unwrap();
        assert_eq!(memo.roll_under, 2);
        assert_eq!(memo.referrer.as_ref().map(AccountName::as_str), Some("bob"));
        assert_eq!(memo.signed_payload, format!("2-{HASH}-99-bob"));
    }

    #[test]
    fn strips_whitespace_everywhere() {
        let spaced = format!(" 50 -\t{HASH}\n- 1700000000 - bob -be ef ");
        let memo = OfferMemo::parse(&spaced).unwrap();
        assert_eq!(memo.signature, "beef");
        assert_eq!(memo.signed_payload, format!("50-{HASH}-1700000000-bob"));
    }

    #[test]
    fn empty_referrer_segment_means_none() {
        let memo = OfferMemo::parse(&format!("50-{HASH}-99--beef")).unwrap();
        assert_eq!(memo.referrer, None);
        assert_eq!(memo.signed_payload, format!("50-{HASH}-99-"));
    }

    #[test]
    fn parsing_is_idempotent() {
        let raw = format!("33-{HASH}-1234-carol-beef");
        let a = OfferMemo::parse(&raw).unwrap();
        let b: OfferMemo = raw.parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_segments() {
        assert_eq!(
            OfferMemo::parse("50").unwrap_err(),
            MemoError::MissingSegment("signature")
        );
        assert_eq!(
            OfferMemo::parse("50-beef").unwrap_err(),
            MemoError::MissingSegment("seed_hash")
        );
        assert_eq!(
            OfferMemo::parse(&format!("50-{HASH}-beef")).unwrap_err(),
            MemoError::MissingSegment("expiration")
        );
        assert_eq!(
            OfferMemo::parse(&format!("50-{HASH}-99-")).unwrap_err(),
            MemoError::MissingSignature
        );
        assert_eq!(
            OfferMemo::parse("50--99-beef").unwrap_err(),
            MemoError::MissingSeedHash
        );
    }

    #[test]
    fn malformed_fields() {
        assert!(matches!(
            OfferMemo::parse(&format!("fifty-{HASH}-99-beef")).unwrap_err(),
            MemoError::InvalidNumber { field: "roll_under", .. }
        ));
        assert!(matches!(
            OfferMemo::parse(&format!("50-{HASH}-+99-beef")).unwrap_err(),
            MemoError::InvalidNumber { field: "expiration", .. }
        ));
        assert!(matches!(
            OfferMemo::parse("50-abcd-99-beef").unwrap_err(),
            MemoError::InvalidSeedHash(_)
        ));
        assert!(matches!(
            OfferMemo::parse(&format!("50-{HASH}-99-Bob!-beef")).unwrap_err(),
            MemoError::InvalidReferrer(_)
        ));
    }

    #[test]
    fn maps_onto_game_errors() {
        assert_eq!(
            FairdiceError::from(MemoError::MissingSignature),
            FairdiceError::MissingSignature
        );
        assert_eq!(
            FairdiceError::from(MemoError::MissingSeedHash),
            FairdiceError::MissingSeedHash
        );
        assert!(matches!(
            FairdiceError::from(MemoError::MissingSegment("signature")),
            FairdiceError::MalformedMemo { .. }
        ));
    }
}
