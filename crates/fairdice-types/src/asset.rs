//! Currency amounts for the FairDice escrow model.
//!
//! An [`Asset`] is a signed integer count of base units tagged with a
//! [`Symbol`] (code + decimal precision). `10000` base units of
//! `4,EOS` render as `1.0000 EOS`.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{FairdiceError, Result, constants};

/// Currency symbol: ticker code plus decimal precision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    pub code: String,
    pub precision: u8,
}

impl Symbol {
    /// # Errors
    /// Returns [`FairdiceError::InvalidSymbol`] if the code is not 1–7
    /// uppercase ASCII letters or the precision exceeds 18.
    pub fn new(code: &str, precision: u8) -> Result<Self> {
        let symbol = Self {
            code: code.to_string(),
            precision,
        };
        if !symbol.is_valid() {
            return Err(FairdiceError::InvalidSymbol(symbol.to_string()));
        }
        Ok(symbol)
    }

    /// The accepted currency, `4,EOS`.
    #[must_use]
    pub fn eos() -> Self {
        Self {
            code: constants::SYMBOL_CODE.to_string(),
            precision: constants::SYMBOL_PRECISION,
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        (1..=7).contains(&self.code.len())
            && self.code.bytes().all(|b| b.is_ascii_uppercase())
            && self.precision <= 18
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision, self.code)
    }
}

/// An amount of a given currency, in base units.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Asset {
    pub amount: i64,
    pub symbol: Symbol,
}

impl Asset {
    #[must_use]
    pub fn new(amount: i64, symbol: Symbol) -> Self {
        Self { amount, symbol }
    }

    #[must_use]
    pub fn zero(symbol: Symbol) -> Self {
        Self { amount: 0, symbol }
    }

    /// Amount within `±(2^62 - 1)` and a well-formed symbol.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-constants::MAX_ASSET_AMOUNT..=constants::MAX_ASSET_AMOUNT).contains(&self.amount)
            && self.symbol.is_valid()
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// `self + other`; `None` on symbol mismatch or overflow.
    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        if self.symbol != other.symbol {
            return None;
        }
        let amount = self.amount.checked_add(other.amount)?;
        Some(Self::new(amount, self.symbol.clone())).filter(Self::is_valid)
    }

    /// `self - other`; `None` on symbol mismatch or overflow.
    #[must_use]
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        if self.symbol != other.symbol {
            return None;
        }
        let amount = self.amount.checked_sub(other.amount)?;
        Some(Self::new(amount, self.symbol.clone())).filter(Self::is_valid)
    }

    /// Integer division, truncating toward zero like ledger asset division.
    ///
    /// # Panics
    /// Panics if `divisor` is zero.
    #[must_use]
    pub fn div(&self, divisor: i64) -> Self {
        assert!(divisor != 0, "asset division by zero");
        Self::new(self.amount / divisor, self.symbol.clone())
    }

    /// The smaller of two same-symbol amounts.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        if other.amount < self.amount { other } else { self }
    }

    /// Human-scale value, e.g. `0.1000` for 1000 base units at precision 4.
    #[must_use]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.amount, u32::from(self.symbol.precision.min(18)))
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_decimal(), self.symbol.code)
    }
}

impl FromStr for Asset {
    type Err = FairdiceError;

    /// Parse `"<amount> <CODE>"`; precision is taken from the decimal places.
    fn from_str(s: &str) -> Result<Self> {
        let (value, code) = s
            .trim()
            .split_once(' ')
            .ok_or_else(|| FairdiceError::InvalidQuantity(format!("{s:?}: expected \"<amount> <CODE>\"")))?;
        let value = Decimal::from_str(value)
            .map_err(|e| FairdiceError::InvalidQuantity(format!("{s:?}: {e}")))?;
        let precision = u8::try_from(value.scale())
            .map_err(|_| FairdiceError::InvalidQuantity(format!("{s:?}: precision too large")))?;
        let amount = i64::try_from(value.mantissa())
            .map_err(|_| FairdiceError::InvalidQuantity(format!("{s:?}: amount out of range")))?;
        let asset = Self::new(amount, Symbol::new(code.trim(), precision)?);
        if !asset.is_valid() {
            return Err(FairdiceError::InvalidQuantity(format!("{s:?}: amount out of range")));
        }
        Ok(asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eos(amount: i64) -> Asset {
        Asset::new(amount, Symbol::eos())
    }

    #[test]
    fn display_uses_precision() {
        assert_eq!(eos(1000).to_string(), "0.1000 EOS");
        assert_eq!(eos(123_456).to_string(), "12.3456 EOS");
        assert_eq!(eos(0).to_string(), "0.0000 EOS");
    }

    #[test]
    fn parse_matches_display() {
        let asset: Asset = "12.3456 EOS".parse().unwrap();
        assert_eq!(asset, eos(123_456));
        assert!("12.3456".parse::<Asset>().is_err());
        assert!("1.0 eos".parse::<Asset>().is_err());
    }

    #[test]
    fn checked_arithmetic() {
        assert_eq!(eos(100).checked_add(&eos(50)), Some(eos(150)));
        assert_eq!(eos(100).checked_sub(&eos(150)), Some(eos(-50)));
        assert_eq!(
            eos(constants::MAX_ASSET_AMOUNT).checked_add(&eos(1)),
            None,
            "exceeding 2^62 - 1 must fail"
        );
        let other = Asset::new(1, Symbol::new("SYS", 4).unwrap());
        assert_eq!(eos(1).checked_add(&other), None, "symbol mismatch");
    }

    #[test]
    fn division_truncates() {
        assert_eq!(eos(1000).div(200), eos(5));
        assert_eq!(eos(1999).div(200), eos(9));
    }

    #[test]
    fn validity() {
        assert!(eos(0).is_valid());
        assert!(!eos(i64::MAX).is_valid());
        assert!(!Asset::new(1, Symbol { code: "eos".into(), precision: 4 }).is_valid());
        assert!(Symbol::new("TOOLONGSYM", 4).is_err());
    }

    #[test]
    fn min_picks_smaller() {
        assert_eq!(eos(98).min(eos(120)), eos(98));
        assert_eq!(eos(130).min(eos(120)), eos(120));
    }
}
