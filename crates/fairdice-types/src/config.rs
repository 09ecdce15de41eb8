//! Game configuration.
//!
//! These values are fixed for a deployment; nothing changes them at runtime.

use serde::{Deserialize, Serialize};

use crate::{AccountName, Asset, FairdiceError, OraclePublicKey, Result, Symbol, constants};

/// Fixed parameters of one FairDice deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Account hosting the contract. Doubles as the house / default referrer.
    pub contract: AccountName,
    /// Token contract whose balance backs the fund pool.
    pub token_contract: AccountName,
    /// The only accepted currency.
    pub symbol: Symbol,
    /// Minimum wager in base units.
    pub min_deposit: i64,
    /// Key that signs every commitment memo.
    pub oracle_public_key: OraclePublicKey,
    /// The only account allowed to reveal seeds.
    pub revealer: AccountName,
    /// Write-only sink for settlement results.
    pub audit_log: AccountName,
}

impl GameConfig {
    /// Default EOS deployment with the given oracle key.
    #[must_use]
    pub fn eos(oracle_public_key: OraclePublicKey) -> Self {
        Self {
            contract: AccountName(constants::DEFAULT_CONTRACT_ACCOUNT.to_string()),
            token_contract: AccountName(constants::DEFAULT_TOKEN_CONTRACT.to_string()),
            symbol: Symbol::eos(),
            min_deposit: constants::MIN_DEPOSIT_AMOUNT,
            oracle_public_key,
            revealer: AccountName(constants::DEFAULT_REVEALER.to_string()),
            audit_log: AccountName(constants::DEFAULT_AUDIT_LOG.to_string()),
        }
    }

    /// Load and validate a JSON configuration.
    ///
    /// # Errors
    /// Returns [`FairdiceError::Configuration`] on parse or validation failure.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| FairdiceError::Configuration(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// The minimum deposit as an asset.
    #[must_use]
    pub fn min_deposit_asset(&self) -> Asset {
        Asset::new(self.min_deposit, self.symbol.clone())
    }

    /// Reject configurations that would make the game unsound.
    ///
    /// # Errors
    /// Returns [`FairdiceError::Configuration`] describing the first problem.
    pub fn validate(&self) -> Result<()> {
        if !self.symbol.is_valid() {
            return Err(FairdiceError::Configuration(format!(
                "invalid symbol {}",
                self.symbol
            )));
        }
        if self.min_deposit <= 0 || self.min_deposit > constants::MAX_ASSET_AMOUNT {
            return Err(FairdiceError::Configuration(format!(
                "min_deposit must be positive, got {}",
                self.min_deposit
            )));
        }
        if self.revealer == self.contract {
            return Err(FairdiceError::Configuration(
                "revealer must be distinct from the contract account".into(),
            ));
        }
        if self.audit_log == self.contract {
            return Err(FairdiceError::Configuration(
                "audit_log must be distinct from the contract account".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eos_preset_is_valid() {
        let cfg = GameConfig::eos(OraclePublicKey([1u8; 32]));
        cfg.validate().unwrap();
        assert_eq!(cfg.contract.as_str(), "fairdicegame");
        assert_eq!(cfg.min_deposit_asset().to_string(), "0.1000 EOS");
    }

    #[test]
    fn json_roundtrip_validates() {
        let cfg = GameConfig::eos(OraclePublicKey([9u8; 32]));
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains(&"09".repeat(32)), "key travels as hex: {json}");
        let back = GameConfig::from_json_str(&json).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn rejects_unsound_config() {
        let mut cfg = GameConfig::eos(OraclePublicKey([1u8; 32]));
        cfg.min_deposit = 0;
        assert!(matches!(
            cfg.validate().unwrap_err(),
            FairdiceError::Configuration(_)
        ));

        let mut cfg = GameConfig::eos(OraclePublicKey([1u8; 32]));
        cfg.revealer = cfg.contract.clone();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn malformed_json_is_configuration_error() {
        let err = GameConfig::from_json_str("{\"contract\": \"Bad Name\"}").unwrap_err();
        assert!(matches!(err, FairdiceError::Configuration(_)));
    }
}
