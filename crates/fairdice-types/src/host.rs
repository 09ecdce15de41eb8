//! Host capabilities injected into the game.
//!
//! The ledger that runs FairDice supplies time, token balances, hashing and
//! signature checks. The game only sees these traits, so tests can swap in
//! deterministic stand-ins.

use ed25519_dalek::{Signature, VerifyingKey};
use sha2::{Digest, Sha256};

use crate::{AccountName, Asset, Checksum256, OraclePublicKey, Symbol};

/// Read-only view of the host ledger during one invocation.
pub trait HostEnv {
    /// Current block time, unix seconds.
    fn now(&self) -> u64;

    /// Token balance of `account` in `symbol`. Deposits being processed are
    /// already included.
    fn balance_of(&self, account: &AccountName, symbol: &Symbol) -> Asset;
}

/// Hashing and signature verification primitives.
pub trait CryptoProvider {
    /// SHA-256 of `bytes`.
    fn hash(&self, bytes: &[u8]) -> Checksum256;

    /// Does `signature` verify over `message` under `public_key`?
    fn verify_signature(
        &self,
        message: &[u8],
        signature: &[u8],
        public_key: &OraclePublicKey,
    ) -> bool;
}

/// Production crypto: SHA-256 and strict ed25519.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostCrypto;

impl CryptoProvider for HostCrypto {
    fn hash(&self, bytes: &[u8]) -> Checksum256 {
        Checksum256(Sha256::digest(bytes).into())
    }

    fn verify_signature(
        &self,
        message: &[u8],
        signature: &[u8],
        public_key: &OraclePublicKey,
    ) -> bool {
        let Ok(key) = VerifyingKey::from_bytes(public_key.as_bytes()) else {
            return false;
        };
        let Ok(signature) = Signature::from_slice(signature) else {
            return false;
        };
        key.verify_strict(message, &signature).is_ok()
    }
}

/// The commitment published for `seed`: the hash of its lowercase hex form.
pub fn seed_commitment<C: CryptoProvider + ?Sized>(crypto: &C, seed: &Checksum256) -> Checksum256 {
    crypto.hash(seed.to_hex().as_bytes())
}
