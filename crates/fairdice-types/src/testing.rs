//! Test doubles for the oracle and the crypto host. **Never use in production.**

use ed25519_dalek::{Signer, SigningKey};

use crate::{
    Checksum256, CryptoProvider, HostCrypto, OraclePublicKey, constants, seed_commitment,
};

/// An oracle holding the signing key that commitment memos are signed with.
pub struct TestOracle {
    key: SigningKey,
}

impl TestOracle {
    /// Fresh random key.
    #[must_use]
    pub fn random() -> Self {
        Self {
            key: SigningKey::generate(&mut rand::rngs::OsRng),
        }
    }

    /// Deterministic key from a 32-byte secret.
    #[must_use]
    pub fn from_secret(secret: [u8; 32]) -> Self {
        Self {
            key: SigningKey::from_bytes(&secret),
        }
    }

    #[must_use]
    pub fn public_key(&self) -> OraclePublicKey {
        OraclePublicKey(self.key.verifying_key().to_bytes())
    }

    /// Hex-encoded signature over `message`.
    #[must_use]
    pub fn sign(&self, message: &str) -> String {
        hex::encode(self.key.sign(message.as_bytes()).to_bytes())
    }

    /// The commitment a player would embed for `seed`.
    #[must_use]
    pub fn commitment(&self, seed: &Checksum256) -> Checksum256 {
        seed_commitment(&HostCrypto, seed)
    }

    /// Signed offer memo: `roll_under-seed_hash-expiration[-referrer]-signature`.
    #[must_use]
    pub fn memo(
        &self,
        roll_under: u64,
        seed_hash: &Checksum256,
        expiration: u64,
        referrer: Option<&str>,
    ) -> String {
        let sep = constants::MEMO_SEPARATOR;
        let mut signed = format!("{roll_under}{sep}{seed_hash}{sep}{expiration}");
        if let Some(referrer) = referrer {
            signed.push(sep);
            signed.push_str(referrer);
        }
        let signature = self.sign(&signed);
        format!("{signed}{sep}{signature}")
    }
}

/// A seed whose derived roll is `roll` (1..=100). `salt` varies the remaining
/// bytes so several seeds with the same roll have distinct commitments.
#[must_use]
pub fn seed_for_roll(roll: u8, salt: u8) -> Checksum256 {
    assert!((1..=100).contains(&roll), "roll must be in 1..=100");
    let mut bytes = [salt; 32];
    bytes[..8].copy_from_slice(&u64::from(roll - 1).to_be_bytes());
    Checksum256(bytes)
}

/// Uniformly random seed.
#[must_use]
pub fn random_seed() -> Checksum256 {
    Checksum256(rand::random::<[u8; 32]>())
}

/// Crypto stand-in: real SHA-256, signature checks answer a fixed verdict.
#[derive(Debug, Clone, Copy)]
pub struct StubCrypto {
    pub accept_signatures: bool,
}

impl StubCrypto {
    #[must_use]
    pub fn accepting() -> Self {
        Self {
            accept_signatures: true,
        }
    }

    #[must_use]
    pub fn rejecting() -> Self {
        Self {
            accept_signatures: false,
        }
    }
}

impl CryptoProvider for StubCrypto {
    fn hash(&self, bytes: &[u8]) -> Checksum256 {
        HostCrypto.hash(bytes)
    }

    fn verify_signature(&self, _: &[u8], _: &[u8], _: &OraclePublicKey) -> bool {
        self.accept_signatures
    }
}
