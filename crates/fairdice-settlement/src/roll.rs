//! Outcome derivation and seed verification.

use fairdice_types::{
    Bet, Checksum256, CryptoProvider, FairdiceError, Result, constants, seed_commitment,
};

/// The first eight seed bytes as a big-endian integer.
#[must_use]
pub fn uint64_hash(seed: &Checksum256) -> u64 {
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&seed.as_bytes()[..8]);
    u64::from_be_bytes(prefix)
}

/// The roll a seed produces, in `1..=100`.
#[must_use]
pub fn compute_roll(seed: &Checksum256) -> u8 {
    let face = uint64_hash(seed) % constants::ROLL_FACES;
    // face < 100, so the cast is lossless
    u8::try_from(face + 1).unwrap_or(u8::MAX)
}

/// Check that `seed` opens the commitment stored on `bet`.
///
/// # Errors
/// Returns [`FairdiceError::InvalidSeed`] on mismatch.
pub fn verify_seed<C: CryptoProvider + ?Sized>(
    crypto: &C,
    bet: &Bet,
    seed: &Checksum256,
) -> Result<()> {
    if seed_commitment(crypto, seed) != bet.seed_hash {
        return Err(FairdiceError::InvalidSeed(bet.id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use fairdice_types::{
        AccountName, Asset, BetId, HostCrypto, RollUnder, Symbol,
        testing::{random_seed, seed_for_roll},
    };

    use super::*;

    #[test]
    fn reads_prefix_big_endian() {
        let mut bytes = [0xffu8; 32];
        bytes[..8].copy_from_slice(&[0, 0, 0, 0, 0, 0, 1, 2]);
        assert_eq!(uint64_hash(&Checksum256(bytes)), 0x0102);
    }

    #[test]
    fn roll_bounds() {
        assert_eq!(compute_roll(&Checksum256::ZERO), 1);
        assert_eq!(compute_roll(&seed_for_roll(100, 3)), 100);
        assert_eq!(compute_roll(&Checksum256([0xff; 32])), 16); // (2^64 - 1) % 100 = 15
        for _ in 0..256 {
            let roll = compute_roll(&random_seed());
            assert!((1..=100).contains(&roll));
        }
    }

    #[test]
    fn seed_must_open_commitment() {
        let seed = seed_for_roll(20, 4);
        let bet = Bet {
            id: BetId(9),
            player: AccountName::parse("alice").unwrap(),
            referrer: AccountName::parse("fairdicegame").unwrap(),
            amount: Asset::new(1000, Symbol::eos()),
            roll_under: RollUnder::new(50).unwrap(),
            seed_hash: seed_commitment(&HostCrypto, &seed),
            created_at: 0,
        };
        verify_seed(&HostCrypto, &bet, &seed).unwrap();
        assert_eq!(
            verify_seed(&HostCrypto, &bet, &seed_for_roll(20, 5)).unwrap_err(),
            FairdiceError::InvalidSeed(BetId(9))
        );
    }
}
