//! Paillier additively homomorphic encryption, used as an averaging strategy:
//! encrypt every secret, multiply the ciphertexts, decrypt only the sum.

use libpaillier::unknown_order::BigNumber;
use libpaillier::{DecryptionKey, EncryptionKey};
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use rand::RngCore;
use tracing::debug;

use crate::config::PaillierConfig;
use crate::error::{Error, Result};
use crate::strategy::AveragingStrategy;

/// Smallest modulus we are willing to generate.
const MIN_KEY_BITS: u64 = 64;

fn to_biguint(n: &BigNumber) -> BigUint {
    BigUint::from_bytes_be(&n.to_bytes())
}

/// Averaging through a fresh Paillier key pair per call.
#[derive(Debug, Clone, Copy)]
pub struct Paillier {
    config: PaillierConfig,
}

impl Paillier {
    pub fn new(config: PaillierConfig) -> Result<Self> {
        if config.key_bits < MIN_KEY_BITS {
            return Err(Error::InvalidKeySize(config.key_bits));
        }
        Ok(Self { config })
    }

    /// Generate a key pair from two distinct primes of about `key_bits / 2` bits each.
    pub fn generate_keys(&self) -> Result<(EncryptionKey, DecryptionKey)> {
        let bits = self.config.key_bits as usize;
        let half = bits / 2;
        let (p, q) = loop {
            let p = BigNumber::prime(half);
            let q = BigNumber::prime(bits - half);
            if p != q {
                break (p, q);
            }
        };
        let dk = DecryptionKey::with_primes(&p, &q).ok_or(Error::PaillierFailure("key generation"))?;
        let ek = EncryptionKey::from(&dk);
        debug!(bits, "generated paillier key pair");
        Ok((ek, dk))
    }
}

impl AveragingStrategy for Paillier {
    fn name(&self) -> &'static str {
        "paillier"
    }

    /// Nonces come from the library's own randomness, so `rng` is unused.
    fn average(&self, secrets: &[u64], _rng: &mut dyn RngCore) -> Result<f64> {
        let largest = match secrets.iter().max() {
            Some(&s) => s,
            None => return Err(Error::EmptyPopulation),
        };
        let (ek, dk) = self.generate_keys()?;

        // The sum is decrypted mod n, so it must not be able to reach n.
        let modulus = to_biguint(ek.n());
        let bound = BigUint::from(secrets.len()) * BigUint::from(largest);
        if bound >= modulus {
            return Err(Error::PaillierPlaintextTooLarge {
                plaintext: bound,
                modulus,
            });
        }

        let mut acc = None;
        for &s in secrets {
            let (c, _) = ek
                .encrypt(s.to_be_bytes(), None)
                .ok_or(Error::PaillierFailure("encryption"))?;
            acc = Some(match acc {
                None => c,
                Some(sum) => ek.add(&sum, &c).ok_or(Error::PaillierFailure("addition"))?,
            });
        }
        let acc = acc.ok_or(Error::EmptyPopulation)?;
        let plain = dk
            .decrypt(&acc)
            .ok_or(Error::PaillierFailure("decryption"))?;
        let sum = BigUint::from_bytes_be(&plain);
        Ok(sum.to_f64().unwrap_or(f64::INFINITY) / secrets.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn strategy(key_bits: u64) -> Paillier {
        Paillier::new(PaillierConfig { key_bits }).unwrap()
    }

    #[test]
    fn small_keys_are_refused() {
        assert_eq!(
            Paillier::new(PaillierConfig { key_bits: 32 }).unwrap_err(),
            Error::InvalidKeySize(32)
        );
    }

    #[test]
    fn average_is_exact() {
        let mut rng = StdRng::seed_from_u64(9);
        let avg = strategy(128).average(&[10, 20, 30, 40], &mut rng).unwrap();
        assert_eq!(avg, 25.0);
    }

    #[test]
    fn single_zero_secret() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(strategy(128).average(&[0], &mut rng).unwrap(), 0.0);
    }

    #[test]
    fn empty_population_is_rejected() {
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(
            strategy(128).average(&[], &mut rng).unwrap_err(),
            Error::EmptyPopulation
        );
    }

    #[test]
    fn sum_that_could_wrap_is_rejected() {
        // 8 * 2^62 = 2^65 cannot fit below a 64-bit modulus
        let mut rng = StdRng::seed_from_u64(3);
        let secrets = [1u64 << 62; 8];
        assert!(matches!(
            strategy(64).average(&secrets, &mut rng),
            Err(Error::PaillierPlaintextTooLarge { .. })
        ));
    }

    #[test]
    fn generated_keys_have_expected_size() {
        let (ek, _) = strategy(128).generate_keys().unwrap();
        let bits = to_biguint(ek.n()).bits();
        assert!((126..=128).contains(&bits), "modulus has {} bits", bits);
    }
}
