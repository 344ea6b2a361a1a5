//! Immutable configuration handed to the engine and strategies at construction.

use num_bigint::BigUint;

use crate::field::DEFAULT_MODULUS;

/// Upper bound (inclusive) on individual secrets by default.
pub const DEFAULT_MAX_SECRET: u64 = 1000;

/// Field and secret-range parameters for one `ShamirEngine`.
///
/// The engine refuses any round where `participants * max_secret >= modulus`,
/// since the reconstructed sum would then be reduced modulo the prime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub modulus: BigUint,
    pub max_secret: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            modulus: BigUint::from(DEFAULT_MODULUS),
            max_secret: DEFAULT_MAX_SECRET,
        }
    }
}

impl EngineConfig {
    pub fn new(modulus: impl Into<BigUint>, max_secret: u64) -> Self {
        Self {
            modulus: modulus.into(),
            max_secret,
        }
    }
}

/// Privacy budget for the Laplace mechanism.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrivacyBudget {
    pub epsilon: f64,
}

impl Default for PrivacyBudget {
    fn default() -> Self {
        Self { epsilon: 1.0 }
    }
}

/// Key size for the per-call Paillier key pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaillierConfig {
    /// Bit length of the public modulus n = p·q
    pub key_bits: u64,
}

impl Default for PaillierConfig {
    fn default() -> Self {
        Self { key_bits: 512 }
    }
}
