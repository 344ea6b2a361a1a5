//! Error type shared by every stage of the aggregation pipeline.

use num_bigint::BigUint;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A quorum larger than the population was requested.
    #[error("quorum of {quorum} exceeds population of {participants} participants")]
    InvalidThreshold { quorum: usize, participants: usize },

    /// Two quorum members share an evaluation point.
    #[error("participant index {0} appears more than once in the quorum")]
    DuplicateQuorumIndex(u64),

    /// `participants * max_secret` reaches the modulus, so the sum could wrap.
    #[error(
        "{participants} secrets bounded by {max_secret} may wrap around the field modulus {modulus}"
    )]
    PrecisionViolation {
        participants: usize,
        max_secret: u64,
        modulus: BigUint,
    },

    #[error("quorum of {provided} shares is below the required {required}")]
    InsufficientQuorum { provided: usize, required: usize },

    #[error("at least one participant is required")]
    EmptyPopulation,

    #[error("expected {expected} secrets, found {found}")]
    SecretCountMismatch { expected: usize, found: usize },

    #[error("secret {secret} exceeds the configured bound {max_secret}")]
    SecretOutOfRange { secret: u64, max_secret: u64 },

    /// Index 0 (or any multiple of the modulus) would expose `f(0)` directly.
    #[error("participant index {index} is not a usable evaluation point modulo {modulus}")]
    InvalidParticipantIndex { index: u64, modulus: BigUint },

    #[error("field modulus {0} is not prime")]
    InvalidModulus(BigUint),

    #[error("{0} has no multiplicative inverse")]
    NotInvertible(BigUint),

    #[error("participant {index} holds {found} shares, expected {expected}")]
    MalformedShares {
        index: u64,
        expected: usize,
        found: usize,
    },

    #[error("privacy budget epsilon must be positive and finite, got {0}")]
    InvalidPrivacyBudget(f64),

    #[error("plaintext bound {plaintext} does not fit the paillier modulus {modulus}")]
    PaillierPlaintextTooLarge { plaintext: BigUint, modulus: BigUint },

    #[error("paillier {0} failed")]
    PaillierFailure(&'static str),

    #[error("paillier modulus of {0} bits is too small")]
    InvalidKeySize(u64),
}
