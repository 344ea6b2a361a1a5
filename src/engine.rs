//! The aggregation driver: Distribute → Combine → Select Quorum → Reconstruct → Divide.

use std::fmt;

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use rand::RngCore;
use tracing::{debug, instrument};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::field::PrimeField;
use crate::reconstruct::{reconstruct, Quorum};
use crate::shares::{combine_all, distribute};

/// Exact average as `sum / count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Average {
    pub sum: BigUint,
    pub count: usize,
}

impl Average {
    pub fn to_f64(&self) -> f64 {
        // BigUint -> f64 never fails; it saturates to infinity for huge values
        self.sum.to_f64().unwrap_or(f64::INFINITY) / self.count as f64
    }
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.sum, self.count)
    }
}

/// Threshold secret-sharing aggregation over one prime field.
#[derive(Debug, Clone)]
pub struct ShamirEngine {
    field: PrimeField,
    max_secret: u64,
}

impl ShamirEngine {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        Ok(Self {
            field: PrimeField::new(config.modulus.clone())?,
            max_secret: config.max_secret,
        })
    }

    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    pub fn max_secret(&self) -> u64 {
        self.max_secret
    }

    /// Number of absent participants tolerated, k = floor(n / 2).
    /// Reconstruction needs k + 1 combined shares.
    pub fn threshold(participants: usize) -> usize {
        participants / 2
    }

    /// Fail with `PrecisionViolation` unless `participants * max_secret < p`.
    pub fn check_precision(&self, participants: usize) -> Result<()> {
        let bound = BigUint::from(participants) * BigUint::from(self.max_secret);
        if &bound >= self.field.modulus() {
            return Err(Error::PrecisionViolation {
                participants,
                max_secret: self.max_secret,
                modulus: self.field.modulus().clone(),
            });
        }
        Ok(())
    }

    /// Run one full round and return the exact sum of `secrets`.
    ///
    /// Each secret belongs to one participant, so the population is `secrets.len()`.
    pub fn aggregate_sum<R: RngCore + ?Sized>(&self, secrets: &[u64], rng: &mut R) -> Result<BigUint> {
        let participants = secrets.len();
        if participants == 0 {
            return Err(Error::EmptyPopulation);
        }
        self.check_precision(participants)?;
        if let Some(&secret) = secrets.iter().find(|&&s| s > self.max_secret) {
            return Err(Error::SecretOutOfRange {
                secret,
                max_secret: self.max_secret,
            });
        }

        let k = Self::threshold(participants);
        let quorum_size = k + 1;
        if quorum_size > participants {
            return Err(Error::InvalidThreshold {
                quorum: quorum_size,
                participants,
            });
        }

        let secrets: Vec<_> = secrets.iter().map(|&s| self.field.element(s)).collect();
        let shares = distribute(&self.field, participants, k, &secrets, rng)?;
        let combined = combine_all(&self.field, &shares, secrets.len())?;
        let quorum = Quorum::select(&combined, quorum_size, rng)?;
        let sum = reconstruct(&self.field, &quorum)?;
        debug!(participants, k, %sum, "round complete");
        Ok(sum)
    }

    /// Average of `secrets` computed without any single party seeing them.
    ///
    /// The answer does not depend on which quorum is drawn: every valid
    /// quorum reconstructs the same exact sum.
    #[instrument(skip(self, secrets, rng), fields(modulus = %self.field.modulus()))]
    pub fn compute_shared_average<R: RngCore + ?Sized>(
        &self,
        participants: usize,
        secrets: &[u64],
        rng: &mut R,
    ) -> Result<Average> {
        if participants == 0 {
            return Err(Error::EmptyPopulation);
        }
        if secrets.len() != participants {
            return Err(Error::SecretCountMismatch {
                expected: participants,
                found: secrets.len(),
            });
        }
        let sum = self.aggregate_sum(secrets, rng)?;
        Ok(Average {
            sum,
            count: participants,
        })
    }
}
