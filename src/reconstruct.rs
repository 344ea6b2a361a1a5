use num_bigint::BigUint;
use rand::seq::index;
use rand::RngCore;
use tracing::debug;

use crate::error::{Error, Result};
use crate::field::PrimeField;
use crate::lagrange::{ensure_distinct, interpolate_at_zero};
use crate::shares::CombinedShare;

/// A validated set of combined shares: at least `required` of them, all with
/// distinct participant indices.
#[derive(Debug, Clone)]
pub struct Quorum {
    shares: Vec<CombinedShare>,
}

impl Quorum {
    /// Validate an explicit set of combined shares against the required size.
    pub fn new(shares: Vec<CombinedShare>, required: usize) -> Result<Self> {
        if shares.len() < required {
            return Err(Error::InsufficientQuorum {
                provided: shares.len(),
                required,
            });
        }
        ensure_distinct(shares.iter().map(|s| s.index))?;
        Ok(Quorum { shares })
    }

    /// Draw `size` of the combined shares uniformly at random, without replacement.
    pub fn select<R: RngCore + ?Sized>(
        combined: &[CombinedShare],
        size: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if size > combined.len() {
            return Err(Error::InvalidThreshold {
                quorum: size,
                participants: combined.len(),
            });
        }
        let chosen: Vec<CombinedShare> = index::sample(rng, combined.len(), size)
            .into_iter()
            .map(|i| combined[i].clone())
            .collect();
        debug!(
            indices = ?chosen.iter().map(|s| s.index).collect::<Vec<_>>(),
            "selected quorum"
        );
        Self::new(chosen, size)
    }

    pub fn shares(&self) -> &[CombinedShare] {
        &self.shares
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}

/// Recover the sum of all shared secrets from a quorum of combined shares.
///
/// The result is exact as long as the true sum is below the field modulus.
pub fn reconstruct(field: &PrimeField, quorum: &Quorum) -> Result<BigUint> {
    if quorum.is_empty() {
        return Err(Error::InsufficientQuorum {
            provided: 0,
            required: 1,
        });
    }
    let sum = interpolate_at_zero(field, quorum.shares())?;
    debug!(quorum = quorum.len(), "reconstructed aggregate");
    Ok(sum.into_value())
}
