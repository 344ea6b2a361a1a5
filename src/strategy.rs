//! Averaging strategies compared by the harness.

use rand::RngCore;

use crate::engine::ShamirEngine;
use crate::error::{Error, Result};

/// One way of computing the mean of a set of private integers.
pub trait AveragingStrategy {
    /// Short label used in logs and reports.
    fn name(&self) -> &'static str;

    /// Compute the average of `secrets`, one secret per participant.
    fn average(&self, secrets: &[u64], rng: &mut dyn RngCore) -> Result<f64>;
}

/// Sum divided by count, with no privacy at all. Also the harness baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plaintext;

pub fn plaintext_average(secrets: &[u64]) -> Result<f64> {
    if secrets.is_empty() {
        return Err(Error::EmptyPopulation);
    }
    let sum: u128 = secrets.iter().map(|&s| s as u128).sum();
    Ok(sum as f64 / secrets.len() as f64)
}

impl AveragingStrategy for Plaintext {
    fn name(&self) -> &'static str {
        "no-privacy"
    }

    fn average(&self, secrets: &[u64], _rng: &mut dyn RngCore) -> Result<f64> {
        plaintext_average(secrets)
    }
}

/// Threshold secret sharing with a strict-majority quorum.
#[derive(Debug, Clone)]
pub struct Shamir {
    engine: ShamirEngine,
}

impl Shamir {
    pub fn new(engine: ShamirEngine) -> Self {
        Self { engine }
    }
}

impl AveragingStrategy for Shamir {
    fn name(&self) -> &'static str {
        "shamir"
    }

    fn average(&self, secrets: &[u64], rng: &mut dyn RngCore) -> Result<f64> {
        let avg = self
            .engine
            .compute_shared_average(secrets.len(), secrets, rng)?;
        Ok(avg.to_f64())
    }
}
