//! Differential privacy through the Laplace mechanism on the sum.

use rand::RngCore;
use rand_distr::{Distribution, Exp1};

use crate::config::PrivacyBudget;
use crate::error::{Error, Result};
use crate::strategy::AveragingStrategy;

/// Adds Laplace(0, max_secret / epsilon) noise to the sum before dividing.
///
/// One participant can move the sum by at most `max_secret`, which is the
/// sensitivity the noise scale is calibrated to.
#[derive(Debug, Clone, Copy)]
pub struct Laplace {
    scale: f64,
}

impl Laplace {
    pub fn new(budget: PrivacyBudget, max_secret: u64) -> Result<Self> {
        if !(budget.epsilon.is_finite() && budget.epsilon > 0.0) {
            return Err(Error::InvalidPrivacyBudget(budget.epsilon));
        }
        // tiny epsilons overflow the scale to infinity
        let scale = max_secret as f64 / budget.epsilon;
        if !scale.is_finite() {
            return Err(Error::InvalidPrivacyBudget(budget.epsilon));
        }
        Ok(Self { scale })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The difference of two Exp(1) draws is Laplace(0, 1).
    pub fn sample_noise<R: RngCore + ?Sized>(&self, rng: &mut R) -> f64 {
        let a: f64 = Exp1.sample(rng);
        let b: f64 = Exp1.sample(rng);
        self.scale * (a - b)
    }
}

impl AveragingStrategy for Laplace {
    fn name(&self) -> &'static str {
        "differential-privacy"
    }

    fn average(&self, secrets: &[u64], rng: &mut dyn RngCore) -> Result<f64> {
        if secrets.is_empty() {
            return Err(Error::EmptyPopulation);
        }
        let sum: u128 = secrets.iter().map(|&s| s as u128).sum();
        let noisy = sum as f64 + self.sample_noise(rng);
        Ok(noisy / secrets.len() as f64)
    }
}
