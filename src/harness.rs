//! Repeatedly times each strategy and measures its distance from the
//! plaintext average.

use std::time::Instant;

use rand::{Rng, RngCore};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::config::DEFAULT_MAX_SECRET;
use crate::error::Result;
use crate::strategy::{plaintext_average, AveragingStrategy};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Population sizes to compare at
    pub sizes: Vec<usize>,
    /// Timed calls per (strategy, size)
    pub rounds: usize,
    pub max_secret: u64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            sizes: vec![10, 50, 150, 300, 500],
            rounds: 10,
            max_secret: DEFAULT_MAX_SECRET,
        }
    }
}

/// Mean runtime and accuracy of one strategy at one population size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub strategy: String,
    pub participants: usize,
    pub rounds: usize,
    pub mean_runtime_secs: f64,
    pub mean_distance: f64,
}

/// `n` secrets drawn uniformly from `[0, max_secret]`.
pub fn generate_secrets<R: RngCore + ?Sized>(n: usize, max_secret: u64, rng: &mut R) -> Vec<u64> {
    (0..n).map(|_| rng.random_range(0..=max_secret)).collect()
}

/// Run `strategy` `rounds` times on the same secrets.
///
/// Any failing round aborts the whole measurement.
pub fn measure(
    strategy: &dyn AveragingStrategy,
    secrets: &[u64],
    baseline: f64,
    rounds: usize,
    rng: &mut dyn RngCore,
) -> Result<Measurement> {
    let rounds = rounds.max(1);
    let mut runtime = 0.0;
    let mut distance = 0.0;
    for _ in 0..rounds {
        let start = Instant::now();
        let avg = strategy.average(secrets, rng)?;
        runtime += start.elapsed().as_secs_f64();
        distance += (baseline - avg).abs();
    }
    Ok(Measurement {
        strategy: strategy.name().to_string(),
        participants: secrets.len(),
        rounds,
        mean_runtime_secs: runtime / rounds as f64,
        mean_distance: distance / rounds as f64,
    })
}

/// Compare every strategy at every configured population size.
///
/// Failed measurements are logged and left out of the result.
#[instrument(skip_all, fields(sizes = ?config.sizes, rounds = config.rounds))]
pub fn run(
    config: &HarnessConfig,
    strategies: &[Box<dyn AveragingStrategy>],
    rng: &mut dyn RngCore,
) -> Vec<Measurement> {
    let mut results = Vec::with_capacity(config.sizes.len() * strategies.len());
    for &n in &config.sizes {
        let secrets = generate_secrets(n, config.max_secret, rng);
        let baseline = match plaintext_average(&secrets) {
            Ok(avg) => avg,
            Err(err) => {
                warn!(participants = n, %err, "skipping population size");
                continue;
            }
        };
        for strategy in strategies {
            match measure(strategy.as_ref(), &secrets, baseline, config.rounds, rng) {
                Ok(m) => {
                    info!(
                        strategy = %m.strategy,
                        participants = n,
                        runtime = m.mean_runtime_secs,
                        distance = m.mean_distance,
                        "measured"
                    );
                    results.push(m);
                }
                Err(err) => {
                    warn!(strategy = strategy.name(), participants = n, %err, "measurement aborted");
                }
            }
        }
    }
    results
}
