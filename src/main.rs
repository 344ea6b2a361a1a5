use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use num_bigint::BigUint;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use private_average::config::{
    EngineConfig, PaillierConfig, PrivacyBudget, DEFAULT_MAX_SECRET,
};
use private_average::dp::Laplace;
use private_average::field::DEFAULT_MODULUS;
use private_average::harness::{self, HarnessConfig};
use private_average::paillier::Paillier;
use private_average::report;
use private_average::strategy::{AveragingStrategy, Plaintext, Shamir};
use private_average::ShamirEngine;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compare private averaging strategies by runtime and accuracy")]
struct Cli {
    /// Population sizes to measure (comma-separated).
    #[arg(long, value_delimiter = ',', default_values_t = vec![10usize, 50, 150, 300, 500])]
    sizes: Vec<usize>,
    /// Timed calls per strategy and size.
    #[arg(long, default_value_t = 10)]
    rounds: usize,
    /// Largest secret value (inclusive).
    #[arg(long, default_value_t = DEFAULT_MAX_SECRET)]
    max_secret: u64,
    /// Prime field modulus for secret sharing (decimal).
    #[arg(long, default_value_t = BigUint::from(DEFAULT_MODULUS))]
    modulus: BigUint,
    /// Differential privacy budget.
    #[arg(long, default_value_t = 1.0)]
    epsilon: f64,
    /// Bit length of the Paillier public modulus.
    #[arg(long, default_value_t = 512)]
    paillier_bits: u64,
    /// Leave Paillier out of the comparison (it dominates runtime).
    #[arg(long, default_value_t = false)]
    skip_paillier: bool,
    /// Seed for a reproducible run; the OS rng is used otherwise.
    #[arg(long)]
    seed: Option<u64>,
    /// CSV report destination.
    #[arg(long, default_value = "results.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let engine = ShamirEngine::new(&EngineConfig::new(cli.modulus.clone(), cli.max_secret))
        .context("invalid secret-sharing configuration")?;
    info!(
        modulus = %engine.field().modulus(),
        max_secret = engine.max_secret(),
        "secret-sharing engine ready"
    );
    let laplace = Laplace::new(PrivacyBudget { epsilon: cli.epsilon }, cli.max_secret)
        .context("invalid privacy budget")?;

    let mut strategies: Vec<Box<dyn AveragingStrategy>> = vec![Box::new(Plaintext)];
    if !cli.skip_paillier {
        let paillier = Paillier::new(PaillierConfig {
            key_bits: cli.paillier_bits,
        })
        .context("invalid paillier configuration")?;
        strategies.push(Box::new(paillier));
    }
    strategies.push(Box::new(Shamir::new(engine)));
    strategies.push(Box::new(laplace));

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let config = HarnessConfig {
        sizes: cli.sizes,
        rounds: cli.rounds,
        max_secret: cli.max_secret,
    };
    let measurements = harness::run(&config, &strategies, &mut rng);

    report::write_csv_file(&measurements, &cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    info!(
        rows = measurements.len(),
        output = %cli.output.display(),
        "report written"
    );
    Ok(())
}
