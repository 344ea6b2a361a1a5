pub mod config;
pub mod dp;
pub mod engine;
pub mod error;
pub mod field;
mod field_element;
pub mod harness;
pub mod lagrange;
pub mod paillier;
pub mod polynomial;
pub mod primes;
pub mod reconstruct;
pub mod report;
pub mod shares;
pub mod strategy;

pub use config::{EngineConfig, PaillierConfig, PrivacyBudget};
pub use engine::{Average, ShamirEngine};
pub use error::{Error, Result};
pub use field::PrimeField;
pub use field_element::FieldElement;
