//! Share distribution and per-participant combination.
//!
//! Every secret gets its own freshly sampled polynomial; participant `i`
//! receives `f_s(i)` for each secret `s`. Summing those locally gives a
//! point on `g = Σ f_s`, whose constant term is the sum of all secrets.

use num_bigint::BigUint;
use rand::RngCore;
use rayon::prelude::*;
use tracing::debug;

use crate::error::{Error, Result};
use crate::field::PrimeField;
use crate::field_element::FieldElement;
use crate::polynomial::Poly;

/// The shares one participant holds: one value per secret, in secret order.
#[derive(Debug, Clone)]
pub struct ParticipantShares {
    /// The participant index (1-based)
    pub index: u64,
    /// f_s(index) for every secret s
    pub values: Vec<FieldElement>,
}

/// A participant's local sum of its shares; the unit exchanged for reconstruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedShare {
    pub index: u64,
    pub value: FieldElement,
}

impl ParticipantShares {
    /// Reduce this participant's shares to one combined share.
    pub fn combine(&self, field: &PrimeField) -> CombinedShare {
        let sum: BigUint = self.values.iter().map(FieldElement::value).sum();
        let value = field.element(sum);
        CombinedShare {
            index: self.index,
            value,
        }
    }
}

/// Split every secret among `participants` parties with polynomials of the given degree.
///
/// Returns one `ParticipantShares` per participant, ordered by index `1..=participants`.
/// Reconstruction later needs `degree + 1` combined shares.
pub fn distribute<R: RngCore + ?Sized>(
    field: &PrimeField,
    participants: usize,
    degree: usize,
    secrets: &[FieldElement],
    rng: &mut R,
) -> Result<Vec<ParticipantShares>> {
    if participants == 0 {
        return Err(Error::EmptyPopulation);
    }
    if degree + 1 > participants {
        return Err(Error::InvalidThreshold {
            quorum: degree + 1,
            participants,
        });
    }
    let points = (1..=participants as u64)
        .map(|i| field.evaluation_point(i).map(|x| (i, x)))
        .collect::<Result<Vec<_>>>()?;

    // Sampling consumes the injected rng, so polynomials are built sequentially.
    let polys: Vec<Poly> = secrets
        .iter()
        .map(|s| Poly::random(field, degree, s, &mut *rng))
        .collect();
    debug!(
        participants,
        degree,
        secrets = polys.len(),
        "generated sharing polynomials"
    );

    Ok(points
        .into_par_iter()
        .map(|(index, x)| ParticipantShares {
            index,
            values: polys.par_iter().map(|p| p.eval(&x)).collect(),
        })
        .collect())
}

/// Combine every participant's shares, checking that each holds `secret_count` values.
pub fn combine_all(
    field: &PrimeField,
    shares: &[ParticipantShares],
    secret_count: usize,
) -> Result<Vec<CombinedShare>> {
    if let Some(bad) = shares.iter().find(|s| s.values.len() != secret_count) {
        return Err(Error::MalformedShares {
            index: bad.index,
            expected: secret_count,
            found: bad.values.len(),
        });
    }
    let combined: Vec<CombinedShare> = shares.par_iter().map(|s| s.combine(field)).collect();
    debug!(participants = combined.len(), "combined local shares");
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn gf(p: u32) -> PrimeField {
        PrimeField::new(BigUint::from(p)).unwrap()
    }

    #[test]
    fn distribute_gives_one_share_per_secret_to_each_participant() {
        let field = PrimeField::default();
        let mut rng = StdRng::seed_from_u64(11);
        let secrets: Vec<_> = [10u64, 20, 30].iter().map(|&s| field.element(s)).collect();
        let shares = distribute(&field, 5, 2, &secrets, &mut rng).unwrap();
        assert_eq!(shares.len(), 5);
        for (pos, s) in shares.iter().enumerate() {
            assert_eq!(s.index, pos as u64 + 1);
            assert_eq!(s.values.len(), 3);
        }
    }

    #[test]
    fn degree_zero_shares_equal_the_secret() {
        let field = gf(97);
        let mut rng = StdRng::seed_from_u64(11);
        let secrets = vec![field.element(42u8)];
        let shares = distribute(&field, 1, 0, &secrets, &mut rng).unwrap();
        assert_eq!(shares[0].values, secrets);
    }

    #[test]
    fn combined_share_is_sum_of_individual_shares() {
        let field = gf(97);
        let shares = ParticipantShares {
            index: 3,
            values: vec![field.element(50u8), field.element(60u8), field.element(1u8)],
        };
        assert_eq!(
            shares.combine(&field),
            CombinedShare {
                index: 3,
                value: field.element(14u8) // 111 mod 97
            }
        );
    }

    #[test]
    fn quorum_larger_than_population_is_rejected() {
        let field = gf(97);
        let mut rng = StdRng::seed_from_u64(1);
        let secrets = vec![field.element(1u8)];
        assert_eq!(
            distribute(&field, 3, 3, &secrets, &mut rng).unwrap_err(),
            Error::InvalidThreshold {
                quorum: 4,
                participants: 3
            }
        );
        assert_eq!(
            distribute(&field, 0, 0, &secrets, &mut rng).unwrap_err(),
            Error::EmptyPopulation
        );
    }

    #[test]
    fn population_must_fit_in_the_field() {
        // index 11 is zero in GF(11)
        let field = gf(11);
        let mut rng = StdRng::seed_from_u64(1);
        let secrets = vec![field.element(1u8)];
        assert!(matches!(
            distribute(&field, 11, 2, &secrets, &mut rng),
            Err(Error::InvalidParticipantIndex { index: 11, .. })
        ));
    }

    #[test]
    fn combine_all_rejects_ragged_shares() {
        let field = gf(97);
        let shares = vec![
            ParticipantShares {
                index: 1,
                values: vec![field.one(), field.one()],
            },
            ParticipantShares {
                index: 2,
                values: vec![field.one()],
            },
        ];
        assert_eq!(
            combine_all(&field, &shares, 2),
            Err(Error::MalformedShares {
                index: 2,
                expected: 2,
                found: 1
            })
        );
    }
}
