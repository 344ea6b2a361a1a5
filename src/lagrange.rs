//! Lagrange interpolation at x = 0 over a prime field.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::field::PrimeField;
use crate::field_element::FieldElement;
use crate::shares::CombinedShare;

/// Lagrange coefficient λ_i for index `i` given a set of distinct indices `S`.
///
/// # Formula
/// ```text
/// λ_i = ∏_{j ∈ S, j ≠ i} (0 - j) / (i - j)  (mod p)
///     = ∏_{j ∈ S, j ≠ i} (-j) * (i - j)^{-1}
/// ```
/// These satisfy ∑_{i ∈ S} λ_i · f(i) = f(0) for any polynomial f of degree < |S|.
///
/// A zero denominator can only come from a repeated index and is reported
/// as `Error::DuplicateQuorumIndex`.
#[allow(non_snake_case)]
pub fn lagrange_coefficient(field: &PrimeField, i: u64, S: &[u64]) -> Result<FieldElement> {
    let x_i = field.evaluation_point(i)?;
    // numerator = ∏_{j != i} (-j)
    let mut num = field.one();
    // denominator = ∏_{j != i} (i - j)
    let mut den = field.one();
    for &j in S {
        if j == i {
            continue;
        }
        let x_j = field.evaluation_point(j)?;
        num = num * &(-&x_j);
        den = den * &(&x_i - &x_j);
    }
    let den_inv = den.inverse().map_err(|_| Error::DuplicateQuorumIndex(i))?;
    Ok(num * &den_inv)
}

/// Compute all Lagrange coefficients for the set `S`.
/// Returns a vector of (i, λ_i) for each i in S.
#[allow(non_snake_case)]
pub fn lagrange_coefficients(field: &PrimeField, S: &[u64]) -> Result<Vec<(u64, FieldElement)>> {
    ensure_distinct(S.iter().copied())?;
    S.iter()
        .map(|&i| lagrange_coefficient(field, i, S).map(|l| (i, l)))
        .collect()
}

/// Recover g(0) from points `(i, g(i))` of a polynomial g of degree < `points.len()`.
///
/// Only distinctness of the indices is checked here; whether there are
/// enough points for the polynomial's degree is the caller's contract
/// (see `reconstruct::Quorum`).
pub fn interpolate_at_zero(field: &PrimeField, points: &[CombinedShare]) -> Result<FieldElement> {
    let indices: Vec<u64> = points.iter().map(|p| p.index).collect();
    let coeffs = lagrange_coefficients(field, &indices)?;
    let mut result = field.zero();
    for ((_, lambda), point) in coeffs.iter().zip(points) {
        result = result + &(lambda * &point.value);
    }
    Ok(result)
}

pub(crate) fn ensure_distinct(indices: impl IntoIterator<Item = u64>) -> Result<()> {
    let mut seen = HashSet::new();
    for i in indices {
        if !seen.insert(i) {
            return Err(Error::DuplicateQuorumIndex(i));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    fn gf(p: u32) -> PrimeField {
        PrimeField::new(BigUint::from(p)).unwrap()
    }

    fn point(field: &PrimeField, index: u64, value: u64) -> CombinedShare {
        CombinedShare {
            index,
            value: field.element(value),
        }
    }

    #[test]
    #[allow(non_snake_case)]
    fn lagrange_sum_identity() {
        // f(x) = 7x^2 + 5x + 3, S = {1, 2, 4}; ∑ λ_i · f(i) = f(0) = 3
        let field = PrimeField::default();
        let f = |x: u64| field.element(7 * x * x + 5 * x + 3);
        let S = [1u64, 2, 4];
        let coeffs = lagrange_coefficients(&field, &S).unwrap();
        let mut sum = field.zero();
        for (i, lambda) in &coeffs {
            sum = sum + &(lambda * &f(*i));
        }
        assert_eq!(sum, field.element(3u8));
    }

    #[test]
    fn sum_of_lagrange_equals_one() {
        let field = gf(31);
        let coeffs = lagrange_coefficients(&field, &[3, 5, 7]).unwrap();
        let mut sum = field.zero();
        for (_, lambda) in &coeffs {
            sum = sum + lambda;
        }
        assert_eq!(sum, field.one());
    }

    #[test]
    fn coefficient_for_known_set() {
        // S = {1, 2} over GF(97): λ_1 = -2 / (1 - 2) = 2, λ_2 = -1 / (2 - 1) = -1
        let field = gf(97);
        assert_eq!(lagrange_coefficient(&field, 1, &[1, 2]).unwrap(), field.element(2u8));
        assert_eq!(lagrange_coefficient(&field, 2, &[1, 2]).unwrap(), field.element(96u8));
    }

    #[test]
    fn interpolates_line() {
        // g(x) = 3x + 10 over GF(97)
        let field = gf(97);
        let points = [point(&field, 2, 16), point(&field, 5, 25)];
        assert_eq!(interpolate_at_zero(&field, &points).unwrap(), field.element(10u8));
    }

    #[test]
    fn single_point_is_constant() {
        let field = gf(97);
        let points = [point(&field, 3, 42)];
        assert_eq!(interpolate_at_zero(&field, &points).unwrap(), field.element(42u8));
    }

    #[test]
    fn duplicate_index_is_diagnosed() {
        let field = gf(97);
        let points = [point(&field, 2, 16), point(&field, 2, 16), point(&field, 3, 19)];
        assert_eq!(
            interpolate_at_zero(&field, &points),
            Err(Error::DuplicateQuorumIndex(2))
        );
    }

    #[test]
    fn indices_congruent_modulo_p_are_diagnosed() {
        // 1 and 12 coincide in GF(11); the zero denominator surfaces as a duplicate
        let field = gf(11);
        assert_eq!(
            lagrange_coefficient(&field, 1, &[1, 12]),
            Err(Error::DuplicateQuorumIndex(1))
        );
    }

    #[test]
    fn zero_index_is_rejected() {
        let field = gf(11);
        assert!(matches!(
            lagrange_coefficient(&field, 0, &[0, 1]),
            Err(Error::InvalidParticipantIndex { index: 0, .. })
        ));
    }
}
