use std::fmt::{self, Debug};
use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::RngCore;

use crate::error::{Error, Result};
use crate::field_element::FieldElement;
use crate::primes;

/// Production field modulus: a 75-bit prime, large enough that sums of
/// thousands of bounded secrets never wrap.
pub const DEFAULT_MODULUS: u128 = 35_452_590_104_031_691_935_943;

/// A prime field F_p whose modulus is chosen at runtime.
///
/// The modulus is shared by reference with every element created from the
/// field, so several fields (e.g. a production prime and a tiny test prime)
/// can be used side by side.
#[derive(Clone, PartialEq, Eq)]
pub struct PrimeField {
    modulus: Arc<BigUint>,
}

impl Debug for PrimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrimeField({})", self.modulus)
    }
}

impl Default for PrimeField {
    fn default() -> Self {
        Self {
            modulus: Arc::new(BigUint::from(DEFAULT_MODULUS)),
        }
    }
}

impl PrimeField {
    /// Construct a field, rejecting composite moduli.
    pub fn new(modulus: BigUint) -> Result<Self> {
        if !primes::is_prime(&modulus) {
            return Err(Error::InvalidModulus(modulus));
        }
        Ok(Self {
            modulus: Arc::new(modulus),
        })
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Reduce `value` into `[0, p)`.
    pub fn element(&self, value: impl Into<BigUint>) -> FieldElement {
        FieldElement::new(value.into(), Arc::clone(&self.modulus))
    }

    pub fn zero(&self) -> FieldElement {
        self.element(BigUint::zero())
    }

    pub fn one(&self) -> FieldElement {
        self.element(BigUint::one())
    }

    /// Map a 1-based participant index to its evaluation point.
    ///
    /// Indices congruent to zero would reveal `f(0)` and make Lagrange
    /// denominators vanish, so they are rejected.
    pub fn evaluation_point(&self, index: u64) -> Result<FieldElement> {
        let x = self.element(index);
        if x.is_zero() {
            return Err(Error::InvalidParticipantIndex {
                index,
                modulus: self.modulus().clone(),
            });
        }
        Ok(x)
    }

    /// Sample a uniform element of `[0, p)` by rejection sampling.
    pub fn random<R: RngCore + ?Sized>(&self, rng: &mut R) -> FieldElement {
        let bits = self.modulus.bits();
        let byte_len = bits.div_ceil(8) as usize;
        let excess = (byte_len as u64) * 8 - bits;
        let mut buf = vec![0u8; byte_len];
        loop {
            rng.fill_bytes(&mut buf);
            let candidate = BigUint::from_bytes_be(&buf) >> excess;
            if candidate < *self.modulus {
                return self.element(candidate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::ToPrimitive;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn gf(p: u32) -> PrimeField {
        PrimeField::new(BigUint::from(p)).unwrap()
    }

    #[test]
    fn composite_modulus_is_rejected() {
        assert_eq!(
            PrimeField::new(BigUint::from(91u8)),
            Err(Error::InvalidModulus(BigUint::from(91u8)))
        );
        assert!(PrimeField::new(BigUint::from(1u8)).is_err());
    }

    #[test]
    fn default_uses_production_prime() {
        let field = PrimeField::default();
        assert_eq!(field.modulus(), &BigUint::from(DEFAULT_MODULUS));
        assert_eq!(field.modulus().bits(), 75);
    }

    #[test]
    fn element_reduces() {
        let field = gf(97);
        assert_eq!(field.element(100u32).value(), &BigUint::from(3u8));
        assert_eq!(field.element(97u32), field.zero());
    }

    #[test]
    fn evaluation_point_rejects_multiples_of_modulus() {
        let field = gf(11);
        assert!(field.evaluation_point(1).is_ok());
        assert!(field.evaluation_point(10).is_ok());
        assert_eq!(
            field.evaluation_point(22),
            Err(Error::InvalidParticipantIndex {
                index: 22,
                modulus: BigUint::from(11u8)
            })
        );
    }

    #[test]
    fn random_stays_in_range_and_covers_small_field() {
        let field = gf(7);
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = [0usize; 7];
        for _ in 0..700 {
            let v = field.random(&mut rng);
            assert!(v.value() < field.modulus());
            seen[v.value().to_usize().unwrap()] += 1;
        }
        assert!(seen.iter().all(|&c| c > 50), "{:?}", seen);
    }

    #[test]
    fn fields_with_different_moduli_coexist() {
        let small = gf(31);
        let large = PrimeField::default();
        let a = small.element(40u32);
        let b = large.element(40u32);
        assert_eq!(a.value(), &BigUint::from(9u8));
        assert_eq!(b.value(), &BigUint::from(40u8));
    }
}
