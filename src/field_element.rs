use std::fmt::{self, Debug};
use std::ops::{Add, Mul, Neg, Sub};
use std::sync::Arc;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{Error, Result};

/// An element of a `PrimeField`, always stored reduced into `[0, p)`.
///
/// The modulus travels with the element (shared, not copied) so that the
/// usual operators can reduce without a handle to the field.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FieldElement {
    value: BigUint,
    modulus: Arc<BigUint>,
}

impl Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({} mod {})", self.value, self.modulus)
    }
}

impl FieldElement {
    pub(crate) fn new(value: BigUint, modulus: Arc<BigUint>) -> Self {
        Self {
            value: value % &*modulus,
            modulus,
        }
    }

    /// The canonical representative in `[0, p)`.
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn into_value(self) -> BigUint {
        self.value
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Multiplicative inverse via the extended Euclidean algorithm.
    ///
    /// Zero has no inverse and yields `Error::NotInvertible`.
    pub fn inverse(&self) -> Result<Self> {
        mod_inverse(&self.value, &self.modulus)
            .map(|inv| self.with_value(inv))
            .ok_or_else(|| Error::NotInvertible(self.value.clone()))
    }

    /// `self^exp mod p`.
    pub fn pow(&self, exp: &BigUint) -> Self {
        self.with_value(self.value.modpow(exp, &self.modulus))
    }

    fn with_value(&self, value: BigUint) -> Self {
        Self::new(value, Arc::clone(&self.modulus))
    }

    fn check_same_field(&self, rhs: &Self) {
        debug_assert_eq!(
            self.modulus, rhs.modulus,
            "operands belong to different fields"
        );
    }
}

/// Inverse of `a` modulo `m`, which need not be prime, when gcd(a, m) = 1.
pub(crate) fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    let a = BigInt::from(a.clone());
    let m = BigInt::from(m.clone());
    let egcd = a.extended_gcd(&m);
    if !egcd.gcd.is_one() {
        return None;
    }
    // x may be negative; mod_floor brings it back into [0, m)
    Some(egcd.x.mod_floor(&m).magnitude().clone())
}

impl Add<&FieldElement> for FieldElement {
    type Output = Self;
    fn add(self, rhs: &Self) -> Self {
        self.check_same_field(rhs);
        let sum = self.value + &rhs.value;
        Self::new(sum, self.modulus)
    }
}

impl Add<&FieldElement> for &FieldElement {
    type Output = FieldElement;
    fn add(self, rhs: &FieldElement) -> FieldElement {
        self.clone() + rhs
    }
}

impl Sub<&FieldElement> for FieldElement {
    type Output = Self;
    fn sub(self, rhs: &Self) -> Self {
        self.check_same_field(rhs);
        let diff = if self.value >= rhs.value {
            self.value - &rhs.value
        } else {
            self.value + &*self.modulus - &rhs.value
        };
        Self::new(diff, self.modulus)
    }
}

impl Sub<&FieldElement> for &FieldElement {
    type Output = FieldElement;
    fn sub(self, rhs: &FieldElement) -> FieldElement {
        self.clone() - rhs
    }
}

impl Mul<&FieldElement> for FieldElement {
    type Output = Self;
    fn mul(self, rhs: &Self) -> Self {
        self.check_same_field(rhs);
        let prod = self.value * &rhs.value;
        Self::new(prod, self.modulus)
    }
}

impl Mul<&FieldElement> for &FieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: &FieldElement) -> FieldElement {
        self.check_same_field(rhs);
        let prod = &self.value * &rhs.value;
        FieldElement::new(prod, Arc::clone(&self.modulus))
    }
}

impl Neg for FieldElement {
    type Output = Self;
    fn neg(self) -> Self {
        if self.value.is_zero() {
            self
        } else {
            let v = &*self.modulus - &self.value;
            Self::new(v, self.modulus)
        }
    }
}

impl Neg for &FieldElement {
    type Output = FieldElement;
    fn neg(self) -> FieldElement {
        -self.clone()
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
