use num_bigint::BigUint;
use num_traits::Zero;
use rand::RngCore;

use crate::field::PrimeField;
use crate::field_element::FieldElement;

/// A polynomial over a prime field, stored highest-degree coefficient first:
/// `f(x) = c_0·x^k + c_1·x^(k-1) + ... + c_(k-1)·x + secret`.
#[derive(Debug, Clone)]
pub struct Poly {
    field: PrimeField,
    /// Coefficients c_0, c_1, ..., c_(k-1), secret
    coeffs: Vec<FieldElement>,
}

impl Poly {
    /// Construct a polynomial from explicit coefficients (highest degree first).
    pub fn from_coeffs(field: &PrimeField, coeffs: Vec<FieldElement>) -> Self {
        Poly {
            field: field.clone(),
            coeffs,
        }
    }

    /// Generate a random polynomial of the given degree whose constant term is `secret`.
    /// The `degree` leading coefficients are drawn uniformly from the whole field.
    pub fn random<R: RngCore + ?Sized>(
        field: &PrimeField,
        degree: usize,
        secret: &FieldElement,
        rng: &mut R,
    ) -> Self {
        let mut coeffs = Vec::with_capacity(degree + 1);
        for _ in 0..degree {
            coeffs.push(field.random(rng));
        }
        coeffs.push(secret.clone());
        Poly {
            field: field.clone(),
            coeffs,
        }
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    pub fn coeffs(&self) -> &[FieldElement] {
        &self.coeffs
    }

    /// The constant term `f(0)`.
    pub fn secret(&self) -> FieldElement {
        self.coeffs
            .last()
            .cloned()
            .unwrap_or_else(|| self.field.zero())
    }

    /// Evaluate the polynomial at x using Horner's method, reducing after every step.
    ///
    /// Works on the raw representatives so parallel callers share no refcount.
    pub fn eval(&self, x: &FieldElement) -> FieldElement {
        let p = self.field.modulus();
        let x = x.value();
        let mut result = BigUint::zero();
        for coeff in self.coeffs.iter() {
            result = (result * x + coeff.value()) % p;
        }
        self.field.element(result)
    }
}
