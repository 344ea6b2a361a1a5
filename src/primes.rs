//! Miller–Rabin primality testing over `BigUint`, used to validate field moduli.

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Witnesses for Miller–Rabin. With these bases the test is deterministic
/// below 3.3 * 10^24, which covers the default field modulus.
const WITNESSES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// Small primes used for cheap trial division before Miller–Rabin.
const SMALL_PRIMES: [u32; 24] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
];

/// Returns `true` if `n` is (probably) prime.
pub fn is_prime(n: &BigUint) -> bool {
    let two = BigUint::from(2u8);
    if n < &two {
        return false;
    }
    for &p in SMALL_PRIMES.iter() {
        let p = BigUint::from(p);
        if n == &p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    // n - 1 = d * 2^s with d odd
    let n_minus_one = n - BigUint::one();
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    'witness: for &a in WITNESSES.iter() {
        let a = BigUint::from(a);
        let mut x = a.modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::DEFAULT_MODULUS;

    #[test]
    fn small_values() {
        let primes: Vec<u32> = (0u32..60)
            .filter(|&v| is_prime(&BigUint::from(v)))
            .collect();
        assert_eq!(
            primes,
            vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59]
        );
    }

    #[test]
    fn default_modulus_is_prime() {
        assert!(is_prime(&BigUint::from(DEFAULT_MODULUS)));
        assert!(!is_prime(&(BigUint::from(DEFAULT_MODULUS) + 2u8)));
    }

    #[test]
    fn carmichael_numbers_are_rejected() {
        for c in [561u32, 1105, 1729, 2465, 2821, 6601, 8911] {
            assert!(!is_prime(&BigUint::from(c)), "{} is composite", c);
        }
    }
}
