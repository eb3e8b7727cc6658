// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::{BigUint, ModInverse};
use num_integer::Integer;
use num_traits::One;
use zeroize::Zeroizing;

use crate::{Error, Result};

/// Carmichael's function for `n = pq`: λ = lcm(p-1, q-1).
pub fn carmichael_lambda(p: &BigUint, q: &BigUint) -> BigUint {
    let p_minus_1 = Zeroizing::new(p - BigUint::one());
    let q_minus_1 = Zeroizing::new(q - BigUint::one());
    p_minus_1.lcm(&*q_minus_1)
}

/// μ = λ⁻¹ mod n.
///
/// Fails with [`Error::KeyGenerationFailed`] when `gcd(λ, n) ≠ 1`.
pub fn lambda_inverse(lambda: &BigUint, n: &BigUint) -> Result<BigUint> {
    lambda
        .mod_inverse(n)
        .and_then(|inv| inv.to_biguint())
        .ok_or_else(|| Error::KeyGenerationFailed("lambda has no inverse modulo n".into()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn lambda_of_small_primes() {
        // lcm(10, 12) = 60
        let lambda = carmichael_lambda(&BigUint::from(11u32), &BigUint::from(13u32));
        assert_eq!(lambda, BigUint::from(60u32));
    }

    #[test]
    fn inverse_satisfies_definition() {
        let n = BigUint::from(143u32);
        let lambda = BigUint::from(60u32);
        let mu = lambda_inverse(&lambda, &n).unwrap();
        assert_eq!((&lambda * &mu) % &n, BigUint::one());
    }

    #[test]
    fn non_coprime_lambda_is_rejected() {
        // p = 3, q = 7: λ = 6 shares the factor 3 with n = 21
        let err = lambda_inverse(&BigUint::from(6u32), &BigUint::from(21u32)).unwrap_err();
        assert!(matches!(err, Error::KeyGenerationFailed(_)));
    }
}
