// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Probable-prime search backing [`RngSource`](crate::RngSource).
//!
//! Candidates are drawn with the top and bottom bits set, run through a
//! small-prime sieve, and only then handed to Miller-Rabin. A rejected
//! candidate is stepped by two for a bounded window before a fresh random
//! base is drawn.

use num_bigint_dig::prime::probably_prime;
use num_bigint_dig::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::RngCore;
use zeroize::Zeroize;

use crate::{Error, Result};

/// Odd primes below 256, used to reject most composites before Miller-Rabin.
const SIEVE_PRIMES: &[u32] = &[
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// Maximum increment attempts before restarting with a new random base.
const MAX_INCREMENT: u32 = 4_096;

/// Smallest prime size the search accepts. Below this the sieve could reject
/// the very primes it is looking for.
pub const MIN_PRIME_BITS: usize = 16;

/// Search for a probable prime of exactly `bits` bits.
///
/// `rounds` fixes the Miller-Rabin round count; `None` picks it from the bit
/// length with [`optimal_miller_rabin_rounds`].
///
/// # Errors
///
/// Returns [`Error::RandomnessSource`] if `bits < MIN_PRIME_BITS`.
pub fn probable_prime<R: RngCore + ?Sized>(
    bits: usize,
    rounds: Option<usize>,
    rng: &mut R,
) -> Result<BigUint> {
    if bits < MIN_PRIME_BITS {
        return Err(Error::RandomnessSource(format!(
            "prime bit length {bits} is below the minimum of {MIN_PRIME_BITS}"
        )));
    }

    let rounds = rounds.unwrap_or_else(|| optimal_miller_rabin_rounds(bits));

    loop {
        let mut candidate = generate_candidate(bits, rng);

        for _ in 0..MAX_INCREMENT {
            // stepping past 2^bits would change the bit length
            if candidate.bits() > bits {
                break;
            }
            if !divisible_by_small_prime(&candidate) && probably_prime(&candidate, rounds) {
                return Ok(candidate);
            }
            candidate += 2u32;
        }

        candidate.zeroize();
    }
}

/// Random odd integer with exactly `bits` bits (MSB and LSB set).
#[inline]
fn generate_candidate<R: RngCore + ?Sized>(bits: usize, rng: &mut R) -> BigUint {
    let mut candidate = rng.gen_biguint(bits);
    candidate |= BigUint::one() << (bits - 1);
    candidate |= BigUint::one();
    candidate
}

#[inline]
fn divisible_by_small_prime(n: &BigUint) -> bool {
    SIEVE_PRIMES.iter().any(|&prime| (n % prime).is_zero())
}

/// Number of Miller-Rabin rounds for a candidate of `bits` bits.
///
/// | Bits  | Rounds |
/// |-------|--------|
/// | ≤ 256 | 40     |
/// | 512   | 15     |
/// | 1024  | 10     |
/// | 2048  | 6      |
/// | 4096  | 4      |
///
/// Reference: FIPS 186-4 Table C.1, targeting an error below 2^-128.
#[inline]
pub const fn optimal_miller_rabin_rounds(bits: usize) -> usize {
    match bits {
        0..=256 => 40,
        257..=512 => 15,
        513..=1024 => 10,
        1025..=2048 => 6,
        2049..=4096 => 4,
        _ => 3,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use num_integer::Integer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generates_prime_of_exact_length() {
        let mut rng = StdRng::seed_from_u64(7);
        for bits in [16, 64, 128, 256] {
            let p = probable_prime(bits, None, &mut rng).unwrap();
            assert_eq!(p.bits(), bits);
            assert!(probably_prime(&p, 20));
        }
    }

    #[test]
    fn honours_explicit_round_count() {
        let mut rng = StdRng::seed_from_u64(11);
        let p = probable_prime(96, Some(2), &mut rng).unwrap();
        assert_eq!(p.bits(), 96);
        assert!(probably_prime(&p, 20));
    }

    #[test]
    fn rejects_small_bit_lengths() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = probable_prime(8, None, &mut rng).unwrap_err();
        assert!(matches!(err, Error::RandomnessSource(_)));
    }

    #[test]
    fn same_seed_same_prime() {
        let a = probable_prime(128, None, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = probable_prime(128, None, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn candidates_have_exact_length_and_are_odd() {
        let mut rng = StdRng::seed_from_u64(3);
        for bits in [16, 63, 130] {
            let c = generate_candidate(bits, &mut rng);
            assert_eq!(c.bits(), bits);
            assert!(c.is_odd());
        }
    }

    #[test]
    fn sieve_rejects_small_factors() {
        assert!(divisible_by_small_prime(&BigUint::from(3u32 * 65_537)));
        assert!(!divisible_by_small_prime(&BigUint::from(65_537u32)));
    }
}
