// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

use num_bigint_dig::{BigUint, RandBigInt};
use rand::rngs::{OsRng, StdRng};
use rand::SeedableRng;

use crate::util::prime;
use crate::{Error, Result};

/// Source of secure randomness and probable primes.
///
/// Every random value in the crate (blinding factors, masks, key primes) is
/// drawn through this trait, so a deterministic implementation can be
/// substituted in tests.
pub trait RandomSource {
    /// Uniform integer in `[low, high)`.
    ///
    /// Fails with [`Error::RandomnessSource`] if the range is empty.
    fn random_in_range(&mut self, low: &BigUint, high: &BigUint) -> Result<BigUint>;

    /// Probable prime with exactly `bit_length` bits.
    fn random_prime(&mut self, bit_length: usize) -> Result<BigUint>;

    /// Derive an independent child source.
    ///
    /// Used to give each protocol role its own source and to run prime
    /// searches in parallel.
    fn fork(&mut self) -> Result<Self>
    where
        Self: Sized;
}

/// [`RandomSource`] backed by [`StdRng`].
pub struct RngSource {
    rng: StdRng,
    primality_rounds: Option<usize>,
}

impl RngSource {
    /// Seed a new source from the operating system.
    pub fn from_entropy() -> Result<Self> {
        let rng = StdRng::from_rng(OsRng)?;
        Ok(Self { rng, primality_rounds: None })
    }

    /// Deterministic source for reproducible runs. Not for production keys.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed), primality_rounds: None }
    }

    /// Fix the number of Miller-Rabin rounds used by [`RandomSource::random_prime`].
    ///
    /// By default the round count is chosen from the prime's bit length.
    pub fn with_primality_rounds(mut self, rounds: usize) -> Self {
        self.primality_rounds = Some(rounds.max(1));
        self
    }
}

impl RandomSource for RngSource {
    fn random_in_range(&mut self, low: &BigUint, high: &BigUint) -> Result<BigUint> {
        if low >= high {
            return Err(Error::RandomnessSource("requested range is empty".into()));
        }
        Ok(self.rng.gen_biguint_range(low, high))
    }

    fn random_prime(&mut self, bit_length: usize) -> Result<BigUint> {
        prime::probable_prime(bit_length, self.primality_rounds, &mut self.rng)
    }

    fn fork(&mut self) -> Result<Self> {
        let rng = StdRng::from_rng(&mut self.rng)?;
        Ok(Self { rng, primality_rounds: self.primality_rounds })
    }
}

impl fmt::Debug for RngSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RngSource")
            .field("primality_rounds", &self.primality_rounds)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn range_is_half_open() {
        let mut rng = RngSource::seeded(5);
        let low = BigUint::from(10u32);
        let high = BigUint::from(13u32);
        for _ in 0..200 {
            let v = rng.random_in_range(&low, &high).unwrap();
            assert!(v >= low && v < high);
        }
    }

    #[test]
    fn single_value_range() {
        let mut rng = RngSource::seeded(5);
        let v = rng.random_in_range(&BigUint::from(4u32), &BigUint::from(5u32)).unwrap();
        assert_eq!(v, BigUint::from(4u32));
    }

    #[test]
    fn empty_range_is_rejected() {
        let mut rng = RngSource::seeded(5);
        let err = rng.random_in_range(&BigUint::from(9u32), &BigUint::from(9u32)).unwrap_err();
        assert!(matches!(err, Error::RandomnessSource(_)));
    }

    #[test]
    fn seeded_sources_are_reproducible() {
        let mut a = RngSource::seeded(99);
        let mut b = RngSource::seeded(99);
        assert_eq!(a.random_prime(128).unwrap(), b.random_prime(128).unwrap());
    }

    #[test]
    fn forks_diverge_from_parent() {
        let mut parent = RngSource::seeded(1);
        let mut left = parent.fork().unwrap();
        let mut right = parent.fork().unwrap();
        assert_ne!(left.random_prime(64).unwrap(), right.random_prime(64).unwrap());
    }

    #[test]
    fn entropy_source_produces_primes() {
        let mut rng = RngSource::from_entropy().unwrap().with_primality_rounds(8);
        assert_eq!(rng.random_prime(64).unwrap().bits(), 64);
    }

    #[test]
    fn debug_hides_generator_state() {
        let rendered = format!("{:?}", RngSource::seeded(3));
        assert!(rendered.starts_with("RngSource"));
        assert!(!rendered.contains("rng:"));
    }
}
