// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

mod decrypt;
mod encrypt;
mod homomorphic;
mod util;

use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::random::RandomSource;

use num_bigint_dig::{BigInt, BigUint};

/// Encrypts a single plaintext.
pub trait Encrypt {
    /// Encrypt `m` under a fresh blinding factor drawn from `rng`.
    ///
    /// The plaintext must be strictly smaller than the public modulus `n`.
    /// Encrypting the same value twice yields different ciphertexts.
    fn encrypt<R: RandomSource + ?Sized>(&self, m: &BigUint, rng: &mut R) -> Result<Ciphertext>;

    /// Encrypt a signed plaintext. Negative values are outside the plaintext
    /// domain and are rejected with [`Error::PlaintextOutOfRange`].
    fn encrypt_signed<R: RandomSource + ?Sized>(
        &self,
        m: &BigInt,
        rng: &mut R,
    ) -> Result<Ciphertext> {
        let m = m.to_biguint().ok_or(Error::PlaintextOutOfRange)?;
        self.encrypt(&m, rng)
    }
}

/// Recovers the plaintext behind a ciphertext.
pub trait Decrypt {
    /// Recover the plaintext `m ∈ [0, n)` from a ciphertext `c ∈ [0, n²)`.
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<BigUint>;
}

/// Operations on ciphertexts that act on the hidden plaintexts.
///
/// All results are reduced modulo `n²`; operands outside `[0, n²)` are
/// rejected with [`Error::InvalidCiphertext`].
pub trait Homomorphic {
    /// `(a · b) mod n²`, an encryption of `(m_a + m_b) mod n`.
    fn ciphertext_product(&self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext>;

    /// `c^k mod n²`, an encryption of `(m · k) mod n`.
    ///
    /// `k` is any integer; a [`Ciphertext`] dereferences to its value and may
    /// be passed directly.
    fn ciphertext_pow(&self, c: &Ciphertext, k: &BigUint) -> Result<Ciphertext>;

    /// `c^(n-1) mod n²`, an encryption of `(-m) mod n`.
    fn ciphertext_neg(&self, c: &Ciphertext) -> Result<Ciphertext>;
}

#[cfg(test)]
mod test_encryption {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::keypair::KeyPair;
    use crate::random::RngSource;
    use crate::ErrorKind;

    use num_traits::{One, Zero};

    fn create_test_keypair() -> KeyPair {
        KeyPair::generate_with_size(256, &mut RngSource::seeded(2025)).unwrap()
    }

    /// Randomness source that always fails.
    struct Exhausted;

    impl RandomSource for Exhausted {
        fn random_in_range(&mut self, _: &BigUint, _: &BigUint) -> Result<BigUint> {
            Err(Error::RandomnessSource("exhausted".into()))
        }

        fn random_prime(&mut self, _: usize) -> Result<BigUint> {
            Err(Error::RandomnessSource("exhausted".into()))
        }

        fn fork(&mut self) -> Result<Self> {
            Ok(Exhausted)
        }
    }

    #[test]
    fn roundtrip_under_many_blindings() {
        let keypair = create_test_keypair();
        let mut rng = RngSource::seeded(1);
        let m = BigUint::from(123_456_789u64);

        let ciphertexts: Vec<Ciphertext> =
            (0..8).map(|_| keypair.public_key().encrypt(&m, &mut rng).unwrap()).collect();

        for (i, c) in ciphertexts.iter().enumerate() {
            assert_eq!(keypair.private_key().decrypt(c).unwrap(), m);
            for other in &ciphertexts[i + 1..] {
                assert_ne!(c, other, "blinding must differ between encryptions");
            }
        }
    }

    #[test]
    fn roundtrip_random_plaintexts() {
        let keypair = create_test_keypair();
        let mut rng = RngSource::seeded(2);
        let n = keypair.public_key().n().clone();

        for _ in 0..16 {
            let m = rng.random_in_range(&BigUint::zero(), &n).unwrap();
            let c = keypair.encrypt(&m, &mut rng).unwrap();
            assert_eq!(keypair.decrypt(&c).unwrap(), m);
        }
    }

    #[test]
    fn zero_and_max_plaintext() {
        let keypair = create_test_keypair();
        let mut rng = RngSource::seeded(3);
        let max = keypair.public_key().n() - BigUint::one();

        for m in [BigUint::zero(), max] {
            let c = keypair.encrypt(&m, &mut rng).unwrap();
            assert_eq!(keypair.decrypt(&c).unwrap(), m);
        }
    }

    #[test]
    fn additive_homomorphism() {
        let keypair = create_test_keypair();
        let public = keypair.public_key();
        let mut rng = RngSource::seeded(4);

        let m1 = BigUint::from(50u32);
        let m2 = BigUint::from(25u32);
        let c1 = public.encrypt(&m1, &mut rng).unwrap();
        let c2 = public.encrypt(&m2, &mut rng).unwrap();

        let sum = public.ciphertext_product(&c1, &c2).unwrap();
        assert_eq!(keypair.decrypt(&sum).unwrap(), BigUint::from(75u32));
    }

    #[test]
    fn addition_wraps_modulo_n() {
        let keypair = create_test_keypair();
        let public = keypair.public_key();
        let mut rng = RngSource::seeded(5);

        let m1 = public.n() - BigUint::from(3u32);
        let m2 = BigUint::from(10u32);
        let c1 = public.encrypt(&m1, &mut rng).unwrap();
        let c2 = public.encrypt(&m2, &mut rng).unwrap();

        let sum = public.ciphertext_product(&c1, &c2).unwrap();
        assert_eq!(keypair.decrypt(&sum).unwrap(), BigUint::from(7u32));
    }

    #[test]
    fn scalar_multiplication() {
        let keypair = create_test_keypair();
        let public = keypair.public_key();
        let mut rng = RngSource::seeded(6);

        let m = BigUint::from(1_000u32);
        let c = public.encrypt(&m, &mut rng).unwrap();

        for k in [0u32, 1, 2, 17, 65_535] {
            let scaled = public.ciphertext_pow(&c, &BigUint::from(k)).unwrap();
            assert_eq!(keypair.decrypt(&scaled).unwrap(), &m * k);
        }
    }

    #[test]
    fn ciphertext_valued_exponent() {
        let keypair = create_test_keypair();
        let public = keypair.public_key();
        let mut rng = RngSource::seeded(7);

        let m = BigUint::from(9u32);
        let c = public.encrypt(&m, &mut rng).unwrap();
        let exponent = public.encrypt(&BigUint::from(4u32), &mut rng).unwrap();

        let raised = public.ciphertext_pow(&c, &exponent).unwrap();
        let expected = (&m * exponent.value()) % public.n();
        assert_eq!(keypair.decrypt(&raised).unwrap(), expected);
    }

    #[test]
    fn negation() {
        let keypair = create_test_keypair();
        let public = keypair.public_key();
        let mut rng = RngSource::seeded(8);

        let m = BigUint::from(42u32);
        let c = public.encrypt(&m, &mut rng).unwrap();
        let neg = public.ciphertext_neg(&c).unwrap();
        assert_eq!(keypair.decrypt(&neg).unwrap(), public.n() - &m);

        // m + (-m) = 0
        let zero = public.ciphertext_product(&c, &neg).unwrap();
        assert!(keypair.decrypt(&zero).unwrap().is_zero());
    }

    #[test]
    fn plaintext_equal_to_n_is_rejected() {
        let keypair = create_test_keypair();
        let n = keypair.public_key().n().clone();

        let err = keypair.encrypt(&n, &mut RngSource::seeded(9)).unwrap_err();
        assert_eq!(err, Error::PlaintextOutOfRange);
        assert_eq!(err.kind(), ErrorKind::Domain);
    }

    #[test]
    fn negative_plaintext_is_rejected() {
        let keypair = create_test_keypair();
        let mut rng = RngSource::seeded(10);

        let err = keypair.public_key().encrypt_signed(&BigInt::from(-1), &mut rng).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);

        let c = keypair.public_key().encrypt_signed(&BigInt::from(77), &mut rng).unwrap();
        assert_eq!(keypair.decrypt(&c).unwrap(), BigUint::from(77u32));
    }

    #[test]
    fn out_of_range_ciphertext_is_rejected() {
        let keypair = create_test_keypair();
        let public = keypair.public_key();
        let too_big = Ciphertext::new(public.n_squared().clone());

        assert_eq!(keypair.decrypt(&too_big).unwrap_err(), Error::InvalidCiphertext);
        assert_eq!(
            public.ciphertext_product(&too_big, &too_big).unwrap_err(),
            Error::InvalidCiphertext
        );
        assert_eq!(
            public.ciphertext_pow(&too_big, &BigUint::one()).unwrap_err(),
            Error::InvalidCiphertext
        );
    }

    #[test]
    fn inexact_division_is_rejected() {
        let keypair = create_test_keypair();
        let n = keypair.public_key().n().clone();

        // c^λ ≡ 0 (mod n²) for c = 0 and c = n
        for bad in [BigUint::zero(), n.clone(), &n * 2u32] {
            let err = keypair.decrypt(&Ciphertext::new(bad)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidCiphertext);
        }
    }

    #[test]
    fn exhausted_randomness_is_reported() {
        let keypair = create_test_keypair();
        let err = keypair.encrypt(&BigUint::one(), &mut Exhausted).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RandomnessSource);

        let err = KeyPair::generate_with_size(256, &mut Exhausted).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::RandomnessSource);
    }
}
