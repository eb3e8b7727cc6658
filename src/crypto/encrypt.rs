// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Encrypt;
use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::keypair::PublicKey;
use crate::random::RandomSource;

use num_bigint_dig::BigUint;
use num_traits::One;
use zeroize::Zeroize;

impl Encrypt for PublicKey {
    fn encrypt<R: RandomSource + ?Sized>(&self, m: &BigUint, rng: &mut R) -> Result<Ciphertext> {
        if m >= &self.n {
            return Err(Error::PlaintextOutOfRange);
        }

        // Fresh blinding factor r ∈ [1, n).
        let mut r = rng.random_in_range(&BigUint::one(), &self.n)?;

        // c = g^m · r^n mod n²
        let gm = self.g.modpow(m, &self.n_squared);
        let rn = r.modpow(&self.n, &self.n_squared);
        r.zeroize();

        Ok(Ciphertext::new((gm * rn) % &self.n_squared))
    }
}
