// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Homomorphic;
use crate::ciphertext::Ciphertext;
use crate::error::Result;
use crate::keypair::PublicKey;

use num_bigint_dig::BigUint;
use num_traits::One;

impl Homomorphic for PublicKey {
    fn ciphertext_product(&self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext> {
        self.check_ciphertext(a)?;
        self.check_ciphertext(b)?;

        Ok(Ciphertext::new((a.value() * b.value()) % &self.n_squared))
    }

    fn ciphertext_pow(&self, c: &Ciphertext, k: &BigUint) -> Result<Ciphertext> {
        self.check_ciphertext(c)?;

        Ok(Ciphertext::new(c.value().modpow(k, &self.n_squared)))
    }

    fn ciphertext_neg(&self, c: &Ciphertext) -> Result<Ciphertext> {
        let n_minus_1 = &self.n - BigUint::one();
        self.ciphertext_pow(c, &n_minus_1)
    }
}
