// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{util, Decrypt};
use crate::ciphertext::Ciphertext;
use crate::error::Result;
use crate::keypair::PrivateKey;

use num_bigint_dig::BigUint;

impl Decrypt for PrivateKey {
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<BigUint> {
        let public = &self.public_key;
        public.check_ciphertext(ciphertext)?;

        // m = L(c^λ mod n²) · μ mod n
        let u = ciphertext.value().modpow(&self.lambda, public.n_squared());
        let l = util::l_function(&u, public.n())?;

        Ok((l * &self.mu) % public.n())
    }
}
