// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::BigUint;
use tracing::debug;

use super::messages::{Aggregate, KeyDistribution};
use super::transcript::{Entry, Role, Transcript};
use crate::ciphertext::Ciphertext;
use crate::crypto::Decrypt;
use crate::error::{Error, Result};
use crate::keypair::{KeyPair, KeyPairBuilder, PublicKey};
use crate::random::RandomSource;

/// Semi-trusted key holder.
///
/// Generates the Paillier key pair, hands out the public half and decrypts
/// only the aggregated total. The private key never leaves this type.
#[allow(missing_debug_implementations)]
pub struct Authority {
    keys: KeyPair,
    total: Option<Ciphertext>,
    result: Option<BigUint>,
}

impl Authority {
    /// Generate a fresh key pair with `key_bits`-bit primes.
    pub fn setup<R: RandomSource + Send>(key_bits: usize, rng: &mut R) -> Result<Self> {
        let keys = KeyPairBuilder::new().bit_length(key_bits).build(rng)?;
        debug!(key_bits, modulus_bits = keys.public_key().n().bits(), "authority key ready");
        Ok(Self::from_keypair(keys))
    }

    pub fn from_keypair(keys: KeyPair) -> Self {
        Self { keys, total: None, result: None }
    }

    pub fn public_key(&self) -> &PublicKey {
        self.keys.public_key()
    }

    pub fn key_distribution(&self) -> KeyDistribution {
        KeyDistribution { public_key: self.keys.public_key().clone() }
    }

    pub fn decrypt(&self, c: &Ciphertext) -> Result<BigUint> {
        self.keys.decrypt(c)
    }

    /// Decrypt the aggregate forwarded by both parties.
    ///
    /// The two forwarded totals must be identical.
    pub fn finalize(&mut self, from_alice: &Aggregate, from_bob: &Aggregate) -> Result<BigUint> {
        if from_alice.total != from_bob.total {
            return Err(Error::TotalMismatch);
        }

        let result = self.decrypt(&from_alice.total)?;
        self.total = Some(from_alice.total.clone());
        self.result = Some(result.clone());
        Ok(result)
    }

    pub fn result(&self) -> Option<&BigUint> {
        self.result.as_ref()
    }

    /// Snapshot of the authority's view. Contains neither `λ` nor `μ`.
    pub fn snapshot(&self) -> Transcript {
        let pk = self.keys.public_key();
        let mut t = Transcript::new(Role::Authority);
        t.record("n", Entry::Public(pk.n().clone()));
        t.record("g", Entry::Public(pk.g().clone()));
        t.record_ciphertext("total", &self.total);
        if let Some(result) = &self.result {
            t.record("result", Entry::Public(result.clone()));
        }
        t
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::random::RngSource;
    use crate::{Encrypt, ErrorKind};

    #[test]
    fn finalize_decrypts_agreed_total() {
        let mut rng = RngSource::seeded(51);
        let mut authority = Authority::setup(256, &mut rng).unwrap();
        let c = authority.public_key().encrypt(&BigUint::from(35u32), &mut rng).unwrap();
        let agg = Aggregate { total: c };

        assert_eq!(authority.finalize(&agg, &agg.clone()).unwrap(), BigUint::from(35u32));
        assert_eq!(authority.result(), Some(&BigUint::from(35u32)));

        let t = authority.snapshot();
        assert_eq!(t.role(), Role::Authority);
        assert_eq!(t.names().collect::<Vec<_>>(), vec!["g", "n", "result", "total"]);
    }

    #[test]
    fn finalize_rejects_disagreeing_totals() {
        let mut rng = RngSource::seeded(52);
        let mut authority = Authority::setup(256, &mut rng).unwrap();
        let pk = authority.public_key().clone();
        let a = Aggregate { total: pk.encrypt(&BigUint::from(1u32), &mut rng).unwrap() };
        let b = Aggregate { total: pk.encrypt(&BigUint::from(1u32), &mut rng).unwrap() };

        let err = authority.finalize(&a, &b).unwrap_err();
        assert_eq!(err, Error::TotalMismatch);
        assert_eq!(err.kind(), ErrorKind::Domain);
        assert!(authority.snapshot().get("total").is_none());
    }

    #[test]
    fn setup_enforces_key_policy() {
        let err = Authority::setup(8, &mut RngSource::seeded(53)).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::KeyGeneration);
    }
}
