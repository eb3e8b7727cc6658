// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::BigUint;
use num_traits::One;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::messages::{
    Aggregate, BlindedVector, BobCombination, CrossEncryption, KeyDistribution, PartialSum,
};
use super::transcript::{Entry, Role, Transcript};
use super::{draw_mask, require, transition, validate_vector, Round};
use crate::ciphertext::Ciphertext;
use crate::config::MaskParams;
use crate::error::{Error, Result};
use crate::keypair::PublicKey;
use crate::random::RandomSource;
use crate::{Encrypt, Homomorphic};

#[derive(Zeroize, ZeroizeOnDrop)]
struct AliceSecrets {
    vector: Vec<BigUint>,
    x1: Option<BigUint>,
    y1: Option<BigUint>,
}

/// The party holding the first vector.
///
/// Drives her side of the rounds in order: [`generate_secrets`],
/// [`cross_encrypt`], [`combine`], [`blind_vector`], [`partial_sum`],
/// [`aggregate`].
///
/// [`generate_secrets`]: Alice::generate_secrets
/// [`cross_encrypt`]: Alice::cross_encrypt
/// [`combine`]: Alice::combine
/// [`blind_vector`]: Alice::blind_vector
/// [`partial_sum`]: Alice::partial_sum
/// [`aggregate`]: Alice::aggregate
#[allow(missing_debug_implementations)]
pub struct Alice<R> {
    public_key: PublicKey,
    rng: R,
    secrets: AliceSecrets,
    round: Round,
    enc_x1: Option<Ciphertext>,
    enc_y1: Option<Ciphertext>,
    p0: Option<Ciphertext>,
    enc_y2: Option<Ciphertext>,
    p1: Option<Ciphertext>,
    c: Vec<Ciphertext>,
    d: Vec<Ciphertext>,
    sub_a: Option<Ciphertext>,
    sub_b: Option<Ciphertext>,
    total: Option<Ciphertext>,
}

impl<R: RandomSource> Alice<R> {
    /// Accept the authority's public key and take ownership of the vector.
    ///
    /// Every entry must lie in `[0, n)`.
    pub fn new(keys: &KeyDistribution, vector: Vec<BigUint>, rng: R) -> Result<Self> {
        validate_vector(&keys.public_key, &vector)?;

        Ok(Self {
            public_key: keys.public_key.clone(),
            rng,
            secrets: AliceSecrets { vector, x1: None, y1: None },
            round: Round::KeyDistribution,
            enc_x1: None,
            enc_y1: None,
            p0: None,
            enc_y2: None,
            p1: None,
            c: Vec::new(),
            d: Vec::new(),
            sub_a: None,
            sub_b: None,
            total: None,
        })
    }

    /// Draw the masks `x1, y1`.
    pub fn generate_secrets(&mut self, mask: MaskParams) -> Result<()> {
        let round = Round::LocalSecretGeneration;
        transition(self.round, Round::KeyDistribution, round)?;

        let n = &self.public_key.n;
        self.secrets.x1 = Some(draw_mask(&mut self.rng, mask, n)?);
        self.secrets.y1 = Some(draw_mask(&mut self.rng, mask, n)?);

        self.round = round;
        Ok(())
    }

    /// Encrypt `x1, y1` for Bob.
    pub fn cross_encrypt(&mut self) -> Result<CrossEncryption> {
        let round = Round::CrossEncryption;
        transition(self.round, Round::LocalSecretGeneration, round)?;

        let x1 = require(&self.secrets.x1, round, Round::LocalSecretGeneration)?;
        let y1 = require(&self.secrets.y1, round, Round::LocalSecretGeneration)?;
        let enc_x1 = self.public_key.encrypt(x1, &mut self.rng)?;
        let enc_y1 = self.public_key.encrypt(y1, &mut self.rng)?;

        self.enc_x1 = Some(enc_x1.clone());
        self.enc_y1 = Some(enc_y1.clone());
        self.round = round;
        Ok(CrossEncryption { enc_x1, enc_y1 })
    }

    /// Fold Bob's `p0` into `p1 = Enc(x1·y1) · p0`, which encodes
    /// `x1·y1 + x1·y2 + y1·x2 - r`.
    pub fn combine(&mut self, msg: &BobCombination) -> Result<()> {
        let round = Round::AliceCombination;
        transition(self.round, Round::CrossEncryption, round)?;

        let pk = &self.public_key;
        pk.check_ciphertext(&msg.p0)?;
        pk.check_ciphertext(&msg.enc_y2)?;

        let x1 = require(&self.secrets.x1, round, Round::LocalSecretGeneration)?;
        let y1 = require(&self.secrets.y1, round, Round::LocalSecretGeneration)?;
        let mut x1y1 = (x1 * y1) % &pk.n;
        let enc_x1y1 = pk.encrypt(&x1y1, &mut self.rng);
        x1y1.zeroize();
        let p1 = pk.ciphertext_product(&enc_x1y1?, &msg.p0)?;

        self.p0 = Some(msg.p0.clone());
        self.enc_y2 = Some(msg.enc_y2.clone());
        self.p1 = Some(p1);
        self.round = round;
        Ok(())
    }

    /// Blind each entry as `c_i = Enc(a_i - y1) · Enc(y2)^(n-1)`, an
    /// encryption of `a_i - y1 - y2`.
    pub fn blind_vector(&mut self) -> Result<BlindedVector> {
        let round = Round::VectorBlinding;
        transition(self.round, Round::AliceCombination, round)?;

        let pk = &self.public_key;
        let y1 = require(&self.secrets.y1, round, Round::LocalSecretGeneration)?;
        let enc_y2 = require(&self.enc_y2, round, Round::AliceCombination)?;
        let neg_y2 = pk.ciphertext_neg(enc_y2)?;

        let mut c = Vec::with_capacity(self.secrets.vector.len());
        for a in &self.secrets.vector {
            let mut shifted = (a + &pk.n - y1) % &pk.n;
            let enc = pk.encrypt(&shifted, &mut self.rng);
            shifted.zeroize();
            c.push(pk.ciphertext_product(&enc?, &neg_y2)?);
        }

        self.c = c.clone();
        self.round = round;
        Ok(BlindedVector { entries: c })
    }

    /// `sub_a = Π_i d_i^(a_i) · c_i^(x1) · p1`.
    ///
    /// Per entry this encodes `a_i·b_i - a_i·x2 + y1·x2 - r`.
    pub fn partial_sum(&mut self, theirs: &BlindedVector) -> Result<PartialSum> {
        let round = Round::PartialSumming;
        transition(self.round, Round::VectorBlinding, round)?;

        if theirs.entries.len() != self.secrets.vector.len() {
            return Err(Error::LengthMismatch {
                alice: self.secrets.vector.len(),
                bob: theirs.entries.len(),
            });
        }

        let pk = &self.public_key;
        let x1 = require(&self.secrets.x1, round, Round::LocalSecretGeneration)?;
        let p1 = require(&self.p1, round, Round::AliceCombination)?;

        let mut acc = Ciphertext::new(BigUint::one());
        for ((a, c_i), d_i) in self.secrets.vector.iter().zip(&self.c).zip(&theirs.entries) {
            let cross = pk.ciphertext_pow(d_i, a)?;
            let own = pk.ciphertext_pow(c_i, x1)?;
            acc = pk.ciphertext_product(&acc, &cross)?;
            acc = pk.ciphertext_product(&acc, &own)?;
            acc = pk.ciphertext_product(&acc, p1)?;
        }

        self.d = theirs.entries.clone();
        self.sub_a = Some(acc.clone());
        self.round = round;
        Ok(PartialSum { value: acc })
    }

    /// `total = sub_a · sub_b`, forwarded to the authority.
    pub fn aggregate(&mut self, theirs: &PartialSum) -> Result<Aggregate> {
        let round = Round::Aggregation;
        transition(self.round, Round::PartialSumming, round)?;

        let sub_a = require(&self.sub_a, round, Round::PartialSumming)?;
        let total = self.public_key.ciphertext_product(sub_a, &theirs.value)?;

        self.sub_b = Some(theirs.value.clone());
        self.total = Some(total.clone());
        self.round = round;
        Ok(Aggregate { total })
    }

    /// Last round this party completed.
    pub fn round(&self) -> Round {
        self.round
    }

    pub fn snapshot(&self) -> Transcript {
        let mut t = Transcript::new(Role::Alice);
        t.record("n", Entry::Public(self.public_key.n.clone()));
        t.record("g", Entry::Public(self.public_key.g.clone()));
        t.record("vector", Entry::PrivateVector(self.secrets.vector.clone()));
        t.record_private("x1", &self.secrets.x1);
        t.record_private("y1", &self.secrets.y1);
        t.record_ciphertext("enc_x1", &self.enc_x1);
        t.record_ciphertext("enc_y1", &self.enc_y1);
        t.record_ciphertext("p0", &self.p0);
        t.record_ciphertext("enc_y2", &self.enc_y2);
        t.record_ciphertext("p1", &self.p1);
        if !self.c.is_empty() {
            t.record("c", Entry::Ciphertexts(self.c.clone()));
        }
        if !self.d.is_empty() {
            t.record("d", Entry::Ciphertexts(self.d.clone()));
        }
        t.record_ciphertext("sub_a", &self.sub_a);
        t.record_ciphertext("sub_b", &self.sub_b);
        t.record_ciphertext("total", &self.total);
        t
    }
}
