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
struct BobSecrets {
    vector: Vec<BigUint>,
    x2: Option<BigUint>,
    y2: Option<BigUint>,
    r: Option<BigUint>,
}

/// The party holding the second vector.
///
/// Bob skips the cross-encryption and Alice-combination rounds; his
/// combination answers Alice's encrypted masks instead.
#[allow(missing_debug_implementations)]
pub struct Bob<R> {
    public_key: PublicKey,
    rng: R,
    secrets: BobSecrets,
    mask: Option<MaskParams>,
    round: Round,
    enc_x1: Option<Ciphertext>,
    enc_y1: Option<Ciphertext>,
    p0: Option<Ciphertext>,
    p2: Option<Ciphertext>,
    enc_y2: Option<Ciphertext>,
    c: Vec<Ciphertext>,
    d: Vec<Ciphertext>,
    sub_a: Option<Ciphertext>,
    sub_b: Option<Ciphertext>,
    total: Option<Ciphertext>,
}

impl<R: RandomSource> Bob<R> {
    pub fn new(keys: &KeyDistribution, vector: Vec<BigUint>, rng: R) -> Result<Self> {
        validate_vector(&keys.public_key, &vector)?;

        Ok(Self {
            public_key: keys.public_key.clone(),
            rng,
            secrets: BobSecrets { vector, x2: None, y2: None, r: None },
            mask: None,
            round: Round::KeyDistribution,
            enc_x1: None,
            enc_y1: None,
            p0: None,
            p2: None,
            enc_y2: None,
            c: Vec::new(),
            d: Vec::new(),
            sub_a: None,
            sub_b: None,
            total: None,
        })
    }

    /// Draw the masks `x2, y2`. The same parameters are reused for `r`.
    pub fn generate_secrets(&mut self, mask: MaskParams) -> Result<()> {
        let round = Round::LocalSecretGeneration;
        transition(self.round, Round::KeyDistribution, round)?;

        let n = &self.public_key.n;
        self.secrets.x2 = Some(draw_mask(&mut self.rng, mask, n)?);
        self.secrets.y2 = Some(draw_mask(&mut self.rng, mask, n)?);

        self.mask = Some(mask);
        self.round = round;
        Ok(())
    }

    /// Answer Alice's encrypted masks.
    ///
    /// Draws `r` and computes `p0 = Enc(x1)^y2 · Enc(y1)^x2 · Enc(n - r)`
    /// for Alice and keeps `p2 = Enc(x2·y2 + r)` for himself.
    pub fn combine(&mut self, msg: &CrossEncryption) -> Result<BobCombination> {
        let round = Round::BobCombination;
        transition(self.round, Round::LocalSecretGeneration, round)?;

        let pk = &self.public_key;
        pk.check_ciphertext(&msg.enc_x1)?;
        pk.check_ciphertext(&msg.enc_y1)?;

        let mask = *require(&self.mask, round, Round::LocalSecretGeneration)?;
        let x2 = require(&self.secrets.x2, round, Round::LocalSecretGeneration)?;
        let y2 = require(&self.secrets.y2, round, Round::LocalSecretGeneration)?;
        let r = draw_mask(&mut self.rng, mask, &pk.n)?;

        let mut neg_r = (&pk.n - &r) % &pk.n;
        let enc_neg_r = pk.encrypt(&neg_r, &mut self.rng);
        neg_r.zeroize();
        let p0 = pk.ciphertext_product(
            &pk.ciphertext_pow(&msg.enc_x1, y2)?,
            &pk.ciphertext_pow(&msg.enc_y1, x2)?,
        )?;
        let p0 = pk.ciphertext_product(&p0, &enc_neg_r?)?;

        let mut own = (x2 * y2 + &r) % &pk.n;
        let p2 = pk.encrypt(&own, &mut self.rng);
        own.zeroize();
        let p2 = p2?;
        let enc_y2 = pk.encrypt(y2, &mut self.rng)?;

        self.secrets.r = Some(r);
        self.enc_x1 = Some(msg.enc_x1.clone());
        self.enc_y1 = Some(msg.enc_y1.clone());
        self.p0 = Some(p0.clone());
        self.p2 = Some(p2);
        self.enc_y2 = Some(enc_y2.clone());
        self.round = round;
        Ok(BobCombination { p0, enc_y2 })
    }

    /// Blind each entry as `d_i = Enc(b_i - x2) · Enc(x1)^(n-1)`, an
    /// encryption of `b_i - x2 - x1`.
    pub fn blind_vector(&mut self) -> Result<BlindedVector> {
        let round = Round::VectorBlinding;
        transition(self.round, Round::BobCombination, round)?;

        let pk = &self.public_key;
        let x2 = require(&self.secrets.x2, round, Round::LocalSecretGeneration)?;
        let enc_x1 = require(&self.enc_x1, round, Round::BobCombination)?;
        let neg_x1 = pk.ciphertext_neg(enc_x1)?;

        let mut d = Vec::with_capacity(self.secrets.vector.len());
        for b in &self.secrets.vector {
            let mut shifted = (b + &pk.n - x2) % &pk.n;
            let enc = pk.encrypt(&shifted, &mut self.rng);
            shifted.zeroize();
            d.push(pk.ciphertext_product(&enc?, &neg_x1)?);
        }

        self.d = d.clone();
        self.round = round;
        Ok(BlindedVector { entries: d })
    }

    /// `sub_b = Π_i c_i^(x2) · p2`.
    pub fn partial_sum(&mut self, theirs: &BlindedVector) -> Result<PartialSum> {
        let round = Round::PartialSumming;
        transition(self.round, Round::VectorBlinding, round)?;

        if theirs.entries.len() != self.secrets.vector.len() {
            return Err(Error::LengthMismatch {
                alice: theirs.entries.len(),
                bob: self.secrets.vector.len(),
            });
        }

        let pk = &self.public_key;
        let x2 = require(&self.secrets.x2, round, Round::LocalSecretGeneration)?;
        let p2 = require(&self.p2, round, Round::BobCombination)?;

        let mut acc = Ciphertext::new(BigUint::one());
        for c_i in &theirs.entries {
            acc = pk.ciphertext_product(&acc, &pk.ciphertext_pow(c_i, x2)?)?;
            acc = pk.ciphertext_product(&acc, p2)?;
        }

        self.c = theirs.entries.clone();
        self.sub_b = Some(acc.clone());
        self.round = round;
        Ok(PartialSum { value: acc })
    }

    pub fn aggregate(&mut self, theirs: &PartialSum) -> Result<Aggregate> {
        let round = Round::Aggregation;
        transition(self.round, Round::PartialSumming, round)?;

        let sub_b = require(&self.sub_b, round, Round::PartialSumming)?;
        let total = self.public_key.ciphertext_product(&theirs.value, sub_b)?;

        self.sub_a = Some(theirs.value.clone());
        self.total = Some(total.clone());
        self.round = round;
        Ok(Aggregate { total })
    }

    pub fn round(&self) -> Round {
        self.round
    }

    pub fn snapshot(&self) -> Transcript {
        let mut t = Transcript::new(Role::Bob);
        t.record("n", Entry::Public(self.public_key.n.clone()));
        t.record("g", Entry::Public(self.public_key.g.clone()));
        t.record("vector", Entry::PrivateVector(self.secrets.vector.clone()));
        t.record_private("x2", &self.secrets.x2);
        t.record_private("y2", &self.secrets.y2);
        t.record_private("r", &self.secrets.r);
        t.record_ciphertext("enc_x1", &self.enc_x1);
        t.record_ciphertext("enc_y1", &self.enc_y1);
        t.record_ciphertext("p0", &self.p0);
        t.record_ciphertext("p2", &self.p2);
        t.record_ciphertext("enc_y2", &self.enc_y2);
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
