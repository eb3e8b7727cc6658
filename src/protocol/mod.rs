// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-party secure inner product with a semi-trusted authority.
//!
//! Alice and Bob each hold a private vector. The [`Authority`] holds the
//! Paillier private key and learns only `Σ a_i·b_i mod n`. The run is split
//! into nine strictly ordered [`Round`]s; each role tracks the last round it
//! completed and rejects calls made out of order.
//!
//! [`InnerProduct`] drives a whole run in-process. The role types can also
//! be driven by hand, exchanging the values in [`messages`].

mod alice;
mod authority;
mod bob;
pub mod messages;
pub mod transcript;

use std::fmt;

use num_bigint_dig::BigUint;
use num_traits::One;
use tracing::{debug, info, info_span};

pub use alice::Alice;
pub use authority::Authority;
pub use bob::Bob;
pub use messages::{
    Aggregate, BlindedVector, BobCombination, CrossEncryption, KeyDistribution, PartialSum,
};
pub use transcript::{Entry, Role, Transcript};

use crate::config::{MaskParams, MaskSampling, ProtocolConfig};
use crate::error::{Error, Result};
use crate::keypair::PublicKey;
use crate::random::{RandomSource, RngSource};

/// Protocol step, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Round {
    KeyDistribution,
    LocalSecretGeneration,
    CrossEncryption,
    BobCombination,
    AliceCombination,
    VectorBlinding,
    PartialSumming,
    Aggregation,
    FinalDecryption,
}

impl Round {
    /// One-based position in the run.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Round::KeyDistribution => "key distribution",
            Round::LocalSecretGeneration => "local secret generation",
            Round::CrossEncryption => "cross encryption",
            Round::BobCombination => "bob combination",
            Round::AliceCombination => "alice combination",
            Round::VectorBlinding => "vector blinding",
            Round::PartialSumming => "partial summing",
            Round::Aggregation => "aggregation",
            Round::FinalDecryption => "final decryption",
        };
        f.write_str(name)
    }
}

/// Move from `current` to `attempted`, which is only allowed right after
/// `required`.
pub(crate) fn transition(current: Round, required: Round, attempted: Round) -> Result<()> {
    if current != required {
        return Err(Error::OutOfOrder { attempted, required });
    }
    Ok(())
}

/// A value produced by `required`, needed by `attempted`.
pub(crate) fn require<T>(slot: &Option<T>, attempted: Round, required: Round) -> Result<&T> {
    slot.as_ref().ok_or(Error::OutOfOrder { attempted, required })
}

/// Draw one masking secret in `[1, n)`.
pub(crate) fn draw_mask<R: RandomSource + ?Sized>(
    rng: &mut R,
    mask: MaskParams,
    n: &BigUint,
) -> Result<BigUint> {
    if mask.bits >= n.bits() {
        return Err(Error::InvalidConfig(format!(
            "{}-bit masks do not fit below a {}-bit modulus",
            mask.bits,
            n.bits()
        )));
    }

    match mask.sampling {
        MaskSampling::Prime => rng.random_prime(mask.bits),
        MaskSampling::Uniform => {
            rng.random_in_range(&BigUint::one(), &(BigUint::one() << mask.bits))
        }
    }
}

pub(crate) fn validate_vector(public_key: &PublicKey, vector: &[BigUint]) -> Result<()> {
    if vector.is_empty() {
        return Err(Error::EmptyVector);
    }
    if vector.iter().any(|v| v >= public_key.n()) {
        return Err(Error::PlaintextOutOfRange);
    }
    Ok(())
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct ProtocolRun {
    /// `Σ a_i·b_i mod n`.
    pub inner_product: BigUint,
    pub alice: Transcript,
    pub bob: Transcript,
    pub authority: Transcript,
}

/// In-process driver for the whole protocol.
#[derive(Debug, Clone, Default)]
pub struct InnerProduct {
    config: ProtocolConfig,
}

impl InnerProduct {
    pub fn new(config: ProtocolConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    /// Run the protocol with randomness seeded from the operating system.
    pub fn run(&self, alice: &[BigUint], bob: &[BigUint]) -> Result<ProtocolRun> {
        let mut rng = RngSource::from_entropy()?;
        self.run_with(&mut rng, alice, bob)
    }

    /// Run the protocol drawing all randomness from `rng`.
    ///
    /// The authority generates its key from `rng` directly; Alice and Bob
    /// each get a fork of it.
    pub fn run_with<R: RandomSource + Send>(
        &self,
        rng: &mut R,
        alice: &[BigUint],
        bob: &[BigUint],
    ) -> Result<ProtocolRun> {
        let span =
            info_span!("inner_product", len = alice.len(), key_bits = self.config.key_bits());
        let _enter = span.enter();

        if alice.is_empty() || bob.is_empty() {
            return Err(Error::EmptyVector);
        }
        if alice.len() != bob.len() {
            return Err(Error::LengthMismatch { alice: alice.len(), bob: bob.len() });
        }

        info!(mask_bits = self.config.mask().bits, "starting inner product");

        debug!(round = %Round::KeyDistribution, "entering round");
        let mut authority = Authority::setup(self.config.key_bits(), rng)?;
        let keys = authority.key_distribution();
        let mut alice = Alice::new(&keys, alice.to_vec(), rng.fork()?)?;
        let mut bob = Bob::new(&keys, bob.to_vec(), rng.fork()?)?;

        debug!(round = %Round::LocalSecretGeneration, "entering round");
        let mask = self.config.mask();
        let (a, b) = rayon::join(|| alice.generate_secrets(mask), || bob.generate_secrets(mask));
        a?;
        b?;

        debug!(round = %Round::CrossEncryption, "entering round");
        let cross = alice.cross_encrypt()?;

        debug!(round = %Round::BobCombination, "entering round");
        let reply = bob.combine(&cross)?;

        debug!(round = %Round::AliceCombination, "entering round");
        alice.combine(&reply)?;

        debug!(round = %Round::VectorBlinding, "entering round");
        let (c, d) = rayon::join(|| alice.blind_vector(), || bob.blind_vector());
        let (c, d) = (c?, d?);

        debug!(round = %Round::PartialSumming, "entering round");
        let (sub_a, sub_b) = rayon::join(|| alice.partial_sum(&d), || bob.partial_sum(&c));
        let (sub_a, sub_b) = (sub_a?, sub_b?);

        debug!(round = %Round::Aggregation, "entering round");
        let (from_alice, from_bob) =
            rayon::join(|| alice.aggregate(&sub_b), || bob.aggregate(&sub_a));
        let (from_alice, from_bob) = (from_alice?, from_bob?);

        debug!(round = %Round::FinalDecryption, "entering round");
        let inner_product = authority.finalize(&from_alice, &from_bob)?;

        info!("inner product complete");

        Ok(ProtocolRun {
            inner_product,
            alice: alice.snapshot(),
            bob: bob.snapshot(),
            authority: authority.snapshot(),
        })
    }
}
