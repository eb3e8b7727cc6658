// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Paillier Inner Product
//!
//! A Paillier cryptosystem and a two-party secure inner-product protocol
//! built on its additive homomorphism.
//!
//! Alice holds a vector `a`, Bob holds a vector `b` of the same length. A
//! semi-trusted authority generates the Paillier key, distributes the public
//! half, and at the end decrypts `Σ a_i·b_i mod n`. Neither party learns the
//! other's entries and the authority sees only the final sum.
//!
//! Reference: [Paillier (1999), EUROCRYPT](https://link.springer.com/chapter/10.1007/3-540-48910-X_16)
//!
//! ## Security
//!
//! Paillier is semantically secure under the decisional composite
//! residuosity assumption. The private key `(λ, μ)` and every party's masks
//! are zeroized on drop. The authority must not collude with either party.
//!
//! ## Example
//!
//! ```rust,no_run
//! use num_bigint_dig::BigUint;
//! use paillier_ipp::{InnerProduct, ProtocolConfig};
//!
//! let config = ProtocolConfig::builder().key_bits(1024).build()?;
//! let alice: Vec<BigUint> = [3u32, 1, 4, 1, 5].into_iter().map(BigUint::from).collect();
//! let bob: Vec<BigUint> = [2u32, 7, 1, 8, 2].into_iter().map(BigUint::from).collect();
//!
//! let run = InnerProduct::new(config).run(&alice, &bob)?;
//! assert_eq!(run.inner_product, BigUint::from(35u32));
//! # Ok::<(), paillier_ipp::Error>(())
//! ```

mod ciphertext;
mod config;
mod crypto;
mod error;
mod keypair;
pub mod protocol;
mod random;
mod util;

pub use ciphertext::Ciphertext;
pub use config::{MaskParams, MaskSampling, ProtocolConfig, ProtocolConfigBuilder};
pub use crypto::{Decrypt, Encrypt, Homomorphic};
pub use error::{Error, ErrorKind, Result};
pub use keypair::{KeyPair, KeyPairBuilder, PrivateKey, PublicKey};
pub use protocol::{
    Aggregate, Alice, Authority, BlindedVector, Bob, BobCombination, CrossEncryption,
    InnerProduct, KeyDistribution, PartialSum, ProtocolRun, Round, Transcript,
};
pub use random::{RandomSource, RngSource};
