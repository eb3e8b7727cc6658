// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

mod util;

use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::random::RandomSource;
use crate::{Decrypt, Encrypt};

use num_bigint_dig::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use tracing::warn;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Public parameters of the cryptosystem.
///
/// The modulus is `n = pq` and the generator is fixed to `g = n + 1`. The
/// square `n²`, the modulus of the ciphertext space, is cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WirePublicKey", try_from = "WirePublicKey")]
pub struct PublicKey {
    pub(crate) n: BigUint,
    pub(crate) g: BigUint,
    pub(crate) n_squared: BigUint,
    pub(crate) bit_length: usize,
}

impl PublicKey {
    /// Construct a public key from its components.
    ///
    /// `n` must be odd and greater than one, and `g` must equal `n + 1`.
    /// `bit_length` records the size of each prime factor.
    pub fn new(n: BigUint, g: BigUint, bit_length: usize) -> Result<Self> {
        if n <= BigUint::one() || n.is_even() {
            return Err(Error::InvalidPublicKey);
        }
        if g != &n + BigUint::one() {
            return Err(Error::InvalidPublicKey);
        }

        let n_squared = &n * &n;
        Ok(Self { n, g, n_squared, bit_length })
    }

    /// Return the public modulus `n`.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Return the generator `g = n + 1`.
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// Return `n²`.
    pub fn n_squared(&self) -> &BigUint {
        &self.n_squared
    }

    /// Return the bit length of each prime factor of `n`.
    pub fn bit_length(&self) -> usize {
        self.bit_length
    }

    /// Check that `c` lies in the ciphertext space `[0, n²)`.
    pub(crate) fn check_ciphertext(&self, c: &Ciphertext) -> Result<()> {
        if c.value() >= &self.n_squared {
            return Err(Error::InvalidCiphertext);
        }
        Ok(())
    }
}

/// Serialized form of [`PublicKey`]. `n²` is recomputed on the way in.
#[derive(Serialize, Deserialize)]
struct WirePublicKey {
    n: BigUint,
    g: BigUint,
    bit_length: usize,
}

impl From<PublicKey> for WirePublicKey {
    fn from(key: PublicKey) -> Self {
        Self { n: key.n, g: key.g, bit_length: key.bit_length }
    }
}

impl TryFrom<WirePublicKey> for PublicKey {
    type Error = Error;

    fn try_from(wire: WirePublicKey) -> Result<Self> {
        PublicKey::new(wire.n, wire.g, wire.bit_length)
    }
}

/// Secret key material: λ = lcm(p-1, q-1) and μ = λ⁻¹ mod n.
///
/// Sensitive fields are zeroized on drop. The type is deliberately not
/// serializable.
#[allow(missing_debug_implementations)]
#[derive(PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct PrivateKey {
    #[zeroize(skip)]
    pub(crate) public_key: PublicKey,
    pub(crate) lambda: BigUint,
    pub(crate) mu: BigUint,
}

impl PrivateKey {
    /// Construct a private key from its components.
    ///
    /// Validates `(λ·μ) mod n = 1`.
    pub fn new(public_key: PublicKey, mut lambda: BigUint, mut mu: BigUint) -> Result<Self> {
        let inverse = !lambda.is_zero()
            && !mu.is_zero()
            && (&lambda * &mu) % public_key.n() == BigUint::one();
        if !inverse {
            lambda.zeroize();
            mu.zeroize();
            return Err(Error::InvalidPrivateKey);
        }

        Ok(Self { public_key, lambda, mu })
    }

    /// Return a reference to the associated public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}

/// A complete key pair consisting of public and private components.
///
/// Secret material is zeroized when dropped.
#[allow(missing_debug_implementations)]
#[derive(PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct KeyPair {
    #[zeroize(skip)]
    public: PublicKey,
    secret: PrivateKey,
}

impl KeyPair {
    /// Generate a key pair with default parameters (1024-bit primes).
    pub fn generate<R: RandomSource + Send>(rng: &mut R) -> Result<Self> {
        KeyPairBuilder::new().build(rng)
    }

    /// Generate a key pair whose primes have `bit_length` bits each.
    pub fn generate_with_size<R: RandomSource + Send>(
        bit_length: usize,
        rng: &mut R,
    ) -> Result<Self> {
        KeyPairBuilder::new().bit_length(bit_length).build(rng)
    }

    /// Build a key pair from two known primes.
    ///
    /// The primes must be distinct and `gcd(λ, pq)` must be one. Primality is
    /// the caller's responsibility; no size policy is applied.
    pub fn from_primes(p: BigUint, q: BigUint) -> Result<Self> {
        Self::derive(&Zeroizing::new(p), &Zeroizing::new(q))
    }

    /// Derive `(n, g)` and `(λ, μ)` from borrowed factors. The caller owns
    /// the wiping of `p` and `q`.
    fn derive(p: &BigUint, q: &BigUint) -> Result<Self> {
        if p <= &BigUint::one() || q <= &BigUint::one() {
            return Err(Error::KeyGenerationFailed("Primes must exceed one".into()));
        }
        if p == q {
            return Err(Error::KeyGenerationFailed("Primes must be distinct".into()));
        }

        let bit_length = p.bits().max(q.bits());
        let n = p * q;
        let mut lambda = util::carmichael_lambda(p, q);
        let mu = match util::lambda_inverse(&lambda, &n) {
            Ok(mu) => mu,
            Err(err) => {
                lambda.zeroize();
                return Err(err);
            }
        };

        let g = &n + BigUint::one();
        let public = PublicKey::new(n, g, bit_length)?;
        let secret = PrivateKey::new(public.clone(), lambda, mu)?;

        Ok(KeyPair { public, secret })
    }

    /// Return the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Return the private key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.secret
    }
}

impl Encrypt for KeyPair {
    fn encrypt<R: RandomSource + ?Sized>(&self, m: &BigUint, rng: &mut R) -> Result<Ciphertext> {
        self.public.encrypt(m, rng)
    }
}

impl Decrypt for KeyPair {
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<BigUint> {
        self.secret.decrypt(ciphertext)
    }
}

/// Builder for generating key pairs with configurable parameters.
#[derive(Debug)]
pub struct KeyPairBuilder {
    bit_length: usize,
}

impl KeyPairBuilder {
    /// Prime size below which a warning is logged (2048-bit modulus).
    pub const MIN_SECURE_BITS: usize = 1024;

    /// Absolute minimum prime size.
    /// Can be lowered with the `allow-weak-keys` feature flag.
    #[cfg(not(feature = "allow-weak-keys"))]
    pub const ABSOLUTE_MIN_BITS: usize = 256;

    #[cfg(feature = "allow-weak-keys")]
    pub const ABSOLUTE_MIN_BITS: usize = 32;

    /// Create a builder with default parameters.
    pub fn new() -> Self {
        Self { bit_length: Self::MIN_SECURE_BITS }
    }

    /// Set the bit length of each prime factor.
    pub fn bit_length(mut self, bits: usize) -> Self {
        self.bit_length = bits;
        self
    }

    /// Generate the key pair.
    ///
    /// The two primes are searched for in parallel, each from its own fork
    /// of `rng`.
    pub fn build<R: RandomSource + Send>(self, rng: &mut R) -> Result<KeyPair> {
        if self.bit_length < Self::ABSOLUTE_MIN_BITS {
            return Err(Error::InvalidKeySize {
                min: Self::ABSOLUTE_MIN_BITS,
                actual: self.bit_length,
            });
        }

        if self.bit_length < Self::MIN_SECURE_BITS {
            warn!(
                prime_bits = self.bit_length,
                recommended = Self::MIN_SECURE_BITS,
                "generating a cryptographically weak Paillier key"
            );
        }

        let mut p_rng = rng.fork()?;
        let mut q_rng = rng.fork()?;
        let bits = self.bit_length;

        let (p_result, q_result) =
            rayon::join(|| p_rng.random_prime(bits), || q_rng.random_prime(bits));

        // Wrap both before `?` so an error on one side still wipes the other.
        let p = p_result.map(Zeroizing::new);
        let q = q_result.map(Zeroizing::new);
        KeyPair::derive(&*p?, &*q?)
    }
}

impl Default for KeyPairBuilder {
    fn default() -> Self {
        Self::new()
    }
}
