// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Run parameters for the inner-product protocol.

use crate::keypair::KeyPairBuilder;
use crate::util::prime::MIN_PRIME_BITS;
use crate::{Error, Result};

/// How the parties draw their masking secrets (`x1, y1, x2, y2, r`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaskSampling {
    /// Probable primes of exactly the configured bit length.
    #[default]
    Prime,
    /// Uniform integers in `[1, 2^bits)`.
    Uniform,
}

/// Size and distribution of the masking secrets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskParams {
    pub bits: usize,
    pub sampling: MaskSampling,
}

/// Validated protocol configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolConfig {
    key_bits: usize,
    mask: MaskParams,
}

impl ProtocolConfig {
    pub fn builder() -> ProtocolConfigBuilder {
        ProtocolConfigBuilder::new()
    }

    /// Bit length of each prime factor of the authority's modulus.
    pub fn key_bits(&self) -> usize {
        self.key_bits
    }

    pub fn mask(&self) -> MaskParams {
        self.mask
    }
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        let key_bits = KeyPairBuilder::MIN_SECURE_BITS;
        Self { key_bits, mask: MaskParams { bits: key_bits / 2, sampling: MaskSampling::Prime } }
    }
}

/// Builder for [`ProtocolConfig`].
#[derive(Debug, Clone, Default)]
pub struct ProtocolConfigBuilder {
    key_bits: Option<usize>,
    secret_bits: Option<usize>,
    sampling: MaskSampling,
}

impl ProtocolConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prime bit length `k` for key generation. Defaults to
    /// [`KeyPairBuilder::MIN_SECURE_BITS`].
    pub fn key_bits(mut self, bits: usize) -> Self {
        self.key_bits = Some(bits);
        self
    }

    /// Bit length of each masking secret. Defaults to half of `key_bits`.
    pub fn secret_bits(mut self, bits: usize) -> Self {
        self.secret_bits = Some(bits);
        self
    }

    pub fn mask_sampling(mut self, sampling: MaskSampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Validate and produce the configuration.
    ///
    /// The key size policy itself is enforced by [`KeyPairBuilder`] when the
    /// authority generates its key; here the masks are checked to fit below
    /// the modulus.
    pub fn build(self) -> Result<ProtocolConfig> {
        let key_bits = self.key_bits.unwrap_or(KeyPairBuilder::MIN_SECURE_BITS);
        let secret_bits = self.secret_bits.unwrap_or(key_bits / 2);

        if secret_bits < MIN_PRIME_BITS {
            return Err(Error::InvalidConfig(format!(
                "secret_bits must be at least {MIN_PRIME_BITS}, got {secret_bits}"
            )));
        }
        // n has at least 2k - 1 bits, so k-bit masks always lie below it.
        if secret_bits > key_bits {
            return Err(Error::InvalidConfig(format!(
                "secret_bits ({secret_bits}) must not exceed key_bits ({key_bits})"
            )));
        }

        Ok(ProtocolConfig {
            key_bits,
            mask: MaskParams { bits: secret_bits, sampling: self.sampling },
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::ErrorKind;

    #[test]
    fn defaults_follow_key_size() {
        let config = ProtocolConfig::builder().key_bits(512).build().unwrap();
        assert_eq!(config.key_bits(), 512);
        assert_eq!(config.mask(), MaskParams { bits: 256, sampling: MaskSampling::Prime });
        assert_eq!(ProtocolConfig::default().key_bits(), KeyPairBuilder::MIN_SECURE_BITS);
    }

    #[test]
    fn explicit_secret_size_and_sampling() {
        let config = ProtocolConfig::builder()
            .key_bits(256)
            .secret_bits(64)
            .mask_sampling(MaskSampling::Uniform)
            .build()
            .unwrap();
        assert_eq!(config.mask(), MaskParams { bits: 64, sampling: MaskSampling::Uniform });
    }

    #[test]
    fn rejects_oversized_masks() {
        let err = ProtocolConfig::builder().key_bits(256).secret_bits(300).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
    }

    #[test]
    fn rejects_tiny_masks() {
        let err = ProtocolConfig::builder().key_bits(256).secret_bits(8).build().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
