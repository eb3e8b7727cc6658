// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::protocol::Round;

/// Errors that can occur during cryptographic operations and protocol runs.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Plaintext must lie in [0, n)")]
    PlaintextOutOfRange,

    #[error("Input vector is empty")]
    EmptyVector,

    #[error("Vector length mismatch: alice holds {alice} entries, bob holds {bob}")]
    LengthMismatch { alice: usize, bob: usize },

    #[error("Aggregated totals forwarded by the parties disagree")]
    TotalMismatch,

    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid key size: must be at least {min} bits, got {actual}")]
    InvalidKeySize { min: usize, actual: usize },

    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    #[error("Invalid private key")]
    InvalidPrivateKey,

    #[error("Ciphertext is invalid or corrupted")]
    InvalidCiphertext,

    #[error("Randomness source failure: {0}")]
    RandomnessSource(String),

    #[error("Round {attempted} cannot run before {required} has completed")]
    OutOfOrder { attempted: Round, required: Round },
}

/// Coarse classification of [`Error`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Inputs outside the plaintext domain or parameters that do not match.
    Domain,
    KeyGeneration,
    InvalidCiphertext,
    RandomnessSource,
    /// A role was driven through its rounds in the wrong order.
    Protocol,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::PlaintextOutOfRange
            | Error::EmptyVector
            | Error::LengthMismatch { .. }
            | Error::TotalMismatch
            | Error::InvalidPublicKey
            | Error::InvalidConfig(_) => ErrorKind::Domain,
            Error::InvalidKeySize { .. }
            | Error::KeyGenerationFailed(_)
            | Error::InvalidPrivateKey => ErrorKind::KeyGeneration,
            Error::InvalidCiphertext => ErrorKind::InvalidCiphertext,
            Error::RandomnessSource(_) => ErrorKind::RandomnessSource,
            Error::OutOfOrder { .. } => ErrorKind::Protocol,
        }
    }
}

impl From<rand::Error> for Error {
    fn from(err: rand::Error) -> Self {
        Error::RandomnessSource(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
