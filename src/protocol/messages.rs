// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Values handed from one role to another, one type per hand-off.
//!
//! Every message carries only public parameters or ciphertexts.

use serde::{Deserialize, Serialize};

use crate::ciphertext::Ciphertext;
use crate::keypair::PublicKey;

/// Authority → Alice, Bob: the shared public key `(n, g)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDistribution {
    pub public_key: PublicKey,
}

/// Alice → Bob: `Enc(x1)`, `Enc(y1)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossEncryption {
    pub enc_x1: Ciphertext,
    pub enc_y1: Ciphertext,
}

/// Bob → Alice: the masked cross term `p0` and `Enc(y2)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BobCombination {
    pub p0: Ciphertext,
    pub enc_y2: Ciphertext,
}

/// Either party → the other: one blinded ciphertext per vector entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindedVector {
    pub entries: Vec<Ciphertext>,
}

/// Either party → the other: that party's partial sum.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialSum {
    pub value: Ciphertext,
}

/// Alice, Bob → Authority: the aggregated ciphertext to decrypt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
    pub total: Ciphertext,
}
