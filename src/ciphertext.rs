// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::ops::Deref;

use num_bigint_dig::BigUint;
use serde::{Deserialize, Serialize};

/// A Paillier ciphertext, an integer in `[0, n²)`.
///
/// Homomorphic operations need the modulus and live on
/// [`PublicKey`](crate::PublicKey); see [`Homomorphic`](crate::Homomorphic).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ciphertext {
    value: BigUint,
}

impl Ciphertext {
    pub fn new(value: BigUint) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.value.to_bytes_be()
    }
}

// Lets a ciphertext stand in wherever an integer exponent is expected.
impl Deref for Ciphertext {
    type Target = BigUint;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<T> From<T> for Ciphertext
where
    T: AsRef<[u8]>,
{
    fn from(data: T) -> Self {
        Self { value: BigUint::from_bytes_be(data.as_ref()) }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn bytes_restore_the_same_value() {
        let val = BigUint::from(0xDEAD_BEEFu64);
        let c = Ciphertext::new(val.clone());

        let restored = Ciphertext::from(c.to_bytes());

        assert_eq!(c, restored);
        assert_eq!(restored.value(), &val);
    }

    #[test]
    fn derefs_to_integer() {
        let c = Ciphertext::new(BigUint::from(12u32));
        assert_eq!(&*c % 5u32, BigUint::from(2u32));
    }

    #[test]
    fn serializes_as_bare_integer() {
        let c = Ciphertext::new(BigUint::from(77u32));
        let json = serde_json::to_string(&c).unwrap();
        let direct = serde_json::to_string(c.value()).unwrap();
        assert_eq!(json, direct);
    }
}
