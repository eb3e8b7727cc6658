// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::BigUint;
use num_integer::Integer;
use num_traits::{CheckedSub, One, Zero};

use crate::{Error, Result};

/// L(x) = (x - 1) / n
///
/// For a well-formed ciphertext `x = c^λ mod n²` satisfies `x ≡ 1 (mod n)`,
/// so the division is exact. Anything else (including `x = 0`) means the
/// ciphertext was not produced under this key and yields
/// [`Error::InvalidCiphertext`].
#[inline]
pub fn l_function(x: &BigUint, n: &BigUint) -> Result<BigUint> {
    debug_assert!(!n.is_zero(), "n must be nonzero in L function");

    let shifted = x.checked_sub(&BigUint::one()).ok_or(Error::InvalidCiphertext)?;
    let (quotient, remainder) = shifted.div_rem(n);
    if !remainder.is_zero() {
        return Err(Error::InvalidCiphertext);
    }

    Ok(quotient)
}
