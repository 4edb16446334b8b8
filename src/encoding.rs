// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the Spartan2 project.
// See the LICENSE file in the project root for full license information.
// Source repository: https://github.com/Microsoft/Spartan2

//! Conversion between `num-bigint` integers and limb vectors.

use crate::config::LimbConfig;
use crate::errors::LimbError;
use crate::limbs::{Limb, LimbVector};
use num_bigint::BigUint;
use num_traits::Zero;

/// Slice `value` into `config.limb_count` little-endian limbs of
/// `config.limb_width` bits, zero-padded.
pub fn encode(value: &BigUint, config: &LimbConfig) -> Result<LimbVector, LimbError> {
  config.validate()?;
  let capacity = config.capacity_bits();
  if value.bits() > capacity {
    return Err(LimbError::ValueTooLarge {
      bits: value.bits(),
      capacity,
    });
  }

  let width = config.limb_width as usize;
  let mask = BigUint::from(config.mask());
  let limbs = (0..config.limb_count)
    .map(|i| {
      let part = (value >> (width * i)) & &mask;
      part
        .iter_u64_digits()
        .rev()
        .fold(0 as Limb, |acc, digit| (acc << 64) | Limb::from(digit))
    })
    .collect();
  Ok(LimbVector::new(limbs))
}

/// Inverse of [`encode`]: `Σ limb[i] · 2^(limb_width · i)`.
pub fn decode(value: &LimbVector, limb_width: u32) -> BigUint {
  decode_limbs(value.as_slice(), limb_width)
}

/// Decode any limb slice, e.g. the limbs of a
/// [`DoubleLimbVector`](crate::DoubleLimbVector).
pub fn decode_limbs(limbs: &[Limb], limb_width: u32) -> BigUint {
  limbs
    .iter()
    .rev()
    .fold(BigUint::zero(), |acc, &limb| (acc << limb_width) + BigUint::from(limb))
}
