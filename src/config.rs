// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the Spartan2 project.
// See the LICENSE file in the project root for full license information.
// Source repository: https://github.com/Microsoft/Spartan2

//! Limb layout configuration.
//!
//! A [`LimbConfig`] fixes the width of one limb and the number of limbs in a
//! single-width vector. Every other bound used by the pipeline is derived from
//! these two numbers.
//!
//! # Width limits
//!
//! The pipeline targets constraint systems whose native cell holds
//! [`CELL_BITS`] bits. The product of two limbs must fit one cell, which caps the
//! limb width at `(CELL_BITS - 1) / 2 = 126` bits. The same cap leaves two bits of
//! headroom in the `u128` storage for transient carries.
use crate::errors::LimbError;
use serde::{Deserialize, Serialize};

/// Bit width of one native cell of the target constraint system.
pub const CELL_BITS: u32 = 254;

/// Smallest supported limb width.
pub const MIN_LIMB_WIDTH: u32 = 8;

/// Largest supported limb width.
pub const MAX_LIMB_WIDTH: u32 = (CELL_BITS - 1) / 2;

/// Default limb width.
pub const DEFAULT_LIMB_WIDTH: u32 = 120;

/// Default number of limbs in a single-width vector.
pub const DEFAULT_LIMB_COUNT: usize = 17;

/// Shape of the limb vectors processed by the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LimbConfig {
  /// Bits per limb (`W`)
  pub limb_width: u32,
  /// Limbs per single-width vector (`N`)
  pub limb_count: usize,
}

impl Default for LimbConfig {
  fn default() -> Self {
    Self {
      limb_width: DEFAULT_LIMB_WIDTH,
      limb_count: DEFAULT_LIMB_COUNT,
    }
  }
}

impl LimbConfig {
  /// Creates a validated configuration.
  pub fn new(limb_width: u32, limb_count: usize) -> Result<Self, LimbError> {
    let config = Self {
      limb_width,
      limb_count,
    };
    config.validate()?;
    Ok(config)
  }

  /// Checks that the width and count can be used by the pipeline.
  pub fn validate(&self) -> Result<(), LimbError> {
    if !(MIN_LIMB_WIDTH..=MAX_LIMB_WIDTH).contains(&self.limb_width) {
      return Err(LimbError::InvalidConfig {
        reason: format!(
          "limb width {} outside [{MIN_LIMB_WIDTH}, {MAX_LIMB_WIDTH}]",
          self.limb_width
        ),
      });
    }
    if self.limb_count == 0 {
      return Err(LimbError::InvalidConfig {
        reason: "limb count must be positive".to_string(),
      });
    }
    Ok(())
  }

  /// `2^W`
  #[inline]
  pub fn base(&self) -> u128 {
    1u128 << self.limb_width
  }

  /// `2^W - 1`
  #[inline]
  pub fn mask(&self) -> u128 {
    self.base() - 1
  }

  /// Number of limbs in a double-width vector.
  #[inline]
  pub fn double_count(&self) -> usize {
    2 * self.limb_count
  }

  /// Number of bits a single-width vector can hold.
  #[inline]
  pub fn capacity_bits(&self) -> u64 {
    u64::from(self.limb_width) * self.limb_count as u64
  }

  /// Upper bound on reduction rounds before the reducer gives up.
  ///
  /// The working buffer has `2N + 1` limbs and each limb position is cleared
  /// within a handful of rounds, so eight rounds per position is generous.
  #[inline]
  pub fn max_reduction_rounds(&self) -> usize {
    8 * (self.double_count() + 2)
  }
}
