// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the Spartan2 project.
// See the LICENSE file in the project root for full license information.
// Source repository: https://github.com/Microsoft/Spartan2

//! Carry and borrow propagation.
//!
//! After an addition or subtraction a limb may leave `[0, 2^W)`. The
//! [`Normalizer`] moves the excess (or deficit) into the next significant limb,
//! one position at a time. Two buffer flavours are supported:
//!
//! - `u128` buffers, used by the multiplier, only ever overflow upwards
//! - `i128` buffers, used by the reducer, may hold transient negative limbs

use crate::errors::LimbError;

/// Carry/borrow propagation for limbs of a fixed width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Normalizer {
  width: u32,
  mask: u128,
}

impl Normalizer {
  pub(crate) fn new(width: u32) -> Self {
    Self {
      width,
      mask: (1u128 << width) - 1,
    }
  }

  /// Bring `limbs[pos]` below `2^W`, carrying the overflow into `pos + 1`.
  ///
  /// The next limb may in turn exceed the bound; it is settled when it is
  /// next touched or by [`Normalizer::carry_all`].
  #[inline]
  pub(crate) fn carry_at(&self, limbs: &mut [u128], pos: usize) -> Result<(), LimbError> {
    let carry = limbs[pos] >> self.width;
    if carry == 0 {
      return Ok(());
    }
    limbs[pos] &= self.mask;
    match limbs.get_mut(pos + 1) {
      Some(next) => {
        *next += carry;
        Ok(())
      }
      None => Err(LimbError::CarryOverflow { position: pos }),
    }
  }

  /// Settle every limb of an unsigned buffer, least significant first.
  pub(crate) fn carry_all(&self, limbs: &mut [u128]) -> Result<(), LimbError> {
    for pos in 0..limbs.len() {
      self.carry_at(limbs, pos)?;
    }
    Ok(())
  }

  /// Settle every limb of a signed buffer into `[0, 2^W)`, least significant
  /// first, propagating both carries and borrows.
  ///
  /// A nonzero carry or borrow out of the top limb means the buffer holds a
  /// value it cannot represent (negative or too wide).
  pub(crate) fn settle(&self, limbs: &mut [i128]) -> Result<(), LimbError> {
    let last = limbs.len() - 1;
    for pos in 0..limbs.len() {
      // arithmetic shift: floor division by 2^W
      let carry = limbs[pos] >> self.width;
      if carry == 0 {
        continue;
      }
      if pos == last {
        return Err(LimbError::CarryOverflow { position: pos });
      }
      limbs[pos] &= self.mask as i128;
      limbs[pos + 1] += carry;
    }
    Ok(())
  }
}
