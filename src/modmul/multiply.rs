// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the Spartan2 project.
// See the LICENSE file in the project root for full license information.
// Source repository: https://github.com/Microsoft/Spartan2

//! Schoolbook multiplication with carry-as-you-go.
//!
//! Every limb-pair product `x[i] * y[j]` is split at `W` bits. The low part is
//! added into position `i + j` and the high part into `i + j + 1`, and each
//! touched position is normalized immediately. An accumulator therefore never
//! holds more than a limb plus one product half plus a few carries, i.e. it
//! stays below `2^(W + 2)`.

use super::normalize::Normalizer;
use super::primitives::split_product;
use crate::errors::LimbError;
use crate::limbs::Limb;

/// Add `x * y` into `acc` at position `pos`, normalizing as it goes.
#[inline]
fn mul_acc(
  acc: &mut [Limb],
  pos: usize,
  x: Limb,
  y: Limb,
  normalizer: &Normalizer,
  width: u32,
) -> Result<(), LimbError> {
  let (low, high) = split_product(x, y, width);

  acc[pos] += low;
  normalizer.carry_at(acc, pos)?;

  acc[pos + 1] += high;
  normalizer.carry_at(acc, pos + 1)
}

/// Multiply two limb slices into a fresh buffer of `x.len() + y.len()` limbs.
///
/// The result is exact and fully normalized. Zero limbs of either operand
/// contribute nothing and are skipped.
pub(crate) fn mul_limbs(x: &[Limb], y: &[Limb], width: u32) -> Result<Vec<Limb>, LimbError> {
  let normalizer = Normalizer::new(width);
  let mut acc = vec![0; x.len() + y.len()];
  for (i, &xi) in x.iter().enumerate() {
    if xi == 0 {
      continue;
    }
    for (j, &yj) in y.iter().enumerate() {
      if yj == 0 {
        continue;
      }
      mul_acc(&mut acc, i + j, xi, yj, &normalizer, width)?;
    }
  }
  normalizer.carry_all(&mut acc)?;
  Ok(acc)
}
