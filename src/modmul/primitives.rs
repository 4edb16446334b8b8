// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the Spartan2 project.
// See the LICENSE file in the project root for full license information.
// Source repository: https://github.com/Microsoft/Spartan2

//! Single-limb primitives: widening multiply, product split, digit estimate.

use crate::limbs::Limb;

const HALF: u32 = 64;
const HALF_MASK: u128 = (1u128 << HALF) - 1;

/// Computes `a * b`, returning the low and the high 128-bit words of the
/// 256-bit result.
#[inline(always)]
pub(crate) const fn mul_wide(a: u128, b: u128) -> (u128, u128) {
  let (a0, a1) = (a & HALF_MASK, a >> HALF);
  let (b0, b1) = (b & HALF_MASK, b >> HALF);

  let p00 = a0 * b0;
  let p01 = a0 * b1;
  let p10 = a1 * b0;
  let p11 = a1 * b1;

  // at most 3 * (2^64 - 1), no overflow
  let mid = (p00 >> HALF) + (p01 & HALF_MASK) + (p10 & HALF_MASK);
  let lo = (p00 & HALF_MASK) | (mid << HALF);
  let hi = p11 + (p01 >> HALF) + (p10 >> HALF) + (mid >> HALF);
  (lo, hi)
}

/// Multiply two limbs of `width` bits and split the exact product at `width`.
///
/// Returns `(low, high)` with `x * y = low + high * 2^width`; both parts are
/// below `2^width`.
#[inline(always)]
pub(crate) fn split_product(x: Limb, y: Limb, width: u32) -> (Limb, Limb) {
  let (lo, hi) = mul_wide(x, y);
  let low = lo & ((1u128 << width) - 1);
  // product < 2^(2 * width), so `hi` holds fewer than `width` bits
  let high = (lo >> width) | (hi << (Limb::BITS - width));
  (low, high)
}

/// Estimate the quotient digit `floor((hi * 2^width + lo) / divisor)`,
/// saturating at `2^width - 1`.
///
/// `lo` must be below `2^width` and `divisor` in `[1, 2^width]`. Long division
/// one bit at a time keeps the running remainder below `2^(width + 1)`.
pub(crate) fn estimate_digit(hi: Limb, lo: Limb, divisor: Limb, width: u32) -> Limb {
  let digit_max = (1u128 << width) - 1;
  if hi >= divisor {
    return digit_max;
  }

  let mut rem = hi;
  let mut q = 0u128;
  for bit in (0..width).rev() {
    rem = (rem << 1) | ((lo >> bit) & 1);
    if rem >= divisor {
      rem -= divisor;
      q |= 1u128 << bit;
    }
  }
  q
}
