// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the Spartan2 project.
// See the LICENSE file in the project root for full license information.
// Source repository: https://github.com/Microsoft/Spartan2

//! Modulus reduction of a double-width product.
//!
//! # How It Works
//!
//! The reduction is long division driven by the most significant limb:
//!
//! 1. Shift the modulus left by `d < W` bits so its top limb `r'[m]` has its
//!    high bit set, and shift the product by the same amount:
//!    ```text
//!    (p · 2^d) mod (r · 2^d) = (p mod r) · 2^d
//!    ```
//! 2. While the working value has a nonzero limb at or above `m`, take its top
//!    limb `h`, estimate a quotient digit from the top two limbs
//!    ```text
//!    q̂ = min(floor((w[h] · 2^W + w[h-1]) / (r'[m] + 1)), 2^W - 1)
//!    ```
//!    and subtract `q̂ · r' · 2^(W·(h-1-m))`. Dividing by `r'[m] + 1` means the
//!    digit never overshoots, so the working value never goes negative; the
//!    normalized modulus keeps the undershoot to a few units.
//! 3. After every subtraction the signed working buffer is re-normalized with
//!    borrow propagation before the top limb is inspected again.
//! 4. Shift the residue right by `d` bits.
//!
//! Each limb position is cleared within a few rounds, and the loop is capped
//! by [`LimbConfig::max_reduction_rounds`](crate::LimbConfig::max_reduction_rounds).

use super::normalize::Normalizer;
use super::primitives::{estimate_digit, split_product};
use crate::config::LimbConfig;
use crate::errors::LimbError;
use crate::limbs::{Limb, cmp_limbs, top_nonzero};
use std::cmp::Ordering;
use tracing::debug;

/// Outcome of reducing `p` by `r`: `p = quotient · r + remainder`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Reduction {
  /// `floor(p / r)`, same length as `p`
  pub(crate) quotient: Vec<Limb>,
  /// `p mod r`, same length as `r`
  pub(crate) remainder: Vec<Limb>,
  /// Number of subtraction rounds executed
  pub(crate) rounds: usize,
}

/// Shift `limbs` left by `bits < width` bits into a buffer of `out_len` limbs.
///
/// The caller guarantees that the shifted value fits.
fn shl_bits(limbs: &[Limb], bits: u32, width: u32, out_len: usize) -> Vec<Limb> {
  let mut out = vec![0; out_len];
  if bits == 0 {
    out[..limbs.len()].copy_from_slice(limbs);
    return out;
  }
  let mask = (1u128 << width) - 1;
  let mut spill = 0;
  for (i, &l) in limbs.iter().enumerate() {
    out[i] = ((l << bits) & mask) | spill;
    spill = l >> (width - bits);
  }
  if spill != 0 {
    out[limbs.len()] = spill;
  }
  out
}

/// Shift `limbs` right by `bits < width` bits, keeping the length.
fn shr_bits(limbs: &[Limb], bits: u32, width: u32) -> Vec<Limb> {
  if bits == 0 {
    return limbs.to_vec();
  }
  let mask = (1u128 << width) - 1;
  (0..limbs.len())
    .map(|i| {
      let next = limbs.get(i + 1).copied().unwrap_or(0);
      (limbs[i] >> bits) | ((next << (width - bits)) & mask)
    })
    .collect()
}

/// Reduce the normalized limbs `p` modulo the normalized, nonzero `r`.
///
/// Both inputs must already be range-checked against `config.limb_width`.
pub(crate) fn reduce_limbs(
  p: &[Limb],
  r: &[Limb],
  config: &LimbConfig,
) -> Result<Reduction, LimbError> {
  reduce_limbs_capped(p, r, config, config.max_reduction_rounds())
}

/// [`reduce_limbs`] with an explicit cap on subtraction rounds.
fn reduce_limbs_capped(
  p: &[Limb],
  r: &[Limb],
  config: &LimbConfig,
  max_rounds: usize,
) -> Result<Reduction, LimbError> {
  let width = config.limb_width;
  let normalizer = Normalizer::new(width);

  let m = top_nonzero(r).ok_or(LimbError::ZeroModulus)?;
  let shift_bits = r[m].leading_zeros() - (Limb::BITS - width);

  let r_norm = shl_bits(r, shift_bits, width, r.len());
  let divisor = r_norm[m] + 1;

  let mut work: Vec<i128> = shl_bits(p, shift_bits, width, p.len() + 1)
    .into_iter()
    .map(|l| l as i128)
    .collect();
  let mut quotient: Vec<Limb> = vec![0; p.len()];

  let mut rounds = 0;
  loop {
    let h = match work.iter().rposition(|&l| l != 0) {
      Some(h) if h >= m => h,
      _ => break,
    };

    let (shift, digit) = if h == m {
      let head: Vec<Limb> = work[..=m].iter().map(|&l| l as Limb).collect();
      if cmp_limbs(&head, &r_norm[..=m]) == Ordering::Less {
        break;
      }
      (0, 1)
    } else {
      let digit = estimate_digit(work[h] as Limb, work[h - 1] as Limb, divisor, width);
      (h - 1 - m, digit)
    };

    if rounds == max_rounds {
      return Err(LimbError::NonConvergence { rounds });
    }
    rounds += 1;
    debug!(round = rounds, top = h, shift = shift, digit = %digit, "reduction_round");

    for (j, &rj) in r_norm[..=m].iter().enumerate() {
      if rj == 0 {
        continue;
      }
      let (low, high) = split_product(digit, rj, width);
      work[shift + j] -= low as i128;
      work[shift + j + 1] -= high as i128;
    }
    normalizer.settle(&mut work)?;

    quotient[shift] += digit;
    normalizer.carry_at(&mut quotient, shift)?;
  }
  normalizer.carry_all(&mut quotient)?;

  let residue: Vec<Limb> = work[..r.len()].iter().map(|&l| l as Limb).collect();
  Ok(Reduction {
    quotient,
    remainder: shr_bits(&residue, shift_bits, width),
    rounds,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::encoding::decode_limbs;
  use num_bigint::BigUint;
  use num_traits::One;
  use rand::rngs::StdRng;
  use rand::{Rng, SeedableRng};

  fn limbs_of(value: &BigUint, width: u32, len: usize) -> Vec<Limb> {
    let mask = BigUint::from((1u128 << width) - 1);
    (0..len)
      .map(|i| {
        let part = (value >> (width as usize * i)) & &mask;
        part.iter_u64_digits().rev().fold(0u128, |acc, d| (acc << 64) | u128::from(d))
      })
      .collect()
  }

  fn check(p: &BigUint, r: &BigUint, config: &LimbConfig) -> Reduction {
    let width = config.limb_width;
    let p_limbs = limbs_of(p, width, config.double_count());
    let r_limbs = limbs_of(r, width, config.limb_count);
    let red = reduce_limbs(&p_limbs, &r_limbs, config).unwrap();
    assert_eq!(decode_limbs(&red.remainder, width), p % r);
    assert_eq!(decode_limbs(&red.quotient, width), p / r);
    assert!(red.remainder.iter().all(|&l| l >> width == 0));
    assert!(red.quotient.iter().all(|&l| l >> width == 0));
    assert!(red.rounds <= config.max_reduction_rounds());
    red
  }

  #[test]
  fn test_shl_shr_bits() {
    let limbs = vec![0xf0u128, 0x0f, 0];
    let shifted = shl_bits(&limbs, 4, 8, 3);
    assert_eq!(shifted, vec![0x00, 0xff, 0x00]);
    assert_eq!(shr_bits(&shifted, 4, 8), limbs);

    let spilled = shl_bits(&[0xff], 3, 8, 2);
    assert_eq!(spilled, vec![0xf8, 0x07]);
  }

  #[test]
  fn test_value_below_modulus_is_unchanged() {
    let config = LimbConfig::new(16, 4).unwrap();
    let r = BigUint::from(0x1234_5678_9abcu64);
    let p = BigUint::from(0x1234_5678_9abbu64);
    let red = check(&p, &r, &config);
    assert_eq!(red.rounds, 0);
  }

  #[test]
  fn test_equal_to_modulus() {
    let config = LimbConfig::new(16, 4).unwrap();
    let r = BigUint::from(0xdead_beefu64);
    let red = check(&r, &r, &config);
    assert!(red.remainder.iter().all(|&l| l == 0));
  }

  #[test]
  fn test_zero_modulus() {
    let config = LimbConfig::new(16, 2).unwrap();
    assert_eq!(
      reduce_limbs(&[1, 2, 3, 4], &[0, 0], &config),
      Err(LimbError::ZeroModulus)
    );
  }

  #[test]
  fn test_round_cap_exceeded() {
    let config = LimbConfig::new(16, 2).unwrap();
    let max = (1u128 << 16) - 1;
    let p = limbs_of(&(BigUint::from(max) * BigUint::from(max)), 16, 4);
    assert_eq!(
      reduce_limbs_capped(&p, &[3, 0], &config, 1),
      Err(LimbError::NonConvergence { rounds: 1 })
    );
    // same input converges under the configured cap
    let red = reduce_limbs(&p, &[3, 0], &config).unwrap();
    assert!(red.rounds > 1);
    assert!(red.remainder.iter().all(|&l| l == 0));
  }

  #[test]
  fn test_modulus_one() {
    let config = LimbConfig::new(32, 3).unwrap();
    let p = (BigUint::one() << 190u32) - 7u32;
    check(&p, &BigUint::one(), &config);
  }

  #[test]
  fn test_single_limb_modulus() {
    let config = LimbConfig::new(120, 17).unwrap();
    let p = (BigUint::one() << 4079u32) + 12345u32;
    check(&p, &BigUint::from(3u32), &config);
    check(&p, &(BigUint::one() << 119u32), &config);
    check(&p, &((BigUint::one() << 120u32) - 1u32), &config);
  }

  #[test]
  fn test_leading_zero_limbs_in_modulus() {
    let config = LimbConfig::new(120, 17).unwrap();
    let p = (BigUint::one() << 4000u32) - (BigUint::one() << 999u32) + 1u32;
    // four significant limbs, thirteen zero limbs on top
    let r = (BigUint::one() << 400u32) + (BigUint::one() << 130u32) + 17u32;
    check(&p, &r, &config);
  }

  #[test]
  fn test_modulus_with_zero_inner_limbs() {
    let config = LimbConfig::new(64, 6).unwrap();
    let p = (BigUint::one() << 760u32) - 1u32;
    let r = (BigUint::one() << 320u32) + 1u32;
    check(&p, &r, &config);
  }

  #[test]
  fn test_modulus_close_to_capacity() {
    let config = LimbConfig::new(120, 17).unwrap();
    let cap = BigUint::one() << config.capacity_bits();
    let r = &cap - 1u32;
    let p = (&r - 2u32) * (&r - 5u32);
    check(&p, &r, &config);
  }

  #[test]
  fn test_max_product_converges() {
    for &(width, count) in &[(8u32, 1usize), (8, 5), (126, 3), (120, 17)] {
      let config = LimbConfig::new(width, count).unwrap();
      let cap = BigUint::one() << config.capacity_bits();
      let max = &cap - 1u32;
      let p = &max * &max;
      check(&p, &max, &config);
      check(&p, &BigUint::one(), &config);
      check(&p, &((BigUint::one() << (width - 1)) + 1u32), &config);
    }
  }

  #[test]
  fn test_random_shapes() {
    let mut rng = StdRng::seed_from_u64(31);
    let config = LimbConfig::new(24, 6).unwrap();
    let bits = config.capacity_bits();
    for _ in 0..200 {
      let p_bits = rng.gen_range(1..=2 * bits);
      let r_bits = rng.gen_range(1..=bits);
      let p = BigUint::from(rng.r#gen::<u128>()) << p_bits.saturating_sub(128) as usize;
      let p = p % (BigUint::one() << p_bits);
      let r = (BigUint::from(rng.r#gen::<u128>()) << r_bits.saturating_sub(128) as usize)
        % (BigUint::one() << r_bits);
      if r == BigUint::from(0u32) {
        continue;
      }
      check(&p, &r, &config);
    }
  }
}
