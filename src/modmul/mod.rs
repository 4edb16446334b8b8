// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the Spartan2 project.
// See the LICENSE file in the project root for full license information.
// Source repository: https://github.com/Microsoft/Spartan2

//! Multiply-then-reduce pipeline.
//!
//! ```text
//!   a, b ──► Multiplier ──► p = a·b (2N limbs) ──► Reducer(p, r) ──► a·b mod r (N limbs)
//!                 │                                     │
//!                 └──────────── Normalizer ─────────────┘
//! ```
//!
//! Every limb produced along the way stays below `2^(W + 2)`, so each value
//! fits one native cell of the target constraint system.

mod multiply;
mod normalize;
mod primitives;
mod reduce;

use crate::config::LimbConfig;
use crate::errors::LimbError;
use crate::limbs::{DoubleLimbVector, Limb, LimbVector, check_range, check_shape, cmp_limbs};
use crate::start_span;
use multiply::mul_limbs;
use normalize::Normalizer;
use rayon::prelude::*;
use reduce::reduce_limbs;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::time::Instant;
use tracing::{debug, info, info_span};

/// Quotient and remainder of a modular multiplication:
/// `a · b = quotient · r + remainder` with `remainder < r`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MulModWitness {
  /// `floor(a · b / r)`, `2N` limbs
  pub quotient: DoubleLimbVector,
  /// `a · b mod r`, `N` limbs
  pub remainder: LimbVector,
}

/// Modular multiplication over a fixed limb layout.
///
/// The multiplier is stateless beyond its configuration; every call works on
/// its own buffers, so a single instance can be shared across threads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModularMultiplier {
  config: LimbConfig,
}

impl ModularMultiplier {
  /// Creates a multiplier for the given layout.
  pub fn new(config: LimbConfig) -> Result<Self, LimbError> {
    config.validate()?;
    Ok(Self { config })
  }

  /// The layout this multiplier works with.
  pub fn config(&self) -> &LimbConfig {
    &self.config
  }

  fn check_operand(&self, operand: &'static str, value: &LimbVector) -> Result<(), LimbError> {
    check_shape(operand, value.as_slice(), self.config.limb_count)?;
    check_range(operand, value.as_slice(), self.config.limb_width)
  }

  fn check_modulus(&self, r: &LimbVector) -> Result<(), LimbError> {
    self.check_operand("r", r)?;
    if r.is_zero() {
      return Err(LimbError::ZeroModulus);
    }
    Ok(())
  }

  /// Exact product `a · b` as a double-width vector.
  pub fn multiply(&self, a: &LimbVector, b: &LimbVector) -> Result<DoubleLimbVector, LimbError> {
    self.check_operand("a", a)?;
    self.check_operand("b", b)?;
    let limbs = mul_limbs(a.as_slice(), b.as_slice(), self.config.limb_width)?;
    Ok(DoubleLimbVector::new(limbs))
  }

  /// Reduce a double-width vector modulo `r`.
  pub fn reduce(&self, p: &DoubleLimbVector, r: &LimbVector) -> Result<LimbVector, LimbError> {
    Ok(self.reduce_with_quotient(p, r)?.remainder)
  }

  /// Reduce a double-width vector modulo `r`, keeping the quotient.
  pub fn reduce_with_quotient(
    &self,
    p: &DoubleLimbVector,
    r: &LimbVector,
  ) -> Result<MulModWitness, LimbError> {
    check_shape("p", p.as_slice(), self.config.double_count())?;
    check_range("p", p.as_slice(), self.config.limb_width)?;
    self.check_modulus(r)?;

    let reduction = reduce_limbs(p.as_slice(), r.as_slice(), &self.config)?;
    debug!(
      rounds = reduction.rounds,
      limbs = self.config.limb_count,
      "reduce"
    );
    Ok(MulModWitness {
      quotient: DoubleLimbVector::new(reduction.quotient),
      remainder: LimbVector::new(reduction.remainder),
    })
  }

  /// `(a · b) mod r`.
  pub fn multiply_mod(
    &self,
    a: &LimbVector,
    b: &LimbVector,
    r: &LimbVector,
  ) -> Result<LimbVector, LimbError> {
    Ok(self.multiply_mod_with_quotient(a, b, r)?.remainder)
  }

  /// `(a · b) mod r` together with the quotient `floor(a · b / r)`.
  pub fn multiply_mod_with_quotient(
    &self,
    a: &LimbVector,
    b: &LimbVector,
    r: &LimbVector,
  ) -> Result<MulModWitness, LimbError> {
    // validate everything before any arithmetic
    self.check_operand("a", a)?;
    self.check_operand("b", b)?;
    self.check_modulus(r)?;

    let (_mul_mod_span, mul_mod_t) = start_span!("multiply_mod");
    let p = self.multiply(a, b)?;
    let witness = self.reduce_with_quotient(&p, r)?;
    info!(
      elapsed_us = %mul_mod_t.elapsed().as_micros(),
      width = self.config.limb_width,
      limbs = self.config.limb_count,
      "multiply_mod"
    );
    Ok(witness)
  }

  /// `(a + b) mod r`.
  pub fn add_mod(
    &self,
    a: &LimbVector,
    b: &LimbVector,
    r: &LimbVector,
  ) -> Result<LimbVector, LimbError> {
    self.check_operand("a", a)?;
    self.check_operand("b", b)?;
    self.check_modulus(r)?;

    let normalizer = Normalizer::new(self.config.limb_width);
    let mut sum: Vec<Limb> = vec![0; self.config.double_count()];
    for (i, (&x, &y)) in a.as_slice().iter().zip(b.as_slice()).enumerate() {
      sum[i] += x + y;
      normalizer.carry_at(&mut sum, i)?;
    }
    self.reduce(&DoubleLimbVector::new(sum), r)
  }

  /// `(a_i · b_i) mod r` for every pair, computed in parallel.
  pub fn multiply_mod_batch(
    &self,
    pairs: &[(LimbVector, LimbVector)],
    r: &LimbVector,
  ) -> Result<Vec<LimbVector>, LimbError> {
    self.check_modulus(r)?;
    let (_batch_span, batch_t) = start_span!("multiply_mod_batch", size = pairs.len());
    let out = pairs
      .par_iter()
      .map(|(a, b)| self.multiply_mod(a, b, r))
      .collect::<Result<Vec<_>, _>>()?;
    info!(elapsed_ms = %batch_t.elapsed().as_millis(), size = pairs.len(), "multiply_mod_batch");
    Ok(out)
  }

  /// Check `a · b = quotient · r + remainder` and `remainder < r` using limb
  /// arithmetic only.
  pub fn verify_mul_mod(
    &self,
    a: &LimbVector,
    b: &LimbVector,
    r: &LimbVector,
    witness: &MulModWitness,
  ) -> Result<(), LimbError> {
    let width = self.config.limb_width;
    self.check_operand("a", a)?;
    self.check_operand("b", b)?;
    self.check_modulus(r)?;
    self.check_operand("remainder", &witness.remainder)?;
    check_shape(
      "quotient",
      witness.quotient.as_slice(),
      self.config.double_count(),
    )?;
    check_range("quotient", witness.quotient.as_slice(), width)?;

    if witness.remainder.cmp_value(r) != Ordering::Less {
      return Err(LimbError::UnSat {
        reason: "remainder is not below the modulus".to_string(),
      });
    }

    let left = mul_limbs(a.as_slice(), b.as_slice(), width)?;

    // quotient (2N) * r (N) spans 3N limbs; anything above 2N must vanish
    let mut right = mul_limbs(witness.quotient.as_slice(), r.as_slice(), width)?;
    let normalizer = Normalizer::new(width);
    for (i, &limb) in witness.remainder.as_slice().iter().enumerate() {
      right[i] += limb;
      normalizer.carry_at(&mut right, i)?;
    }
    normalizer.carry_all(&mut right)?;

    if cmp_limbs(&left, &right) != Ordering::Equal {
      return Err(LimbError::UnSat {
        reason: "a * b != quotient * r + remainder".to_string(),
      });
    }
    Ok(())
  }
}

/// `(a · b) mod r` for the given limb width and count.
///
/// This is the single-call entry point; see [`ModularMultiplier`] for the
/// individual pipeline stages.
pub fn multiply_mod(
  a: &LimbVector,
  b: &LimbVector,
  r: &LimbVector,
  limb_width: u32,
  limb_count: usize,
) -> Result<LimbVector, LimbError> {
  ModularMultiplier::new(LimbConfig::new(limb_width, limb_count)?)?.multiply_mod(a, b, r)
}
