// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the Spartan2 project.
// See the LICENSE file in the project root for full license information.
// Source repository: https://github.com/Microsoft/Spartan2

//! Limb vectors.
//!
//! This module provides:
//! - [`LimbVector`]: a single-width integer of `N` limbs
//! - [`DoubleLimbVector`]: a double-width integer of `2N` limbs holding an
//!   unreduced product
//! - Slice helpers (scan, compare, range check) shared by the pipeline
//!
//! Limbs are stored in little-endian order: `limbs[0]` is the least significant.
//! A vector of limbs `l` with width `W` represents `Σ l[i] · 2^(W·i)`.
//!
//! # Why not `num-bigint`?
//!
//! `BigUint` normalizes its digits to 32 or 64 bits and drops leading zeros.
//! The pipeline needs the limb boundaries of the constraint system (e.g. 120-bit
//! limbs) and a fixed length, so we keep explicit vectors and only use
//! `num-bigint` at the encoding boundary.

use crate::errors::LimbError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Storage type of one limb. Values at rest are below `2^W` with `W <= 126`.
pub type Limb = u128;

// ============================================================================
// LimbVector - single-width integer
// ============================================================================

/// Single-width integer: `N` limbs, least significant first.
///
/// The length is fixed when the vector is built. It is checked against the
/// configured limb count at every public entry point.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LimbVector(Vec<Limb>);

impl LimbVector {
  /// Wraps the given limbs (least significant first) without validation.
  pub fn new(limbs: Vec<Limb>) -> Self {
    Self(limbs)
  }

  /// Create a zero value with `len` limbs.
  pub fn zero(len: usize) -> Self {
    Self(vec![0; len])
  }

  /// Number of limbs.
  #[inline]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Returns true if the vector has no limbs at all.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Check if all limbs are zero.
  #[inline]
  pub fn is_zero(&self) -> bool {
    self.0.iter().all(|&x| x == 0)
  }

  /// Limbs, least significant first.
  #[inline]
  pub fn as_slice(&self) -> &[Limb] {
    &self.0
  }

  /// Consumes the vector and returns its limbs.
  pub fn into_limbs(self) -> Vec<Limb> {
    self.0
  }

  /// Number of significant bits when each limb holds `width` bits.
  pub fn bit_len(&self, width: u32) -> u64 {
    bit_len(&self.0, width)
  }

  /// Compares the integer values of two vectors, regardless of their lengths.
  pub fn cmp_value(&self, other: &Self) -> Ordering {
    cmp_limbs(&self.0, &other.0)
  }
}

impl From<Vec<Limb>> for LimbVector {
  fn from(limbs: Vec<Limb>) -> Self {
    Self(limbs)
  }
}

impl AsRef<[Limb]> for LimbVector {
  fn as_ref(&self) -> &[Limb] {
    &self.0
  }
}

// ============================================================================
// DoubleLimbVector - unreduced product
// ============================================================================

/// Double-width integer: `2N` limbs holding a product before reduction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoubleLimbVector(Vec<Limb>);

impl DoubleLimbVector {
  /// Wraps the given limbs (least significant first) without validation.
  pub fn new(limbs: Vec<Limb>) -> Self {
    Self(limbs)
  }

  /// Zero-extends a single-width vector to twice its length.
  pub fn widen(value: &LimbVector) -> Self {
    let mut limbs = value.as_slice().to_vec();
    limbs.resize(2 * value.len(), 0);
    Self(limbs)
  }

  /// Number of limbs.
  #[inline]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Returns true if the vector has no limbs at all.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Check if all limbs are zero.
  #[inline]
  pub fn is_zero(&self) -> bool {
    self.0.iter().all(|&x| x == 0)
  }

  /// Limbs, least significant first.
  #[inline]
  pub fn as_slice(&self) -> &[Limb] {
    &self.0
  }

  /// Consumes the vector and returns its limbs.
  pub fn into_limbs(self) -> Vec<Limb> {
    self.0
  }
}

impl From<Vec<Limb>> for DoubleLimbVector {
  fn from(limbs: Vec<Limb>) -> Self {
    Self(limbs)
  }
}

impl AsRef<[Limb]> for DoubleLimbVector {
  fn as_ref(&self) -> &[Limb] {
    &self.0
  }
}

// ============================================================================
// Slice helpers
// ============================================================================

/// Index of the most significant nonzero limb, scanning from the top.
#[inline]
pub(crate) fn top_nonzero(limbs: &[Limb]) -> Option<usize> {
  limbs.iter().rposition(|&x| x != 0)
}

/// Number of significant bits of a normalized limb slice.
pub(crate) fn bit_len(limbs: &[Limb], width: u32) -> u64 {
  match top_nonzero(limbs) {
    None => 0,
    Some(top) => {
      top as u64 * u64::from(width) + u64::from(Limb::BITS - limbs[top].leading_zeros())
    }
  }
}

/// Compare two normalized limb slices by integer value.
pub(crate) fn cmp_limbs(a: &[Limb], b: &[Limb]) -> Ordering {
  let len = a.len().max(b.len());
  for i in (0..len).rev() {
    let x = a.get(i).copied().unwrap_or(0);
    let y = b.get(i).copied().unwrap_or(0);
    match x.cmp(&y) {
      Ordering::Equal => continue,
      other => return other,
    }
  }
  Ordering::Equal
}

/// Check that a vector has `expected` limbs.
pub(crate) fn check_shape(
  operand: &'static str,
  limbs: &[Limb],
  expected: usize,
) -> Result<(), LimbError> {
  if limbs.len() != expected {
    return Err(LimbError::ShapeMismatch {
      operand,
      expected,
      actual: limbs.len(),
    });
  }
  Ok(())
}

/// Check that every limb is below `2^width`.
pub(crate) fn check_range(
  operand: &'static str,
  limbs: &[Limb],
  width: u32,
) -> Result<(), LimbError> {
  match limbs.iter().position(|&x| x >> width != 0) {
    Some(index) => Err(LimbError::LimbOutOfRange {
      operand,
      index,
      width,
    }),
    None => Ok(()),
  }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_zero() {
    let z = LimbVector::zero(6);
    assert!(z.is_zero());
    assert_eq!(z.len(), 6);
    assert_eq!(top_nonzero(z.as_slice()), None);
    assert_eq!(z.bit_len(120), 0);
  }

  #[test]
  fn test_top_nonzero_scans_from_top() {
    let v = LimbVector::new(vec![5, 0, 7, 0, 0]);
    assert_eq!(top_nonzero(v.as_slice()), Some(2));
  }

  #[test]
  fn test_bit_len() {
    let v = LimbVector::new(vec![0, 1, 0]);
    assert_eq!(v.bit_len(16), 17);
    let v = LimbVector::new(vec![0xff, 0, 0]);
    assert_eq!(v.bit_len(16), 8);
  }

  #[test]
  fn test_cmp_value_ignores_leading_zeros() {
    let a = LimbVector::new(vec![1, 2, 0, 0]);
    let b = LimbVector::new(vec![1, 2]);
    assert_eq!(a.cmp_value(&b), Ordering::Equal);

    let c = LimbVector::new(vec![9, 1]);
    assert_eq!(a.cmp_value(&c), Ordering::Greater);
    assert_eq!(c.cmp_value(&a), Ordering::Less);
  }

  #[test]
  fn test_widen() {
    let v = LimbVector::new(vec![3, 4, 5]);
    let w = DoubleLimbVector::widen(&v);
    assert_eq!(w.len(), 6);
    assert_eq!(w.as_slice(), &[3, 4, 5, 0, 0, 0]);
    assert_eq!(v.cmp_value(&LimbVector::new(w.into_limbs())), Ordering::Equal);
  }

  #[test]
  fn test_check_shape() {
    assert!(check_shape("a", &[0; 4], 4).is_ok());
    assert_eq!(
      check_shape("a", &[0; 3], 4),
      Err(LimbError::ShapeMismatch {
        operand: "a",
        expected: 4,
        actual: 3
      })
    );
  }

  #[test]
  fn test_check_range() {
    assert!(check_range("b", &[0xffff, 0], 16).is_ok());
    assert_eq!(
      check_range("b", &[0, 0x10000], 16),
      Err(LimbError::LimbOutOfRange {
        operand: "b",
        index: 1,
        width: 16
      })
    );
  }
}
