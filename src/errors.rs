// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the Spartan2 project.
// See the LICENSE file in the project root for full license information.
// Source repository: https://github.com/Microsoft/Spartan2

//! This module defines errors returned by the library.
use thiserror::Error;

/// Errors returned by limbmul
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LimbError {
  /// returned if the limb width or limb count cannot be used
  #[error("InvalidConfig: {reason}")]
  InvalidConfig {
    /// The reason the configuration was rejected
    reason: String,
  },
  /// returned if a supplied vector does not have the configured number of limbs
  #[error("ShapeMismatch: {operand} has {actual} limbs, expected {expected}")]
  ShapeMismatch {
    /// Name of the offending operand
    operand: &'static str,
    /// The configured number of limbs
    expected: usize,
    /// The number of limbs supplied
    actual: usize,
  },
  /// returned if a supplied limb is not below 2^limb_width
  #[error("LimbOutOfRange: {operand}[{index}] does not fit in {width} bits")]
  LimbOutOfRange {
    /// Name of the offending operand
    operand: &'static str,
    /// Position of the offending limb
    index: usize,
    /// The configured limb width
    width: u32,
  },
  /// returned if the modulus decodes to zero
  #[error("ZeroModulus")]
  ZeroModulus,
  /// returned if an integer does not fit in limb_width * limb_count bits
  #[error("ValueTooLarge: {bits} bits exceed capacity of {capacity} bits")]
  ValueTooLarge {
    /// Bit length of the value
    bits: u64,
    /// Number of bits the limb vector can hold
    capacity: u64,
  },
  /// returned if the reduction loop exhausts its round budget
  #[error("NonConvergence: reduction did not settle after {rounds} rounds")]
  NonConvergence {
    /// The number of rounds executed
    rounds: usize,
  },
  /// returned if a carry or borrow escapes the most significant limb
  #[error("CarryOverflow: carry escaped the top limb at position {position}")]
  CarryOverflow {
    /// Position of the limb that could not absorb its carry
    position: usize,
  },
  /// returned if a modular multiplication witness does not satisfy its relation
  #[error("UnSat: {reason}")]
  UnSat {
    /// The reason for the failure
    reason: String,
  },
}
