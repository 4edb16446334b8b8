//! This library implements fixed-width, multi-limb modular multiplication.
//! Two integers given as fixed-length vectors of bounded-width limbs are
//! multiplied and reduced modulo a third one, with every intermediate value
//! kept within the native cell width of an arithmetic-circuit constraint system.
#![deny(
  warnings,
  unused,
  future_incompatible,
  nonstandard_style,
  rust_2018_idioms,
  missing_docs
)]
#![forbid(unsafe_code)]

// public modules
pub mod config;
pub mod encoding;
pub mod errors;
pub mod limbs;
pub mod modmul;

/// Start a span + timer, return `(Span, Instant)`.
macro_rules! start_span {
    ($name:expr $(, $($fmt:tt)+)?) => {{
        let span       = info_span!($name $(, $($fmt)+)?);
        let span_clone = span.clone();    // lives as long as the guard
        let _guard      = span_clone.enter();
        (span, Instant::now())
    }};
}
pub(crate) use start_span;

pub use config::LimbConfig;
pub use encoding::{decode, encode};
pub use errors::LimbError;
pub use limbs::{DoubleLimbVector, Limb, LimbVector};
pub use modmul::{ModularMultiplier, MulModWitness, multiply_mod};
