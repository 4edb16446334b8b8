//! Reference demonstration: multiply two ~1000-bit numbers modulo a 1024-bit
//! modulus using 17 limbs of 120 bits and check the result against `num-bigint`.
//! Run with: `RUST_LOG=info cargo run --release`

use limbmul::{LimbConfig, LimbError, ModularMultiplier, decode, encode};
use num_bigint::BigUint;
use num_traits::One;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), LimbError> {
  tracing_subscriber::fmt()
    .with_target(false)
    .with_ansi(true)
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let one = BigUint::one();
  let a = (&one << 1000u32) - (&one << 500u32) + (&one << 200u32) - (&one << 100u32) + 12345u32;
  let b = (&one << 900u32) - (&one << 400u32) + (&one << 300u32) - (&one << 50u32) + 67890u32;
  let r = (&one << 1024u32) - (&one << 512u32) + (&one << 256u32) - (&one << 128u32) + 11111u32;

  let config = LimbConfig::default();
  let multiplier = ModularMultiplier::new(config)?;

  let a_limbs = encode(&a, &config)?;
  let b_limbs = encode(&b, &config)?;
  let r_limbs = encode(&r, &config)?;

  let span = tracing::info_span!("multiply_mod_demo", limbs = config.limb_count);
  let _enter = span.enter();

  let start = std::time::Instant::now();
  let result = multiplier.multiply_mod(&a_limbs, &b_limbs, &r_limbs)?;
  let duration = start.elapsed();

  let expected = (&a * &b) % &r;
  let actual = decode(&result, config.limb_width);
  let result_bits = result.bit_len(config.limb_width);
  let max_limb_bits = result
    .as_slice()
    .iter()
    .map(|limb| u128::BITS - limb.leading_zeros())
    .max()
    .unwrap_or(0);

  info!(
    a_bits = a.bits(),
    b_bits = b.bits(),
    r_bits = r.bits(),
    "operands"
  );
  for (name, limbs) in [
    ("a", &a_limbs),
    ("b", &b_limbs),
    ("r", &r_limbs),
    ("result", &result),
  ] {
    let first = &limbs.as_slice()[..3];
    info!(operand = name, first_limbs = ?first, "first few limbs");
  }

  println!("expected: {expected}");
  println!("actual:   {actual}");
  println!(
    "expected bits: {}, actual bits: {}",
    expected.bits(),
    result_bits
  );
  println!("results match: {}", expected == actual);
  println!(
    "maximum limb size: {max_limb_bits} bits (within {}-bit limit: {})",
    config.limb_width,
    max_limb_bits <= config.limb_width
  );
  println!("Time elapsed is: {:?}", duration);
  Ok(())
}
