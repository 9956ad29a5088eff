//! Property tests for the CRC-32C engines.
//!
//! The oracle is a bit-at-a-time implementation straight from the
//! mathematical definition of a reflected CRC. Everything the crate exposes
//! must agree with it:
//!
//! 1. Software engine == bitwise oracle.
//! 2. Hardware engine == software engine (when the host supports it).
//! 3. Any chunking of input through the streaming hasher == one-shot.
//! 4. Chaining law: `calculate(uh, b, calculate(uh, a, 0))` == one-shot.

#![cfg(test)]

extern crate std;

use proptest::prelude::*;

use crate::{Crc32c, calculate, compute_software, is_hardware_acceleration_available, tables::POLYNOMIAL};

/// Bitwise reflected CRC-32C: obviously correct, intentionally slow.
fn crc32c_bitwise(data: &[u8]) -> u32 {
  let mut crc = 0xFFFF_FFFFu32;
  for &byte in data {
    crc ^= u32::from(byte);
    for _ in 0..8 {
      let mask = 0u32.wrapping_sub(crc & 1);
      crc = (crc >> 1) ^ (POLYNOMIAL & mask);
    }
  }
  crc ^ 0xFFFF_FFFF
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(256))]

  #[test]
  fn software_matches_bitwise_oracle(data in proptest::collection::vec(any::<u8>(), 0..=4096)) {
    prop_assert_eq!(compute_software(0, &data), crc32c_bitwise(&data));
  }

  #[test]
  fn hardware_matches_software(data in proptest::collection::vec(any::<u8>(), 0..=4096)) {
    if is_hardware_acceleration_available() {
      let hw = calculate(true, &data, 0).unwrap();
      let sw = calculate(false, &data, 0).unwrap();
      prop_assert_eq!(hw, sw);
    }
  }

  #[test]
  fn chunking_equivalence(
    data in proptest::collection::vec(any::<u8>(), 0..=2048),
    chunk_sizes in proptest::collection::vec(1usize..=64, 1..=64)
  ) {
    let oneshot = Crc32c::checksum(&data);

    let mut hasher = Crc32c::new();
    let mut rest = data.as_slice();
    let mut i = 0;
    while !rest.is_empty() {
      let take = chunk_sizes[i % chunk_sizes.len()].min(rest.len());
      let (chunk, tail) = rest.split_at(take);
      hasher.update(chunk);
      rest = tail;
      i += 1;
    }

    prop_assert_eq!(hasher.finalize(), oneshot);
  }

  #[test]
  fn chaining_law(
    data in proptest::collection::vec(any::<u8>(), 0..=2048),
    split in any::<proptest::sample::Index>()
  ) {
    let split = split.index(data.len() + 1);
    let (a, b) = data.split_at(split);

    let oneshot = calculate(false, &data, 0).unwrap();
    let first = calculate(false, a, 0).unwrap();
    let chained = calculate(false, b, first).unwrap();
    prop_assert_eq!(chained, oneshot);

    if is_hardware_acceleration_available() {
      let first = calculate(true, a, 0).unwrap();
      let chained = calculate(true, b, first).unwrap();
      prop_assert_eq!(chained, oneshot);
    }
  }

  #[test]
  fn nonzero_initial_chains(
    data in proptest::collection::vec(any::<u8>(), 1..=512),
    initial in any::<u32>()
  ) {
    // A nonzero initial value behaves as if the bytes producing it had been
    // folded in earlier: software and hardware must agree on it.
    let sw = compute_software(initial, &data);
    if is_hardware_acceleration_available() {
      let hw = calculate(true, &data, initial).unwrap();
      prop_assert_eq!(sw, hw);
    }
    // And empty input must leave it untouched.
    prop_assert_eq!(compute_software(initial, b""), initial);
  }
}
