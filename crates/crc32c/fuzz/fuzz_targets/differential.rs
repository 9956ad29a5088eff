//! Differential fuzzing of the CRC-32C engines.
//!
//! Cross-checks the software engine against a bitwise oracle, the hardware
//! engine against the software engine, and the chaining/streaming paths
//! against one-shot computation, on arbitrary input.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
  // First byte picks a split point, the rest is checksummed.
  let (ctl, payload) = match data.split_first() {
    Some((ctl, payload)) => (*ctl, payload),
    None => return,
  };
  let split = (ctl as usize) % (payload.len() + 1);

  let oneshot = crc32c::calculate(false, payload, 0).unwrap();
  assert_eq!(oneshot, crc32c_bitwise(payload), "software != bitwise oracle");

  if crc32c::is_hardware_acceleration_available() {
    let hw = crc32c::calculate(true, payload, 0).unwrap();
    assert_eq!(hw, oneshot, "hardware != software, len={}", payload.len());
  }

  // Chaining through the initial-CRC argument.
  let (a, b) = payload.split_at(split);
  let first = crc32c::calculate(false, a, 0).unwrap();
  let chained = crc32c::calculate(false, b, first).unwrap();
  assert_eq!(chained, oneshot, "chaining broke at split {}", split);

  // Streaming hasher with the same split.
  let mut hasher = crc32c::Crc32c::new();
  hasher.update(a);
  hasher.update(b);
  assert_eq!(hasher.finalize(), oneshot, "streaming != oneshot");
});

fn crc32c_bitwise(data: &[u8]) -> u32 {
  let mut crc = 0xffff_ffffu32;
  for &b in data {
    crc ^= b as u32;
    for _ in 0..8 {
      let mask = 0u32.wrapping_sub(crc & 1);
      crc = (crc >> 1) ^ (0x82f6_3b78 & mask);
    }
  }
  crc ^ 0xffff_ffff
}
