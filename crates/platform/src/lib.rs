//! CPU feature detection for the crc32c workspace.
//!
//! This crate is the single source of truth for answering one question:
//! can the current machine execute the hardware CRC-32C instructions?
//!
//! # Design
//!
//! - The query is pure and deterministic per host: it issues a CPU
//!   identification instruction (or asks the OS, on aarch64) and inspects a
//!   feature bit. It never fails; targets without a known detection path
//!   report `false` and fall back to the portable engine.
//! - All architecture-specific inspection lives in this crate, behind
//!   [`is_crc32c_supported`]. Ports to a new architecture either add a
//!   detection module here or inherit the `false` stub without touching any
//!   engine code.
//!
//! # Example
//!
//! ```
//! if platform::is_crc32c_supported() {
//!   // safe to select the accelerated engine
//! }
//! ```

#![no_std]

#[cfg(feature = "std")]
extern crate std;

#[cfg(target_arch = "x86_64")]
pub mod x86_64;

#[cfg(target_arch = "aarch64")]
pub mod aarch64;

/// Returns `true` if the CPU exposes the instruction extension required by
/// the hardware CRC-32C engine.
///
/// - **x86_64**: SSE 4.2 (`crc32` instruction), via `CPUID` leaf 1.
/// - **aarch64**: the ARMv8 CRC32 extension, via compile-time target
///   features or OS-assisted runtime detection (`std` only).
/// - **other targets**: always `false`.
///
/// The result is stable for the lifetime of the process: the underlying
/// feature bits never change after boot, so repeated calls return the same
/// value. The query itself is a few machine instructions and keeps no state.
#[inline]
#[must_use]
pub fn is_crc32c_supported() -> bool {
  #[cfg(target_arch = "x86_64")]
  {
    x86_64::has_crc32c()
  }

  #[cfg(target_arch = "aarch64")]
  {
    aarch64::has_crc32c()
  }

  #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
  {
    false
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn query_is_stable() {
    let first = is_crc32c_supported();
    for _ in 0..1000 {
      assert_eq!(is_crc32c_supported(), first);
    }
  }

  #[test]
  #[cfg(all(feature = "std", target_arch = "x86_64"))]
  fn matches_std_detection() {
    assert_eq!(is_crc32c_supported(), std::arch::is_x86_feature_detected!("sse4.2"));
  }

  #[test]
  #[cfg(all(feature = "std", target_arch = "aarch64"))]
  fn matches_std_detection() {
    assert_eq!(is_crc32c_supported(), std::arch::is_aarch64_feature_detected!("crc"));
  }
}
