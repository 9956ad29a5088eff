//! CRC-32C (Castagnoli) with hardware acceleration and a portable
//! slicing-by-8 fallback.
//!
//! Two engines compute the same function:
//!
//! - **Hardware**: the dedicated CRC instructions (SSE 4.2 `crc32` on
//!   x86_64, the CRC32 extension on aarch64), folding 8/4/2/1-byte chunks.
//! - **Software**: table-driven slicing-by-8, processing 8 bytes per
//!   iteration from an 8-byte-aligned cursor.
//!
//! Which engine runs is the caller's choice: query
//! [`is_hardware_acceleration_available`], then pass the flag to
//! [`calculate`]. Requesting the hardware path on a CPU without the
//! instructions is a typed error, never undefined behavior. The streaming
//! [`Crc32c`] hasher instead auto-selects the fastest safe engine.
//!
//! # Usage
//!
//! ```
//! // Explicit path selection (the software path is always available).
//! let crc = crc32c::calculate(false, b"123456789", 0).unwrap();
//! assert_eq!(crc, 0xE3069283);
//!
//! // Chaining across segments: feed the previous result back in.
//! let first = crc32c::calculate(false, b"1234", 0).unwrap();
//! let chained = crc32c::calculate(false, b"56789", first).unwrap();
//! assert_eq!(chained, crc);
//!
//! // Streaming with automatic engine selection.
//! let mut hasher = crc32c::Crc32c::new();
//! hasher.update(b"1234");
//! hasher.update(b"56789");
//! assert_eq!(hasher.finalize(), crc);
//! ```
//!
//! # Text input
//!
//! Checksumming text means checksumming its encoded bytes: pass
//! `s.as_bytes()`. The result depends on the encoding (UTF-8 for Rust
//! strings), which callers exchanging checksums across systems must agree
//! on.
//!
//! # Byte order
//!
//! Both engines consume input in little-endian word order regardless of
//! host endianness, so checksums are portable across architectures.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod error;
mod portable;
mod tables;

#[cfg(target_arch = "aarch64")]
mod aarch64;

#[cfg(target_arch = "x86_64")]
mod x86_64;

#[cfg(test)]
mod proptests;

pub use error::UnsupportedHardwareError;

/// Returns `true` if the CPU exposes the accelerated CRC-32C instructions.
///
/// Stable for the lifetime of the process. Consult this before passing
/// `use_hardware = true` to [`calculate`] or forcing [`Engine::Hardware`].
#[inline]
#[must_use]
pub fn is_hardware_acceleration_available() -> bool {
  platform::is_crc32c_supported()
}

/// The computation path a checksum runs on.
///
/// Obtained from [`Engine::preferred`] (query-then-select) or
/// [`Engine::forced`] (caller-chosen, validated). The hardware variant is
/// only ever *selected* after a successful feature query; there is no API
/// that executes unverified hardware instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Engine {
  /// Table-driven slicing-by-8. Always available.
  Portable,
  /// Dedicated CRC instructions. Requires CPU support.
  Hardware,
}

impl Engine {
  /// Select the fastest engine the current CPU supports.
  #[inline]
  #[must_use]
  pub fn preferred() -> Self {
    if is_hardware_acceleration_available() {
      Self::Hardware
    } else {
      Self::Portable
    }
  }

  /// Select an engine explicitly.
  ///
  /// `use_hardware = false` always succeeds. `use_hardware = true` is
  /// validated against the feature query and fails with
  /// [`UnsupportedHardwareError`] when the CPU lacks the instructions.
  #[inline]
  pub fn forced(use_hardware: bool) -> Result<Self, UnsupportedHardwareError> {
    if !use_hardware {
      return Ok(Self::Portable);
    }
    if is_hardware_acceleration_available() {
      Ok(Self::Hardware)
    } else {
      Err(UnsupportedHardwareError::new())
    }
  }

  /// Short name for diagnostics and benchmark labels.
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Portable => "portable/slicing-by-8",
      Self::Hardware => "hardware/crc32",
    }
  }

  /// Returns `true` for the hardware engine.
  #[inline]
  #[must_use]
  pub const fn is_accelerated(self) -> bool {
    matches!(self, Self::Hardware)
  }
}

/// Initial register value and final XOR mask (all ones), per the standard
/// CRC-32C complement convention.
const CRC_MASK: u32 = 0xFFFF_FFFF;

/// Compute CRC-32C over `data` with the software engine.
///
/// `initial` is a previously returned checksum (0 for a fresh computation);
/// feeding segment results back in chains exactly:
/// `compute_software(compute_software(0, a), b) ==
/// compute_software(0, ab)`. Empty input returns `initial` unchanged.
#[inline]
#[must_use]
pub fn compute_software(initial: u32, data: &[u8]) -> u32 {
  portable::compute(initial ^ CRC_MASK, data) ^ CRC_MASK
}

/// Compute CRC-32C over `data` with the hardware engine.
///
/// Verifies instruction support first and fails with
/// [`UnsupportedHardwareError`] when absent, so the accelerated path is
/// never executed blindly. Identical results to [`compute_software`] for
/// all inputs.
#[inline]
pub fn compute_hardware(initial: u32, data: &[u8]) -> Result<u32, UnsupportedHardwareError> {
  Engine::forced(true)?;
  Ok(hardware_kernel(initial ^ CRC_MASK, data) ^ CRC_MASK)
}

/// Compute CRC-32C over `data` on the engine selected by `use_hardware`.
///
/// The single dispatch boundary: routes purely on the flag, with no other
/// branching and no retries. The only failure is requesting the hardware
/// path on a CPU without the instructions. `initial` chains segments: pass
/// 0 for a fresh computation, or a previous result to continue it.
///
/// ```
/// assert_eq!(crc32c::calculate(false, b"123456789", 0), Ok(0xE3069283));
/// ```
#[inline]
pub fn calculate(use_hardware: bool, data: &[u8], initial: u32) -> Result<u32, UnsupportedHardwareError> {
  match Engine::forced(use_hardware)? {
    Engine::Portable => Ok(compute_software(initial, data)),
    Engine::Hardware => Ok(hardware_kernel(initial ^ CRC_MASK, data) ^ CRC_MASK),
  }
}

/// Run the hardware kernel over raw register state.
///
/// Reached only through [`Engine::forced`] / [`Engine::preferred`], i.e.
/// after the feature query succeeded.
#[inline]
fn hardware_kernel(crc: u32, data: &[u8]) -> u32 {
  #[cfg(target_arch = "x86_64")]
  {
    x86_64::compute_runtime(crc, data)
  }

  #[cfg(all(target_arch = "aarch64", target_feature = "crc"))]
  {
    aarch64::compute_enabled(crc, data)
  }

  #[cfg(all(target_arch = "aarch64", not(target_feature = "crc"), feature = "std"))]
  {
    aarch64::compute_runtime(crc, data)
  }

  #[cfg(not(any(
    target_arch = "x86_64",
    all(target_arch = "aarch64", target_feature = "crc"),
    all(target_arch = "aarch64", not(target_feature = "crc"), feature = "std"),
  )))]
  {
    // The feature query reports `false` on every target that reaches this
    // arm, so no Hardware engine can have been selected.
    let _ = (crc, data);
    unreachable!("hardware engine selected on a target without one")
  }
}

/// Streaming CRC-32C hasher with automatic engine selection.
///
/// For one-shot data use [`Crc32c::checksum`] or [`calculate`]; the hasher
/// is for incremental input. It picks the fastest safe engine per `update`
/// call (compile-time target features first, then cached runtime detection,
/// then the portable engine).
///
/// # Thread safety
///
/// `Crc32c` is `Send` and `Sync`; it holds only the 32-bit accumulator.
/// The lookup tables are immutable statics shared by all instances.
#[derive(Clone, Debug)]
pub struct Crc32c {
  /// Raw register state (complement applied on finalize).
  state: u32,
  /// State to restore on reset.
  initial: u32,
}

impl Crc32c {
  /// Create a hasher with the default initial value.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self {
      state: CRC_MASK,
      initial: CRC_MASK,
    }
  }

  /// Create a hasher that resumes from a previously returned checksum.
  ///
  /// ```
  /// use crc32c::Crc32c;
  ///
  /// let data = b"hello world";
  /// let (first, second) = data.split_at(6);
  ///
  /// let mut hasher = Crc32c::resume(Crc32c::checksum(first));
  /// hasher.update(second);
  /// assert_eq!(hasher.finalize(), Crc32c::checksum(data));
  /// ```
  #[inline]
  #[must_use]
  pub const fn resume(crc: u32) -> Self {
    Self {
      state: crc ^ CRC_MASK,
      initial: crc ^ CRC_MASK,
    }
  }

  /// Compute the CRC-32C of `data` in one shot.
  ///
  /// ```
  /// assert_eq!(crc32c::Crc32c::checksum(b"123456789"), 0xE3069283);
  /// ```
  #[inline]
  #[must_use]
  pub fn checksum(data: &[u8]) -> u32 {
    dispatch(CRC_MASK, data) ^ CRC_MASK
  }

  /// Fold more data into the hasher.
  #[inline]
  pub fn update(&mut self, data: &[u8]) {
    self.state = dispatch(self.state, data);
  }

  /// Return the checksum of everything folded in so far.
  ///
  /// Does not consume the hasher; further updates continue the stream.
  #[inline]
  #[must_use]
  pub const fn finalize(&self) -> u32 {
    self.state ^ CRC_MASK
  }

  /// Restore the hasher to the state it was created with.
  #[inline]
  pub fn reset(&mut self) {
    self.state = self.initial;
  }

  /// The engine [`update`](Self::update) runs on for this build and host.
  #[inline]
  #[must_use]
  pub fn engine() -> Engine {
    Engine::preferred()
  }
}

impl Default for Crc32c {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(feature = "std")]
impl std::io::Write for Crc32c {
  #[inline]
  fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
    self.update(buf);
    Ok(buf.len())
  }

  #[inline]
  fn flush(&mut self) -> std::io::Result<()> {
    Ok(())
  }
}

/// Auto-select the fastest safe kernel for the streaming hasher.
///
/// Tiers: compile-time target features, then runtime detection cached in a
/// `OnceLock` (`std` only), then the portable engine.
#[inline]
fn dispatch(crc: u32, data: &[u8]) -> u32 {
  #[cfg(all(target_arch = "x86_64", target_feature = "sse4.2"))]
  {
    x86_64::compute_enabled(crc, data)
  }

  #[cfg(all(target_arch = "aarch64", target_feature = "crc"))]
  {
    aarch64::compute_enabled(crc, data)
  }

  #[cfg(all(feature = "std", target_arch = "x86_64", not(target_feature = "sse4.2")))]
  {
    use std::sync::OnceLock;
    static KERNEL: OnceLock<fn(u32, &[u8]) -> u32> = OnceLock::new();
    let kernel = KERNEL.get_or_init(|| {
      if platform::is_crc32c_supported() {
        x86_64::compute_runtime
      } else {
        portable::compute
      }
    });
    kernel(crc, data)
  }

  #[cfg(all(feature = "std", target_arch = "aarch64", not(target_feature = "crc")))]
  {
    use std::sync::OnceLock;
    static KERNEL: OnceLock<fn(u32, &[u8]) -> u32> = OnceLock::new();
    let kernel = KERNEL.get_or_init(|| {
      if platform::is_crc32c_supported() {
        aarch64::compute_runtime
      } else {
        portable::compute
      }
    });
    kernel(crc, data)
  }

  #[cfg(not(any(
    all(target_arch = "x86_64", target_feature = "sse4.2"),
    all(target_arch = "aarch64", target_feature = "crc"),
    all(feature = "std", target_arch = "x86_64", not(target_feature = "sse4.2")),
    all(feature = "std", target_arch = "aarch64", not(target_feature = "crc")),
  )))]
  {
    portable::compute(crc, data)
  }
}

/// The kernel the streaming hasher will run on this build and host.
///
/// Diagnostics and benchmark labeling only.
#[doc(hidden)]
#[must_use]
pub fn selected_backend() -> &'static str {
  #[cfg(all(target_arch = "x86_64", target_feature = "sse4.2"))]
  {
    "x86_64/sse4.2 (compile-time)"
  }

  #[cfg(all(target_arch = "aarch64", target_feature = "crc"))]
  {
    "aarch64/crc (compile-time)"
  }

  #[cfg(all(feature = "std", target_arch = "x86_64", not(target_feature = "sse4.2")))]
  {
    if platform::is_crc32c_supported() {
      "x86_64/sse4.2 (runtime)"
    } else {
      "portable/slicing-by-8"
    }
  }

  #[cfg(all(feature = "std", target_arch = "aarch64", not(target_feature = "crc")))]
  {
    if platform::is_crc32c_supported() {
      "aarch64/crc (runtime)"
    } else {
      "portable/slicing-by-8"
    }
  }

  #[cfg(not(any(
    all(target_arch = "x86_64", target_feature = "sse4.2"),
    all(target_arch = "aarch64", target_feature = "crc"),
    all(feature = "std", target_arch = "x86_64", not(target_feature = "sse4.2")),
    all(feature = "std", target_arch = "aarch64", not(target_feature = "crc")),
  )))]
  {
    "portable/slicing-by-8"
  }
}

#[cfg(test)]
mod tests {
  extern crate std;

  use std::vec::Vec;

  use super::*;

  #[test]
  fn known_vector() {
    assert_eq!(Crc32c::checksum(b"123456789"), 0xE306_9283);
    assert_eq!(calculate(false, b"123456789", 0), Ok(0xE306_9283));
  }

  #[test]
  fn known_vector_hardware() {
    if !is_hardware_acceleration_available() {
      return;
    }
    assert_eq!(calculate(true, b"123456789", 0), Ok(0xE306_9283));
    assert_eq!(compute_hardware(0, b"123456789"), Ok(0xE306_9283));
  }

  #[test]
  fn empty_input_is_identity() {
    assert_eq!(Crc32c::checksum(b""), 0);
    assert_eq!(calculate(false, b"", 0), Ok(0));
    assert_eq!(calculate(false, b"", 0xDEAD_BEEF), Ok(0xDEAD_BEEF));

    if is_hardware_acceleration_available() {
      assert_eq!(calculate(true, b"", 0), Ok(0));
      assert_eq!(calculate(true, b"", 0xDEAD_BEEF), Ok(0xDEAD_BEEF));
    }
  }

  #[test]
  fn auxiliary_vectors() {
    assert_eq!(Crc32c::checksum(&[0u8; 32]), 0x8A91_36AA);
    assert_eq!(Crc32c::checksum(&[0xFFu8; 32]), 0x62A8_AB43);
    assert_eq!(Crc32c::checksum(&[0x00]), 0x527D_5351);
  }

  #[test]
  fn cross_path_equivalence() {
    if !is_hardware_acceleration_available() {
      return;
    }

    let data: Vec<u8> = (0u8..=255).cycle().take(1027).collect();
    for len in [0usize, 1, 7, 8, 9, 63, 64, 65, 1027] {
      let sw = calculate(false, &data[..len], 0).unwrap();
      let hw = calculate(true, &data[..len], 0).unwrap();
      assert_eq!(sw, hw, "engines disagree at len={}", len);
    }
  }

  #[test]
  fn chaining_matches_oneshot() {
    let data = b"the quick brown fox jumps over the lazy dog";
    let oneshot = calculate(false, data, 0).unwrap();

    for split in 0..data.len() {
      let (a, b) = data.split_at(split);
      let first = calculate(false, a, 0).unwrap();
      let chained = calculate(false, b, first).unwrap();
      assert_eq!(chained, oneshot, "split {}", split);
    }
  }

  #[test]
  fn forced_engine_contract() {
    assert_eq!(Engine::forced(false), Ok(Engine::Portable));

    if is_hardware_acceleration_available() {
      assert_eq!(Engine::forced(true), Ok(Engine::Hardware));
      assert_eq!(Engine::preferred(), Engine::Hardware);
    } else {
      assert_eq!(Engine::forced(true), Err(UnsupportedHardwareError::new()));
      assert_eq!(Engine::preferred(), Engine::Portable);
      assert!(calculate(true, b"data", 0).is_err());
      assert!(compute_hardware(0, b"data").is_err());
    }
  }

  #[test]
  fn feature_query_is_stable() {
    let first = is_hardware_acceleration_available();
    for _ in 0..100 {
      assert_eq!(is_hardware_acceleration_available(), first);
    }
  }

  #[test]
  fn incremental() {
    let mut hasher = Crc32c::new();
    hasher.update(b"1234");
    hasher.update(b"56789");
    assert_eq!(hasher.finalize(), 0xE306_9283);
  }

  #[test]
  fn resume_matches_oneshot() {
    let data = b"hello world";
    let (first, second) = data.split_at(6);

    let mut hasher = Crc32c::resume(Crc32c::checksum(first));
    hasher.update(second);
    assert_eq!(hasher.finalize(), Crc32c::checksum(data));
  }

  #[test]
  fn reset_restores_initial_state() {
    let mut hasher = Crc32c::new();
    hasher.update(b"garbage");
    hasher.reset();
    hasher.update(b"123456789");
    assert_eq!(hasher.finalize(), 0xE306_9283);

    let mut resumed = Crc32c::resume(0x1234_5678);
    resumed.update(b"garbage");
    resumed.reset();
    assert_eq!(resumed.finalize(), 0x1234_5678);
  }

  #[test]
  fn clone_preserves_state() {
    let mut hasher = Crc32c::new();
    hasher.update(b"1234");

    let mut clone = hasher.clone();
    hasher.update(b"56789");
    clone.update(b"56789");

    assert_eq!(hasher.finalize(), clone.finalize());
  }

  #[test]
  fn text_is_checksummed_as_utf8_bytes() {
    let text = "123456789";
    assert_eq!(Crc32c::checksum(text.as_bytes()), 0xE306_9283);
  }

  #[test]
  fn hasher_matches_explicit_paths() {
    let data: Vec<u8> = (0u8..=255).cycle().take(300).collect();
    let auto = Crc32c::checksum(&data);
    assert_eq!(auto, compute_software(0, &data));
  }

  #[test]
  #[cfg(feature = "std")]
  fn io_write() {
    use std::io::Write;

    let mut hasher = Crc32c::new();
    hasher.write_all(b"123456789").unwrap();
    hasher.flush().unwrap();
    assert_eq!(hasher.finalize(), 0xE306_9283);
  }

  #[test]
  fn backend_name_is_nonempty() {
    assert!(!selected_backend().is_empty());
    assert!(!Crc32c::engine().name().is_empty());
  }
}
