//! aarch64-accelerated CRC-32C using the ARMv8 CRC32 extension.
//!
//! Same chunking strategy as the x86_64 engine: 8-byte words in the main
//! loop, then 4/2/1-byte tail steps, each folded by a `crc32c*` instruction.

#![allow(unsafe_code)]

#[cfg(any(target_feature = "crc", feature = "std"))]
use core::arch::aarch64::{__crc32cb, __crc32cd, __crc32ch, __crc32cw};

/// Compute CRC-32C with the CRC32 extension over raw register state.
///
/// # Safety
/// The CPU must support the `crc` target feature.
#[cfg(any(target_feature = "crc", feature = "std"))]
#[target_feature(enable = "crc")]
pub(crate) unsafe fn compute_unchecked(crc: u32, data: &[u8]) -> u32 {
  let mut crc = crc;

  let mut chunks = data.chunks_exact(8);
  for chunk in chunks.by_ref() {
    let mut word = [0u8; 8];
    word.copy_from_slice(chunk);
    crc = __crc32cd(crc, u64::from_le_bytes(word));
  }

  let mut rest = chunks.remainder();

  if rest.len() >= 4 {
    let (quad, tail) = rest.split_at(4);
    let mut word = [0u8; 4];
    word.copy_from_slice(quad);
    crc = __crc32cw(crc, u32::from_le_bytes(word));
    rest = tail;
  }

  if rest.len() >= 2 {
    let (pair, tail) = rest.split_at(2);
    let mut word = [0u8; 2];
    word.copy_from_slice(pair);
    crc = __crc32ch(crc, u16::from_le_bytes(word));
    rest = tail;
  }

  if let [byte] = rest {
    crc = __crc32cb(crc, *byte);
  }

  crc
}

/// Safe entry when the CRC extension is enabled at compile time.
#[cfg(target_feature = "crc")]
#[inline]
pub(crate) fn compute_enabled(crc: u32, data: &[u8]) -> u32 {
  // SAFETY: only compiled when `target_feature = "crc"`.
  unsafe { compute_unchecked(crc, data) }
}

/// Entry for call sites that verified CRC extension support at runtime.
#[cfg(feature = "std")]
#[inline]
pub(crate) fn compute_runtime(crc: u32, data: &[u8]) -> u32 {
  debug_assert!(platform::is_crc32c_supported());
  // SAFETY: selected only after `platform::is_crc32c_supported()` returned true.
  unsafe { compute_unchecked(crc, data) }
}
