//! x86_64-accelerated CRC-32C using SSE 4.2 `crc32` instructions.
//!
//! Consumes the largest chunk size the remaining input allows: 8-byte words
//! in the main loop, then one 4-, 2- and 1-byte step for the tail. Each
//! chunk is folded into the accumulator by the instruction itself, so no
//! lookup tables are involved.
//!
//! Safety: all `unsafe` in this crate is confined to this module (and its
//! aarch64 counterpart). The unchecked kernel must only be reached after
//! feature detection.

#![allow(unsafe_code)]

use core::arch::x86_64::{_mm_crc32_u8, _mm_crc32_u16, _mm_crc32_u32, _mm_crc32_u64};

/// Compute CRC-32C with SSE 4.2 over raw register state.
///
/// # Safety
/// The CPU must support SSE 4.2; executing this without it is an
/// illegal-instruction fault.
#[target_feature(enable = "sse4.2")]
pub(crate) unsafe fn compute_unchecked(crc: u32, data: &[u8]) -> u32 {
  let mut wide = u64::from(crc);

  let mut chunks = data.chunks_exact(8);
  for chunk in chunks.by_ref() {
    let mut word = [0u8; 8];
    word.copy_from_slice(chunk);
    wide = _mm_crc32_u64(wide, u64::from_le_bytes(word));
  }

  let mut crc = wide as u32;
  let mut rest = chunks.remainder();

  if rest.len() >= 4 {
    let (quad, tail) = rest.split_at(4);
    let mut word = [0u8; 4];
    word.copy_from_slice(quad);
    crc = _mm_crc32_u32(crc, u32::from_le_bytes(word));
    rest = tail;
  }

  if rest.len() >= 2 {
    let (pair, tail) = rest.split_at(2);
    let mut word = [0u8; 2];
    word.copy_from_slice(pair);
    crc = _mm_crc32_u16(crc, u16::from_le_bytes(word));
    rest = tail;
  }

  if let [byte] = rest {
    crc = _mm_crc32_u8(crc, *byte);
  }

  crc
}

/// Safe entry when SSE 4.2 is enabled at compile time.
#[cfg(target_feature = "sse4.2")]
#[inline]
pub(crate) fn compute_enabled(crc: u32, data: &[u8]) -> u32 {
  // SAFETY: only compiled when `target_feature = "sse4.2"`.
  unsafe { compute_unchecked(crc, data) }
}

/// Entry for call sites that verified SSE 4.2 support at runtime.
///
/// Detection goes through `CPUID`, so this is available without `std`.
#[inline]
pub(crate) fn compute_runtime(crc: u32, data: &[u8]) -> u32 {
  debug_assert!(platform::is_crc32c_supported());
  // SAFETY: selected only after `platform::is_crc32c_supported()` returned true.
  unsafe { compute_unchecked(crc, data) }
}
