//! Portable CRC-32C engine using slicing-by-8.
//!
//! Processes 8 bytes per iteration with 8 precomputed lookup tables: the
//! 8-byte word is XORed into the accumulator, each byte is looked up in its
//! slice table, and the 8 entries are XORed together. One wide read plus 8
//! independent lookups replaces 8 serially dependent single-byte steps.
//!
//! # Byte order
//!
//! The wide word is always consumed in little-endian order
//! (`u64::from_le_bytes`), so produced checksums are identical on big- and
//! little-endian hosts.

use crate::tables::TABLES;

/// Compute CRC-32C over `data` using the lookup tables.
///
/// `crc` is raw register state: the caller applies the `0xFFFFFFFF`
/// pre/post complement. Empty input returns `crc` unchanged.
pub(crate) fn compute(crc: u32, data: &[u8]) -> u32 {
  let t = &TABLES.0;
  let mut crc = crc;

  // Peel leading bytes until the cursor sits on an 8-byte boundary, so the
  // bulk loop reads aligned words.
  let head_len = data.as_ptr().align_offset(8).min(data.len());
  let (head, body) = data.split_at(head_len);
  for &byte in head {
    crc = compute_byte(crc, byte);
  }

  let mut chunks = body.chunks_exact(8);
  for chunk in chunks.by_ref() {
    let mut word = [0u8; 8];
    word.copy_from_slice(chunk);
    let x = u64::from(crc) ^ u64::from_le_bytes(word);

    crc = t[7][(x & 0xFF) as usize]
      ^ t[6][((x >> 8) & 0xFF) as usize]
      ^ t[5][((x >> 16) & 0xFF) as usize]
      ^ t[4][((x >> 24) & 0xFF) as usize]
      ^ t[3][((x >> 32) & 0xFF) as usize]
      ^ t[2][((x >> 40) & 0xFF) as usize]
      ^ t[1][((x >> 48) & 0xFF) as usize]
      ^ t[0][(x >> 56) as usize];
  }

  for &byte in chunks.remainder() {
    crc = compute_byte(crc, byte);
  }

  crc
}

/// Fold a single byte into the accumulator via the slice-0 table.
#[inline]
pub(crate) fn compute_byte(crc: u32, byte: u8) -> u32 {
  let idx = (crc as u8 ^ byte) as usize;
  (crc >> 8) ^ TABLES.0[0][idx]
}
