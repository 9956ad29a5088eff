//! Slicing-by-8 lookup tables for CRC-32C.
//!
//! Eight tables of 256 entries each (8 KiB total):
//! - Table 0: CRC contribution of a single byte value.
//! - Tables 1-7: contributions of bytes 1-7 positions earlier in the stream,
//!   pre-combined so the engine can fold 8 input bytes per iteration.
//!
//! The tables are generated at compile time by `const fn` into an immutable
//! `static`. Construction therefore finishes strictly before any computation
//! can observe them, and read-only sharing across threads needs no locking.

/// CRC-32C polynomial in reflected (bit-reversed) form.
///
/// Normal form is 0x1EDC6F41; the reflected form suits LSB-first processing.
pub const POLYNOMIAL: u32 = 0x82F6_3B78;

/// Wrapper type forcing 64-byte (cache line) alignment.
///
/// Keeps table rows from straddling cache lines during lookups.
#[repr(align(64))]
pub struct Aligned64<T>(pub T);

/// Slicing-by-8 lookup tables for the software engine.
pub static TABLES: Aligned64<[[u32; 256]; 8]> = Aligned64(generate_slicing_tables(POLYNOMIAL));

/// Generate the base lookup table (table 0) for a reflected polynomial.
///
/// Entry `i` is the CRC-32 remainder of the byte value `i`: 8 iterations of
/// shift-right, XORing in the polynomial whenever the low bit is set.
pub const fn generate_table_0(poly: u32) -> [u32; 256] {
  let mut table = [0u32; 256];
  let mut i = 0usize;

  while i < 256 {
    let mut crc = i as u32;
    let mut j = 0;
    while j < 8 {
      if crc & 1 != 0 {
        crc = (crc >> 1) ^ poly;
      } else {
        crc >>= 1;
      }
      j += 1;
    }
    table[i] = crc;
    i += 1;
  }

  table
}

/// Generate all 8 slicing-by-8 tables.
///
/// Tables 1-7 are derived from table 0 by applying the byte transform once
/// more per slice: `table[j][i] = table[0][table[j-1][i] & 0xFF] ^
/// (table[j-1][i] >> 8)`.
pub const fn generate_slicing_tables(poly: u32) -> [[u32; 256]; 8] {
  let table0 = generate_table_0(poly);
  let mut tables = [[0u32; 256]; 8];

  let mut i = 0;
  while i < 256 {
    tables[0][i] = table0[i];
    i += 1;
  }

  let mut t = 1;
  while t < 8 {
    let mut i = 0;
    while i < 256 {
      let prev = tables[t - 1][i];
      tables[t][i] = (prev >> 8) ^ table0[(prev & 0xFF) as usize];
      i += 1;
    }
    t += 1;
  }

  tables
}
