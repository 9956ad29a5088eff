//! x86_64 feature detection via `CPUID`.

#![allow(unsafe_code)] // Required for the CPUID intrinsic.

use core::arch::x86_64::__cpuid;

/// Bit position of the SSE 4.2 flag in the ECX feature word of CPUID leaf 1.
const SSE42_BIT: u32 = 20;

/// Returns `true` if the CPU supports SSE 4.2 (and therefore the `crc32`
/// instruction family).
///
/// Works without `std`: `CPUID` is architecturally guaranteed on x86_64, so
/// this issues the leaf-1 query directly instead of going through OS
/// detection macros.
#[inline]
#[must_use]
pub fn has_crc32c() -> bool {
  // SAFETY: CPUID is unconditionally available in 64-bit mode.
  let leaf1 = unsafe { __cpuid(1) };
  (leaf1.ecx >> SSE42_BIT) & 1 == 1
}
