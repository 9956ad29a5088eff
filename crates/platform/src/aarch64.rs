//! aarch64 feature detection.
//!
//! Reading the ID registers directly traps at EL0 on most kernels, so
//! runtime detection goes through `std`'s OS-assisted macro. Without `std`
//! only compile-time target features are visible.

/// Returns `true` if the CPU supports the ARMv8 CRC32 extension.
#[inline]
#[must_use]
pub fn has_crc32c() -> bool {
  #[cfg(target_feature = "crc")]
  {
    true
  }

  #[cfg(all(feature = "std", not(target_feature = "crc")))]
  {
    std::arch::is_aarch64_feature_detected!("crc")
  }

  #[cfg(all(not(feature = "std"), not(target_feature = "crc")))]
  {
    false
  }
}
