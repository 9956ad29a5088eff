//! Error type for the dispatch boundary.

use core::fmt;

/// The hardware path was requested on a CPU without the required
/// instruction extension.
///
/// Returned by [`calculate`](crate::calculate),
/// [`compute_hardware`](crate::compute_hardware) and
/// [`Engine::forced`](crate::Engine::forced). Deterministic, never
/// transient: retrying on the same host cannot succeed. Callers should
/// consult [`crate::is_hardware_acceleration_available`] before forcing
/// the accelerated path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct UnsupportedHardwareError;

impl UnsupportedHardwareError {
  /// Create a new error value.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

impl Default for UnsupportedHardwareError {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for UnsupportedHardwareError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("hardware CRC-32C requested but the CPU lacks the required instructions")
  }
}

impl core::error::Error for UnsupportedHardwareError {}
