//! Error types for zero-run and header-edit operations.
//!
//! Every variant is a violated caller precondition. The arithmetic itself
//! never fails once its inputs are in range.

use core::fmt;

/// A zero-run or header-edit precondition was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ZeroRunError {
  /// The zero-run count does not fit the configured count bit-width.
  CountOutOfRange {
    /// Requested number of zero bytes.
    count: u64,
    /// Largest count the operator family supports (`2^B - 1`).
    max: u32,
  },
  /// A fixed map was applied for a count other than the one it was built for.
  MapCountMismatch {
    /// Count baked into the map.
    map_count: u32,
    /// Count the caller asked for.
    requested: u32,
  },
  /// Old and new headers differ in length, so the edit is not in place.
  HeaderLengthMismatch {
    /// Length of the header before the edit.
    old: usize,
    /// Length of the header after the edit.
    new: usize,
  },
  /// The count bit-width is outside `1..=MAX_COUNT_BITS`.
  InvalidCountBits {
    /// Requested bit-width.
    bits: u8,
  },
}

impl fmt::Display for ZeroRunError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      Self::CountOutOfRange { count, max } => {
        write!(f, "zero-run count {count} exceeds maximum {max}")
      }
      Self::MapCountMismatch { map_count, requested } => {
        write!(f, "fixed map built for {map_count} zero bytes applied to a run of {requested}")
      }
      Self::HeaderLengthMismatch { old, new } => {
        write!(f, "header length changed from {old} to {new} bytes")
      }
      Self::InvalidCountBits { bits } => {
        write!(f, "count bit-width {bits} outside 1..={}", crate::constants::crc32::MAX_COUNT_BITS)
      }
    }
  }
}

impl core::error::Error for ZeroRunError {}
