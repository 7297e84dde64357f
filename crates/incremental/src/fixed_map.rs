//! Byte-wise lookup table for one fixed zero-run length.
//!
//! When the same run length `N` recurs (a constant payload size, say), the
//! operator for `N` can be compiled into four 256-entry tables, one per
//! register byte. By linearity the operator's action on a register is the
//! XOR of its action on each byte lane, so applying it costs four lookups.

use crate::{
  ZeroOperators, ZeroRunError,
  constants::crc32::{CRC_BYTE_WIDTH, CRC_BIT_WIDTH},
};

/// The "advance by `count` zero bytes" operator, tabulated per register byte.
///
/// A map is only meaningful for the count it was built with. That count is
/// stored alongside the tables so callers can check the pairing with
/// [`apply_checked`](Self::apply_checked).
#[derive(Clone, PartialEq, Eq)]
pub struct FixedZeroMap {
  map: [[u32; 256]; CRC_BYTE_WIDTH],
  count: u32,
}

impl FixedZeroMap {
  /// Tabulate the operator for `count` zero bytes.
  ///
  /// Entry `[b][i]` is the operator applied to the register holding byte
  /// value `i` in lane `b` and zeros elsewhere.
  ///
  /// # Errors
  ///
  /// Returns [`ZeroRunError::CountOutOfRange`] when `count` exceeds the
  /// family's maximum.
  pub fn build(ops: &ZeroOperators, count: u32) -> Result<Self, ZeroRunError> {
    let max = ops.max_count();
    if count > max {
      return Err(ZeroRunError::CountOutOfRange { count: u64::from(count), max });
    }

    let mut map = [[0u32; 256]; CRC_BYTE_WIDTH];
    for (b, lane) in map.iter_mut().enumerate() {
      let shift = b * 8;
      for (i, slot) in lane.iter_mut().enumerate() {
        *slot = ops.apply_in_range((i as u32) << shift, count);
      }
    }

    tracing::debug!(count, "built fixed zero-run map");
    Ok(Self { map, count })
  }

  /// Zero-run length baked into this map.
  #[inline]
  #[must_use]
  pub const fn count(&self) -> u32 {
    self.count
  }

  /// Lane `b` of the map (`b < 4`).
  #[inline]
  #[must_use]
  pub fn lane(&self, b: usize) -> Option<&[u32; 256]> {
    self.map.get(b)
  }

  /// Register after [`count`](Self::count) zero bytes, starting from `seed`.
  ///
  /// Identical to `ZeroOperators::apply(seed, self.count())` in four lookups.
  #[inline]
  #[must_use]
  #[allow(clippy::indexing_slicing)] // index is 0..=255 by mask, lane is [u32; 256]
  pub fn apply(&self, seed: u32) -> u32 {
    let mut crc = 0u32;
    let mut rest = seed;
    for lane in &self.map {
      crc ^= lane[(rest & 0xFF) as usize];
      rest >>= 8;
    }
    crc
  }

  /// Like [`apply`](Self::apply), but first checks the map was built for `count`.
  ///
  /// # Errors
  ///
  /// Returns [`ZeroRunError::MapCountMismatch`] when `count != self.count()`.
  #[inline]
  pub fn apply_checked(&self, seed: u32, count: u32) -> Result<u32, ZeroRunError> {
    if count != self.count {
      return Err(ZeroRunError::MapCountMismatch { map_count: self.count, requested: count });
    }
    Ok(self.apply(seed))
  }
}

impl core::fmt::Debug for FixedZeroMap {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("FixedZeroMap").field("count", &self.count).finish_non_exhaustive()
  }
}

const _: () = assert!(CRC_BYTE_WIDTH * 8 == CRC_BIT_WIDTH);
