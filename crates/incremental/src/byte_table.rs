//! Byte-at-a-time CRC-32 update over the shared lookup table.

use crate::constants::crc32::BYTE_TABLE;

/// Handle to a 256-entry byte table.
///
/// Maps the low byte of `crc ^ input` to the contribution XORed into the
/// shifted register. The table lives in static memory and is shared read-only
/// by every computation, so the handle is `Copy`.
#[derive(Clone, Copy)]
pub struct ByteTable {
  table: &'static [u32; 256],
}

impl ByteTable {
  /// Table for the reflected CRC-32 polynomial `0xEDB88320`.
  #[inline]
  #[must_use]
  pub fn crc32() -> Self {
    Self { table: &BYTE_TABLE.0 }
  }

  /// Wrap an externally generated static table.
  #[inline]
  #[must_use]
  pub const fn from_static(table: &'static [u32; 256]) -> Self {
    Self { table }
  }

  /// Contribution of a single byte value.
  #[inline]
  #[must_use]
  #[allow(clippy::indexing_slicing)] // u8 index, table is [u32; 256]
  pub const fn entry(&self, byte: u8) -> u32 {
    self.table[byte as usize]
  }

  /// Advance `crc` past one input byte.
  #[inline]
  #[must_use]
  #[allow(clippy::indexing_slicing)] // index is 0..=255 by mask
  pub const fn update_byte(&self, crc: u32, byte: u8) -> u32 {
    self.table[((crc ^ byte as u32) & 0xFF) as usize] ^ (crc >> 8)
  }

  /// CRC register after feeding `data` starting from `seed`.
  ///
  /// No pre- or post-inversion is applied; an empty slice returns `seed`.
  #[inline]
  #[must_use]
  pub fn crc_of_buffer(&self, seed: u32, data: &[u8]) -> u32 {
    data.iter().fold(seed, |crc, &b| self.update_byte(crc, b))
  }

  /// CRC register after feeding `count` zero bytes one at a time.
  ///
  /// Linear in `count`. This is the brute-force counterpart of
  /// [`ZeroOperators::apply`](crate::ZeroOperators::apply).
  #[must_use]
  pub fn crc_of_zeros(&self, seed: u32, count: u64) -> u32 {
    let mut crc = seed;
    for _ in 0..count {
      crc = self.update_byte(crc, 0);
    }
    crc
  }
}

impl Default for ByteTable {
  #[inline]
  fn default() -> Self {
    Self::crc32()
  }
}

impl core::fmt::Debug for ByteTable {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("ByteTable").field("entry_0x80", &self.entry(0x80)).finish_non_exhaustive()
  }
}
