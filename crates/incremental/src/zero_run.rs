//! Zero-run operators over GF(2).
//!
//! Feeding a zero byte into a CRC register is a linear map over GF(2): the
//! XOR-in step is a no-op and what remains is a shift plus a table lookup
//! that distributes over XOR. Advancing past `n` zero bytes is therefore a
//! 32×32 bit matrix acting on the register.
//!
//! Rather than store full matrices, each operator is kept in column form:
//! column `c` is the register reached from a state with only bit `c` set.
//! Applying the operator to an arbitrary register XORs together the columns
//! of its set bits.
//!
//! # Layout
//!
//! ```text
//! columns[z][c] = register after 2^z zero bytes, starting from 1 << c
//! ```
//!
//! for `z` in `0..B` and `c` in `0..32`. A run of `n` zero bytes is the
//! product of the operators for the set bits of `n`, so any `n < 2^B` costs
//! at most `B` column sweeps regardless of its magnitude.

use crate::{
  ByteTable, ZeroRunError,
  config::max_count_for,
  constants::crc32::{CRC_BIT_WIDTH, MAX_COUNT_BITS},
};

/// Column-form operators "advance by `2^z` zero bytes" for `z` in `0..B`.
#[derive(Clone)]
pub struct ZeroOperators {
  columns: [[u32; CRC_BIT_WIDTH]; MAX_COUNT_BITS as usize],
  count_bits: u8,
}

impl ZeroOperators {
  /// Build the operator family for `count_bits` exponents.
  ///
  /// For each register bit, a single-bit state is walked forward one zero
  /// byte at a time, and a snapshot is recorded each time the number of
  /// bytes walked reaches a power of two. Cost is `32 * 2^(B-1)` byte updates.
  ///
  /// # Errors
  ///
  /// Returns [`ZeroRunError::InvalidCountBits`] when `count_bits` is zero or
  /// exceeds [`MAX_COUNT_BITS`].
  pub fn build(table: ByteTable, count_bits: u8) -> Result<Self, ZeroRunError> {
    if count_bits == 0 || count_bits > MAX_COUNT_BITS {
      return Err(ZeroRunError::InvalidCountBits { bits: count_bits });
    }
    Ok(Self::build_in_range(table, count_bits))
  }

  /// Build with a bit-width already known to be in `1..=MAX_COUNT_BITS`.
  pub(crate) fn build_in_range(table: ByteTable, count_bits: u8) -> Self {
    let mut columns = [[0u32; CRC_BIT_WIDTH]; MAX_COUNT_BITS as usize];
    let exponents = usize::from(count_bits);

    for c in 0..CRC_BIT_WIDTH {
      let mut crc = 1u32 << c;
      let mut walked = 0u32;
      for (z, op) in columns.iter_mut().take(exponents).enumerate() {
        let threshold = 1u32 << z;
        while walked < threshold {
          crc = table.update_byte(crc, 0);
          walked += 1;
        }
        if let Some(slot) = op.get_mut(c) {
          *slot = crc;
        }
      }
    }

    Self { columns, count_bits }
  }

  /// Number of exponents `B` in the family.
  #[inline]
  #[must_use]
  pub const fn count_bits(&self) -> u8 {
    self.count_bits
  }

  /// Largest zero-run count the family can apply (`2^B - 1`).
  #[inline]
  #[must_use]
  pub const fn max_count(&self) -> u32 {
    max_count_for(self.count_bits)
  }

  /// The 32 columns of the operator for `2^z` zero bytes.
  #[inline]
  #[must_use]
  pub fn exponent(&self, z: usize) -> Option<&[u32; CRC_BIT_WIDTH]> {
    if z >= usize::from(self.count_bits) {
      return None;
    }
    self.columns.get(z)
  }

  /// Column `c` of the operator for `2^z` zero bytes.
  #[inline]
  #[must_use]
  pub fn column(&self, z: usize, c: usize) -> Option<u32> {
    self.exponent(z)?.get(c).copied()
  }

  /// Every cell as `(z, c, column)`, exponent-major.
  pub fn iter(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
    self
      .columns
      .iter()
      .take(usize::from(self.count_bits))
      .enumerate()
      .flat_map(|(z, op)| op.iter().enumerate().map(move |(c, &word)| (z, c, word)))
  }

  /// Register after `count` zero bytes, starting from `seed`.
  ///
  /// # Errors
  ///
  /// Returns [`ZeroRunError::CountOutOfRange`] when `count > 2^B - 1`.
  #[inline]
  pub fn apply(&self, seed: u32, count: u32) -> Result<u32, ZeroRunError> {
    let max = self.max_count();
    if count > max {
      return Err(ZeroRunError::CountOutOfRange { count: u64::from(count), max });
    }
    Ok(self.apply_in_range(seed, count))
  }

  /// Apply with `count` already known to be at most `2^B - 1`.
  pub(crate) fn apply_in_range(&self, seed: u32, count: u32) -> u32 {
    // Zero is a fixed point of every linear operator.
    if seed == 0 {
      return 0;
    }

    let mut crc = seed;
    let mut remaining = count;
    for op in &self.columns {
      if remaining == 0 {
        break;
      }
      if remaining & 1 != 0 {
        crc = gf2_columns_times(op, crc);
      }
      remaining >>= 1;
    }
    crc
  }
}

impl core::fmt::Debug for ZeroOperators {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("ZeroOperators")
      .field("count_bits", &self.count_bits)
      .field("max_count", &self.max_count())
      .finish_non_exhaustive()
  }
}

/// Multiply a column-form GF(2) matrix by a 32-bit vector.
#[inline]
fn gf2_columns_times(columns: &[u32; CRC_BIT_WIDTH], vec: u32) -> u32 {
  let mut sum = 0u32;
  let mut v = vec;

  // Iterate set bits only.
  while v != 0 {
    let bit = v.trailing_zeros() as usize;
    if let Some(&col) = columns.get(bit) {
      sum ^= col;
    }
    v &= v - 1;
  }

  sum
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ops(bits: u8) -> ZeroOperators {
    ZeroOperators::build(ByteTable::crc32(), bits).unwrap()
  }

  #[test]
  fn test_invalid_count_bits() {
    assert_eq!(ZeroOperators::build(ByteTable::crc32(), 0).unwrap_err(), ZeroRunError::InvalidCountBits { bits: 0 });
    assert_eq!(
      ZeroOperators::build(ByteTable::crc32(), MAX_COUNT_BITS + 1).unwrap_err(),
      ZeroRunError::InvalidCountBits { bits: MAX_COUNT_BITS + 1 }
    );
  }

  #[test]
  fn test_exponent_zero_is_one_zero_byte() {
    let table = ByteTable::crc32();
    let ops = ops(8);
    for c in 0..CRC_BIT_WIDTH {
      assert_eq!(ops.column(0, c), Some(table.update_byte(1 << c, 0)));
    }
  }

  #[test]
  fn test_columns_match_brute_force() {
    let table = ByteTable::crc32();
    let ops = ops(10);
    for z in 0..10 {
      for c in [0usize, 1, 7, 8, 16, 31] {
        assert_eq!(ops.column(z, c), Some(table.crc_of_zeros(1 << c, 1 << z)), "z={z} c={c}");
      }
    }
  }

  #[test]
  fn test_column_out_of_range() {
    let ops = ops(4);
    assert_eq!(ops.column(4, 0), None);
    assert_eq!(ops.column(0, 32), None);
    assert!(ops.exponent(3).is_some());
    assert!(ops.exponent(4).is_none());
  }

  #[test]
  fn test_iter_covers_all_cells() {
    let ops = ops(5);
    assert_eq!(ops.iter().count(), 5 * CRC_BIT_WIDTH);
    let (z, c, word) = ops.iter().last().unwrap();
    assert_eq!((z, c), (4, 31));
    assert_eq!(Some(word), ops.column(4, 31));
  }

  #[test]
  fn test_count_zero_is_identity() {
    let ops = ops(16);
    assert_eq!(ops.apply(0x1234_5678, 0), Ok(0x1234_5678));
  }

  #[test]
  fn test_zero_seed_is_fixed_point() {
    let ops = ops(16);
    assert_eq!(ops.apply(0, 1000), Ok(0));
    assert_eq!(ops.apply(0, 65_535), Ok(0));
  }

  #[test]
  fn test_small_counts_match_brute_force() {
    let table = ByteTable::crc32();
    let ops = ops(16);
    for count in 0..=300u32 {
      assert_eq!(ops.apply(0xDEAD_BEEF, count), Ok(table.crc_of_zeros(0xDEAD_BEEF, u64::from(count))));
    }
  }

  #[test]
  fn test_max_count_matches_brute_force() {
    let table = ByteTable::crc32();
    let ops = ops(12);
    assert_eq!(ops.max_count(), 4095);
    assert_eq!(ops.apply(0xABCD_EF01, 4095), Ok(table.crc_of_zeros(0xABCD_EF01, 4095)));
  }

  #[test]
  fn test_count_out_of_range() {
    let ops = ops(16);
    assert_eq!(ops.apply(1, 65_536), Err(ZeroRunError::CountOutOfRange { count: 65_536, max: 65_535 }));
    // Zero seed is still rejected: the precondition is on the count.
    assert!(ops.apply(0, u32::MAX).is_err());
  }

  #[test]
  fn test_gf2_columns_times_identity() {
    let mut identity = [0u32; CRC_BIT_WIDTH];
    for (i, col) in identity.iter_mut().enumerate() {
      *col = 1 << i;
    }
    for v in [0u32, 1, 0x8000_0000, 0x1234_5678, u32::MAX] {
      assert_eq!(gf2_columns_times(&identity, v), v);
    }
  }

  #[test]
  fn test_build_is_deterministic() {
    let a = ops(12);
    let b = ops(12);
    assert!(a.iter().zip(b.iter()).all(|(x, y)| x == y));
  }
}
