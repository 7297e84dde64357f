//! Immutable computation context.
//!
//! A [`CrcContext`] bundles the byte table with the zero-run operator family.
//! It is built once and then shared read-only; every query is a method on it.

use crate::{ByteTable, FixedZeroMap, ZeroOperators, ZeroRunError, config};

/// Byte table plus zero-run operators, ready for queries.
///
/// # Example
///
/// ```
/// use crc_incremental::CrcContext;
///
/// let ctx = CrcContext::with_count_bits(16).unwrap();
/// let zeros = [0u8; 100];
///
/// let fast = ctx.crc_after_zero_run(0x1234_5678, 100).unwrap();
/// assert_eq!(fast, ctx.crc_of_buffer(0x1234_5678, &zeros));
/// ```
#[derive(Clone, Debug)]
pub struct CrcContext {
  table: ByteTable,
  operators: ZeroOperators,
}

impl CrcContext {
  /// Build a context using the effective [`config::get`] configuration.
  ///
  /// Deterministic: repeated calls produce identical tables.
  #[must_use]
  pub fn init() -> Self {
    let cfg = config::get();
    if cfg.requested_count_bits != cfg.count_bits {
      tracing::warn!(
        requested = cfg.requested_count_bits,
        effective = cfg.count_bits,
        "count bit-width clamped"
      );
    }
    Self::build_in_range(cfg.count_bits)
  }

  /// Build a context whose operators cover runs of up to `2^count_bits - 1` bytes.
  ///
  /// # Errors
  ///
  /// Returns [`ZeroRunError::InvalidCountBits`] when `count_bits` is zero or
  /// exceeds [`MAX_COUNT_BITS`](crate::constants::crc32::MAX_COUNT_BITS).
  pub fn with_count_bits(count_bits: u8) -> Result<Self, ZeroRunError> {
    let table = ByteTable::crc32();
    let operators = ZeroOperators::build(table, count_bits)?;
    tracing::debug!(count_bits, "built zero-run operators");
    Ok(Self { table, operators })
  }

  fn build_in_range(count_bits: u8) -> Self {
    let table = ByteTable::crc32();
    let operators = ZeroOperators::build_in_range(table, count_bits);
    tracing::debug!(count_bits, "built zero-run operators");
    Self { table, operators }
  }

  /// The byte table.
  #[inline]
  #[must_use]
  pub const fn table(&self) -> ByteTable {
    self.table
  }

  /// The zero-run operator family.
  #[inline]
  #[must_use]
  pub const fn operators(&self) -> &ZeroOperators {
    &self.operators
  }

  /// Count bit-width `B` of the operator family.
  #[inline]
  #[must_use]
  pub const fn count_bits(&self) -> u8 {
    self.operators.count_bits()
  }

  /// Largest zero-run count accepted (`2^B - 1`).
  #[inline]
  #[must_use]
  pub const fn max_count(&self) -> u32 {
    self.operators.max_count()
  }

  /// CRC register after feeding `data` starting from `seed`.
  #[inline]
  #[must_use]
  pub fn crc_of_buffer(&self, seed: u32, data: &[u8]) -> u32 {
    self.table.crc_of_buffer(seed, data)
  }

  /// CRC register after `count` zero bytes, in time independent of `count`.
  ///
  /// # Errors
  ///
  /// Returns [`ZeroRunError::CountOutOfRange`] when `count > self.max_count()`.
  #[inline]
  pub fn crc_after_zero_run(&self, seed: u32, count: u32) -> Result<u32, ZeroRunError> {
    self.operators.apply(seed, count)
  }

  /// Compile the operator for `count` zero bytes into a byte-wise map.
  ///
  /// # Errors
  ///
  /// Returns [`ZeroRunError::CountOutOfRange`] when `count > self.max_count()`.
  pub fn build_fixed_zero_map(&self, count: u32) -> Result<FixedZeroMap, ZeroRunError> {
    FixedZeroMap::build(&self.operators, count)
  }

  /// CRC register after the zero run baked into `map`.
  #[inline]
  #[must_use]
  pub fn crc_after_fixed_zero_run(&self, seed: u32, map: &FixedZeroMap) -> u32 {
    map.apply(seed)
  }
}

impl Default for CrcContext {
  fn default() -> Self {
    Self::init()
  }
}
