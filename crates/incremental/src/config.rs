//! Zero-run runtime configuration (overrides + clamping).
//!
//! The only knob is the count bit-width `B`: the operator family covers
//! zero runs of up to `2^B - 1` bytes. It can be overridden through
//! `CRC_INCR_COUNT_BITS` when the `std` feature is enabled.
//!
//! Requested values are always clamped to `1..=MAX_COUNT_BITS`.

use crate::constants::crc32::{DEFAULT_COUNT_BITS, MAX_COUNT_BITS};

/// Environment variable overriding the count bit-width.
pub const COUNT_BITS_ENV: &str = "CRC_INCR_COUNT_BITS";

/// Full zero-run configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZeroRunConfig {
  /// Bit-width requested by the environment (or the default).
  pub requested_count_bits: u8,
  /// Bit-width clamped to the supported range.
  pub count_bits: u8,
}

impl ZeroRunConfig {
  /// Largest zero-run count this configuration supports.
  #[inline]
  #[must_use]
  pub const fn max_count(&self) -> u32 {
    max_count_for(self.count_bits)
  }
}

impl Default for ZeroRunConfig {
  fn default() -> Self {
    Self { requested_count_bits: DEFAULT_COUNT_BITS, count_bits: DEFAULT_COUNT_BITS }
  }
}

/// Largest count representable in `bits` bits (`2^bits - 1`).
#[inline]
#[must_use]
pub const fn max_count_for(bits: u8) -> u32 {
  ((1u64 << bits) - 1) as u32
}

/// Clamp a requested count bit-width into `1..=MAX_COUNT_BITS`.
#[inline]
#[must_use]
pub const fn clamp_count_bits(bits: u8) -> u8 {
  if bits == 0 {
    1
  } else if bits > MAX_COUNT_BITS {
    MAX_COUNT_BITS
  } else {
    bits
  }
}

#[derive(Clone, Copy, Debug, Default)]
struct Overrides {
  count_bits: Option<u8>,
}

#[cfg(feature = "std")]
fn parse_u8(value: &str) -> Option<u8> {
  let value = value.trim();
  if value.is_empty() {
    return None;
  }
  value.parse::<u8>().ok()
}

#[cfg(feature = "std")]
fn read_env_overrides() -> Overrides {
  let count_bits = std::env::var(COUNT_BITS_ENV).ok().and_then(|v| parse_u8(&v));
  if let Some(bits) = count_bits {
    tracing::debug!(bits, "count bit-width override from {COUNT_BITS_ENV}");
  }
  Overrides { count_bits }
}

#[cfg(feature = "std")]
fn overrides() -> Overrides {
  use std::sync::OnceLock;
  static OVERRIDES: OnceLock<Overrides> = OnceLock::new();
  *OVERRIDES.get_or_init(read_env_overrides)
}

#[cfg(not(feature = "std"))]
fn overrides() -> Overrides {
  Overrides::default()
}

/// Get the effective zero-run configuration.
#[inline]
#[must_use]
pub fn get() -> ZeroRunConfig {
  let ov = overrides();
  let requested_count_bits = ov.count_bits.unwrap_or(DEFAULT_COUNT_BITS);
  ZeroRunConfig { requested_count_bits, count_bits: clamp_count_bits(requested_count_bits) }
}
