//! Bitwise reference implementations.
//!
//! These process one bit at a time with no lookup tables, so they mirror the
//! polynomial definition directly. Every table-driven and operator-driven path
//! in this crate must produce identical registers.
//!
//! These are intentionally slow (~8 operations per bit). Use for:
//! - Correctness verification
//! - Test oracles
//! - Brute-force cross-checks in the validation harness

// SAFETY: All array indexing uses bounded loop indices (0..data.len()).
// Clippy cannot prove this in const fn contexts, but bounds are statically guaranteed.
#![allow(clippy::indexing_slicing)]

/// Shift the register by one bit (reflected, LSB-first).
#[inline]
#[must_use]
pub const fn crc32_step_bit(poly: u32, crc: u32) -> u32 {
  if crc & 1 != 0 { (crc >> 1) ^ poly } else { crc >> 1 }
}

/// Bitwise CRC-32 computation (reflected, LSB-first).
///
/// # Arguments
///
/// * `poly` - Reflected polynomial (e.g., 0xEDB88320 for CRC-32)
/// * `init` - Initial register value
/// * `data` - Input bytes
///
/// # Returns
///
/// The raw CRC register state (caller applies final XOR if needed).
#[must_use]
pub const fn crc32_bitwise(poly: u32, init: u32, data: &[u8]) -> u32 {
  let mut crc = init;
  let mut i: usize = 0;
  while i < data.len() {
    crc ^= data[i] as u32;
    let mut bit: u32 = 0;
    while bit < 8 {
      crc = crc32_step_bit(poly, crc);
      bit += 1;
    }
    i += 1;
  }
  crc
}

/// Bitwise register after `count` zero bytes.
///
/// A zero byte leaves the XOR-in step a no-op, so this is `8 * count`
/// single-bit shifts.
#[must_use]
pub const fn crc32_zeros_bitwise(poly: u32, init: u32, count: u64) -> u32 {
  let mut crc = init;
  let mut i: u64 = 0;
  while i < count {
    let mut bit: u32 = 0;
    while bit < 8 {
      crc = crc32_step_bit(poly, crc);
      bit += 1;
    }
    i += 1;
  }
  crc
}

#[cfg(test)]
mod tests {
  use super::*;

  const POLY: u32 = 0xEDB8_8320;

  #[test]
  fn test_check_value() {
    assert_eq!(crc32_bitwise(POLY, !0, b"123456789") ^ !0, 0xCBF4_3926);
  }

  #[test]
  fn test_check_value_const() {
    const CHECK: u32 = crc32_bitwise(0xEDB8_8320, !0, b"123456789") ^ !0;
    assert_eq!(CHECK, 0xCBF4_3926);
  }

  #[test]
  fn test_zeros_match_zero_buffer() {
    let zeros = [0u8; 64];
    for len in 0..=64usize {
      assert_eq!(crc32_zeros_bitwise(POLY, 0x1234_5678, len as u64), crc32_bitwise(POLY, 0x1234_5678, &zeros[..len]));
    }
  }

  #[test]
  fn test_zero_register_stays_zero() {
    assert_eq!(crc32_zeros_bitwise(POLY, 0, 1000), 0);
  }
}
