//! Const-fn CRC-32 lookup table generation.
//!
//! Each entry is the register value reached by shifting one byte value
//! through eight single-bit shift-and-conditional-XOR steps.

// SAFETY: All array indexing in this module uses bounded loop indices (0..256).
// Clippy cannot prove this in const fn contexts, but bounds are statically guaranteed.
#![allow(clippy::indexing_slicing)]

/// Generate a single CRC-32 lookup table entry.
///
/// Uses bit-by-bit computation with the reflected polynomial.
#[must_use]
pub const fn byte_table_entry(poly: u32, index: u8) -> u32 {
  let mut crc = index as u32;
  let mut bit = 0;
  while bit < 8 {
    if crc & 1 != 0 {
      crc = (crc >> 1) ^ poly;
    } else {
      crc >>= 1;
    }
    bit += 1;
  }
  crc
}

/// Generate the 256-entry byte table for a reflected 32-bit polynomial.
#[must_use]
pub const fn generate_byte_table(poly: u32) -> [u32; 256] {
  let mut table = [0u32; 256];
  let mut i = 0usize;
  while i < 256 {
    table[i] = byte_table_entry(poly, i as u8);
    i += 1;
  }
  table
}
