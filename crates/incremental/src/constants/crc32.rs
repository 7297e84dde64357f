//! CRC-32 (ISO-HDLC) register constants.
//!
//! Polynomial: 0x04C11DB7 (reflected: 0xEDB88320)
//! Used by: Ethernet, gzip, PNG, zip, SATA, zlib

use super::{Aligned64, tables};

/// CRC-32 polynomial in reflected (bit-reversed) form.
///
/// The normal form is 0x04C11DB7; the reflected form drives LSB-first
/// processing, one byte per table lookup.
pub const POLYNOMIAL: u32 = 0xEDB8_8320;

/// Width of the CRC register in bits.
pub const CRC_BIT_WIDTH: usize = 32;

/// Width of the CRC register in bytes.
pub const CRC_BYTE_WIDTH: usize = CRC_BIT_WIDTH.div_ceil(8);

/// Default bit-width of a zero-run count (runs of up to 65535 bytes).
pub const DEFAULT_COUNT_BITS: u8 = 16;

/// Largest supported zero-run count bit-width.
///
/// Building the operator for exponent `z` walks `2^z` zero bytes per register
/// bit, so the one-time build cost doubles with every extra bit.
pub const MAX_COUNT_BITS: u8 = 24;

/// Byte-at-a-time lookup table: CRC contribution of each byte value.
///
/// Total size: 256 * 4 = 1KB, 64-byte aligned.
pub static BYTE_TABLE: Aligned64<[u32; 256]> = Aligned64(tables::generate_byte_table(POLYNOMIAL));
