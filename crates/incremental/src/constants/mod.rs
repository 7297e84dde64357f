//! Precomputed constants for the reflected CRC-32 register.
//!
//! The byte table is computed at compile time and embedded in the binary.
//!
//! # Cache Alignment
//!
//! Lookup tables are 64-byte (cache line) aligned using [`Aligned64`] so a
//! table lookup never straddles two cache lines.

pub mod crc32;
pub mod tables;

/// Wrapper type to force 64-byte (cache line) alignment.
///
/// The inner type `T` is accessible via `.0`.
#[derive(Debug)]
#[repr(align(64))]
pub struct Aligned64<T>(pub T);
