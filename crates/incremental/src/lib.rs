//! Incremental CRC-32 recomputation.
//!
//! This crate maintains a reflected CRC-32 register (polynomial `0xEDB88320`)
//! over byte buffers and recomputes it after localized edits without
//! rescanning unchanged bytes.
//!
//! # Building Blocks
//!
//! | Type | Role | Cost per query |
//! |------|------|----------------|
//! | [`ByteTable`] | Byte-at-a-time register update | O(len) |
//! | [`ZeroOperators`] | "Advance by `2^z` zero bytes" in column form | O(B × 32) for any run |
//! | [`FixedZeroMap`] | One run length compiled to 4 × 256 lookups | 4 lookups |
//! | [`HeaderEdit`] | Whole-buffer CRC after an in-place header edit | O(header) |
//!
//! All of them hang off an immutable [`CrcContext`], built once and then
//! shared read-only.
//!
//! # Registers, Not Checksums
//!
//! Every operation works on the raw register: no pre-inversion, no final XOR.
//! Callers that want the standard CRC-32 pass `!0` as the seed and invert the
//! result.
//!
//! # Example
//!
//! ```rust
//! use crc_incremental::CrcContext;
//!
//! let ctx = CrcContext::with_count_bits(16).unwrap();
//! let seed = 0x1234_5678;
//!
//! let mut packet = [0u8; 1500];
//! let old_crc = ctx.crc_of_buffer(seed, &packet);
//!
//! // Rewrite the 8-byte header in place.
//! let old_header = [0u8; 8];
//! packet[1] ^= 0x55;
//! let (new_header, payload) = packet.split_at(8);
//!
//! let new_crc =
//!   crc_incremental::crc_after_header_edit(&ctx, seed, old_crc, &old_header, new_header, payload.len()).unwrap();
//! assert_eq!(new_crc, ctx.crc_of_buffer(seed, &packet));
//! ```
//!
//! # no_std Support
//!
//! The core is `no_std`. The `std` feature (default) adds environment
//! configuration overrides and the [`validate`] harness.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod byte_table;
pub mod config;
pub mod constants;
mod context;
mod error;
mod fixed_map;
mod header_edit;
pub mod reference;
#[cfg(feature = "std")]
pub mod validate;
mod zero_run;

#[cfg(test)]
mod proptests;

pub use byte_table::ByteTable;
pub use config::ZeroRunConfig;
pub use context::CrcContext;
pub use error::ZeroRunError;
pub use fixed_map::FixedZeroMap;
pub use header_edit::{HeaderEdit, crc_after_header_edit, crc_after_header_edit_mapped};
pub use zero_run::ZeroOperators;
