//! Whole-buffer CRC recomputation after an in-place header edit.
//!
//! Two streams that share an identical suffix reach final registers whose XOR
//! depends only on the XOR of their prefix registers: the suffix acts on both
//! as the same affine map, and the affine offsets cancel. When the suffix is
//! unchanged payload of length `D`, this gives
//!
//! ```text
//! crc(H_new || P) = crc(H_old || P) ^ Z_D(crc(H_old) ^ crc(H_new))
//! ```
//!
//! where `Z_D` advances a register past `D` zero bytes. Only the header is
//! rescanned.

use crate::{CrcContext, FixedZeroMap, ZeroRunError};

/// An in-place rewrite of a fixed-size header ahead of an unchanged payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderEdit<'a> {
  seed: u32,
  old_header: &'a [u8],
  new_header: &'a [u8],
  payload_len: usize,
}

impl<'a> HeaderEdit<'a> {
  /// Describe an edit of `old_header` into `new_header`, followed by
  /// `payload_len` unchanged bytes, with the stream seeded by `seed`.
  ///
  /// # Errors
  ///
  /// Returns [`ZeroRunError::HeaderLengthMismatch`] when the headers differ
  /// in length.
  pub fn new(seed: u32, old_header: &'a [u8], new_header: &'a [u8], payload_len: usize) -> Result<Self, ZeroRunError> {
    if old_header.len() != new_header.len() {
      return Err(ZeroRunError::HeaderLengthMismatch { old: old_header.len(), new: new_header.len() });
    }
    Ok(Self { seed, old_header, new_header, payload_len })
  }

  /// Length of the unchanged payload.
  #[inline]
  #[must_use]
  pub const fn payload_len(&self) -> usize {
    self.payload_len
  }

  /// XOR of the old and new header registers.
  #[inline]
  #[must_use]
  pub fn header_delta(&self, ctx: &CrcContext) -> u32 {
    ctx.crc_of_buffer(self.seed, self.old_header) ^ ctx.crc_of_buffer(self.seed, self.new_header)
  }

  /// New whole-buffer register given the old one, via the zero-run operators.
  ///
  /// # Errors
  ///
  /// Returns [`ZeroRunError::CountOutOfRange`] when the payload is longer
  /// than `ctx.max_count()`.
  pub fn apply(&self, ctx: &CrcContext, old_full_crc: u32) -> Result<u32, ZeroRunError> {
    let count = self.payload_count(ctx)?;
    let xor_crc = ctx.crc_after_zero_run(self.header_delta(ctx), count)?;
    Ok(old_full_crc ^ xor_crc)
  }

  /// New whole-buffer register given the old one, via a precompiled map.
  ///
  /// # Errors
  ///
  /// Returns [`ZeroRunError::MapCountMismatch`] when `map` was built for a
  /// run length other than the payload length, or
  /// [`ZeroRunError::CountOutOfRange`] when the payload length does not fit
  /// in a map count at all.
  pub fn apply_mapped(&self, ctx: &CrcContext, old_full_crc: u32, map: &FixedZeroMap) -> Result<u32, ZeroRunError> {
    let count = u32::try_from(self.payload_len)
      .map_err(|_| ZeroRunError::CountOutOfRange { count: self.payload_len as u64, max: map.count() })?;
    let xor_crc = map.apply_checked(self.header_delta(ctx), count)?;
    Ok(old_full_crc ^ xor_crc)
  }

  fn payload_count(&self, ctx: &CrcContext) -> Result<u32, ZeroRunError> {
    let out_of_range = || ZeroRunError::CountOutOfRange { count: self.payload_len as u64, max: ctx.max_count() };
    let count = u32::try_from(self.payload_len).map_err(|_| out_of_range())?;
    if count > ctx.max_count() {
      return Err(out_of_range());
    }
    Ok(count)
  }
}

/// Recompute `crc(seed, new_header || payload)` from `old_full_crc`
/// without touching the payload.
///
/// # Errors
///
/// See [`HeaderEdit::new`] and [`HeaderEdit::apply`].
pub fn crc_after_header_edit(
  ctx: &CrcContext,
  seed: u32,
  old_full_crc: u32,
  old_header: &[u8],
  new_header: &[u8],
  payload_len: usize,
) -> Result<u32, ZeroRunError> {
  HeaderEdit::new(seed, old_header, new_header, payload_len)?.apply(ctx, old_full_crc)
}

/// [`crc_after_header_edit`] using a fixed map built for `payload_len`.
///
/// # Errors
///
/// See [`HeaderEdit::new`] and [`HeaderEdit::apply_mapped`].
pub fn crc_after_header_edit_mapped(
  ctx: &CrcContext,
  seed: u32,
  old_full_crc: u32,
  old_header: &[u8],
  new_header: &[u8],
  map: &FixedZeroMap,
) -> Result<u32, ZeroRunError> {
  HeaderEdit::new(seed, old_header, new_header, map.count() as usize)?.apply_mapped(ctx, old_full_crc, map)
}
