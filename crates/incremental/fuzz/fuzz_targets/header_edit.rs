//! Fuzz target for the header-edit recomputation.
//!
//! Tests that:
//! - Recomputing after an arbitrary in-place header edit equals a full rescan
//! - The fixed-map path agrees with the operator path

#![no_main]

use std::sync::LazyLock;

use arbitrary::Arbitrary;
use crc_incremental::{CrcContext, HeaderEdit};
use libfuzzer_sys::fuzz_target;

static CTX: LazyLock<CrcContext> = LazyLock::new(|| CrcContext::with_count_bits(16).unwrap());

#[derive(Arbitrary, Debug)]
struct Input {
  seed: u32,
  header_len: u8,
  edits: Vec<(u8, u8)>,
  buf: Vec<u8>,
}

fuzz_target!(|input: Input| {
  let ctx = &*CTX;
  let old_buf = input.buf;
  let header_len = usize::from(input.header_len).min(old_buf.len());
  if old_buf.len() - header_len > ctx.max_count() as usize {
    return;
  }

  let mut new_buf = old_buf.clone();
  if header_len > 0 {
    for (pos, xor) in input.edits {
      new_buf[usize::from(pos) % header_len] ^= xor;
    }
  }

  let (old_header, payload) = old_buf.split_at(header_len);
  let new_header = &new_buf[..header_len];

  let old_full = ctx.crc_of_buffer(input.seed, &old_buf);
  let expected = ctx.crc_of_buffer(input.seed, &new_buf);

  let edit = HeaderEdit::new(input.seed, old_header, new_header, payload.len()).unwrap();
  assert_eq!(edit.apply(ctx, old_full).unwrap(), expected, "zero-run path mismatch");

  let map = ctx.build_fixed_zero_map(payload.len() as u32).unwrap();
  assert_eq!(edit.apply_mapped(ctx, old_full, &map).unwrap(), expected, "fixed-map path mismatch");
});
