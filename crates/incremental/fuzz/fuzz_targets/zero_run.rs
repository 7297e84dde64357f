//! Fuzz target for zero-run operators.
//!
//! Tests that:
//! - Out-of-range counts are rejected, never truncated
//! - Linearity holds for arbitrary registers
//! - Splitting a run into two runs gives the same register

#![no_main]

use std::sync::LazyLock;

use arbitrary::Arbitrary;
use crc_incremental::{CrcContext, ZeroRunError};
use libfuzzer_sys::fuzz_target;

static CTX: LazyLock<CrcContext> = LazyLock::new(|| CrcContext::with_count_bits(16).unwrap());

#[derive(Arbitrary, Debug)]
struct Input {
  a: u32,
  b: u32,
  count: u32,
  split: u32,
}

fuzz_target!(|input: Input| {
  let ctx = &*CTX;
  let max = ctx.max_count();

  if input.count > max {
    assert_eq!(
      ctx.crc_after_zero_run(input.a, input.count),
      Err(ZeroRunError::CountOutOfRange { count: u64::from(input.count), max })
    );
    return;
  }

  let za = ctx.crc_after_zero_run(input.a, input.count).unwrap();
  let zb = ctx.crc_after_zero_run(input.b, input.count).unwrap();
  assert_eq!(ctx.crc_after_zero_run(input.a ^ input.b, input.count).unwrap(), za ^ zb, "linearity");

  let first = input.split % (input.count + 1);
  let mid = ctx.crc_after_zero_run(input.a, first).unwrap();
  assert_eq!(ctx.crc_after_zero_run(mid, input.count - first).unwrap(), za, "split run");

  // Check small runs against byte-by-byte zero feeding.
  let small = input.count % 512;
  assert_eq!(
    ctx.crc_after_zero_run(input.a, small).unwrap(),
    ctx.table().crc_of_zeros(input.a, u64::from(small)),
    "brute force"
  );
});
