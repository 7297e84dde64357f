//! Property tests for the zero-run algebra.
//!
//! 1. **Linearity**: `Z_N(a ^ b) == Z_N(a) ^ Z_N(b)`
//! 2. **Zero fixed point**: `Z_N(0) == 0`
//! 3. **Ground truth**: `Z_N(seed)` equals feeding `N` zero bytes, checked
//!    against the bitwise reference
//! 4. **Map equivalence**: a map built for `K` agrees with `Z_K`
//! 5. **Header-edit equivalence**: recomputation equals a full rescan

#![cfg(all(test, not(miri)))]

extern crate std;

use std::{sync::LazyLock, vec::Vec};

use crc_fast::CrcAlgorithm;
use proptest::prelude::*;

use crate::{
  CrcContext, constants::crc32::POLYNOMIAL, crc_after_header_edit, crc_after_header_edit_mapped,
  reference::{crc32_bitwise, crc32_zeros_bitwise},
};

static CTX: LazyLock<CrcContext> = LazyLock::new(|| CrcContext::with_count_bits(16).unwrap());

fn count() -> impl Strategy<Value = u32> {
  0u32..=65_535
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(256))]

  #[test]
  fn zero_run_is_linear(a in any::<u32>(), b in any::<u32>(), n in count()) {
    let lhs = CTX.crc_after_zero_run(a ^ b, n).unwrap();
    let rhs = CTX.crc_after_zero_run(a, n).unwrap() ^ CTX.crc_after_zero_run(b, n).unwrap();
    prop_assert_eq!(lhs, rhs);
  }

  #[test]
  fn zero_is_fixed_point(n in count()) {
    prop_assert_eq!(CTX.crc_after_zero_run(0, n).unwrap(), 0);
  }

  #[test]
  fn zero_run_matches_bitwise_reference(seed in any::<u32>(), n in 0u32..=2048) {
    let fast = CTX.crc_after_zero_run(seed, n).unwrap();
    prop_assert_eq!(fast, crc32_zeros_bitwise(POLYNOMIAL, seed, u64::from(n)));
  }

  #[test]
  fn zero_runs_compose(seed in any::<u32>(), a in 0u32..=30_000, b in 0u32..=30_000) {
    let stepwise = CTX.crc_after_zero_run(CTX.crc_after_zero_run(seed, a).unwrap(), b).unwrap();
    prop_assert_eq!(stepwise, CTX.crc_after_zero_run(seed, a + b).unwrap());
  }

  #[test]
  fn buffer_matches_bitwise_reference(seed in any::<u32>(), data in proptest::collection::vec(any::<u8>(), 0..=512)) {
    prop_assert_eq!(CTX.crc_of_buffer(seed, &data), crc32_bitwise(POLYNOMIAL, seed, &data));
  }

  #[test]
  fn buffer_matches_crc_fast_rust(data in proptest::collection::vec(any::<u8>(), 0..=4096)) {
    let ours = CTX.crc_of_buffer(!0, &data) ^ !0;
    let reference = crc_fast::checksum(CrcAlgorithm::Crc32IsoHdlc, &data) as u32;
    prop_assert_eq!(ours, reference);
  }

  #[test]
  fn header_edit_matches_rescan(
    seed in any::<u32>(),
    old_header in proptest::collection::vec(any::<u8>(), 0..=32),
    mask in proptest::collection::vec(any::<u8>(), 32),
    payload in proptest::collection::vec(any::<u8>(), 0..=2048),
  ) {
    let new_header: Vec<u8> = old_header.iter().zip(&mask).map(|(h, m)| h ^ m).collect();

    let mut old_buf = old_header.clone();
    old_buf.extend_from_slice(&payload);
    let mut new_buf = new_header.clone();
    new_buf.extend_from_slice(&payload);

    let old_full = CTX.crc_of_buffer(seed, &old_buf);
    let got = crc_after_header_edit(&CTX, seed, old_full, &old_header, &new_header, payload.len()).unwrap();
    prop_assert_eq!(got, CTX.crc_of_buffer(seed, &new_buf));
  }
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(16))]

  #[test]
  fn fixed_map_matches_zero_run(k in count(), seeds in proptest::collection::vec(any::<u32>(), 1..=64)) {
    let map = CTX.build_fixed_zero_map(k).unwrap();
    for seed in seeds {
      prop_assert_eq!(CTX.crc_after_fixed_zero_run(seed, &map), CTX.crc_after_zero_run(seed, k).unwrap());
    }
  }

  #[test]
  fn mapped_header_edit_matches_rescan(
    seed in any::<u32>(),
    old_header in proptest::collection::vec(any::<u8>(), 8),
    new_header in proptest::collection::vec(any::<u8>(), 8),
    payload in proptest::collection::vec(any::<u8>(), 0..=1500),
  ) {
    let map = CTX.build_fixed_zero_map(payload.len() as u32).unwrap();

    let mut old_buf = old_header.clone();
    old_buf.extend_from_slice(&payload);
    let mut new_buf = new_header.clone();
    new_buf.extend_from_slice(&payload);

    let old_full = CTX.crc_of_buffer(seed, &old_buf);
    let got = crc_after_header_edit_mapped(&CTX, seed, old_full, &old_header, &new_header, &map).unwrap();
    prop_assert_eq!(got, CTX.crc_of_buffer(seed, &new_buf));
  }
}
