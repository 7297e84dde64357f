use std::io::Cursor;

use crc_incremental::{
  ByteTable, CrcContext, HeaderEdit, ZeroRunError, crc_after_header_edit, crc_after_header_edit_mapped,
  reference::crc32_zeros_bitwise,
  validate::{self, HarnessConfig},
};

fn gen_bytes(len: usize, seed: u64) -> Vec<u8> {
  let mut out = vec![0u8; len];
  let mut x = seed;
  for b in &mut out {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    *b = (x as u8).wrapping_add((x >> 8) as u8);
  }
  out
}

fn ctx() -> CrcContext {
  CrcContext::with_count_bits(16).unwrap()
}

#[test]
fn zero_run_scenarios() {
  let ctx = ctx();
  assert_eq!(ctx.crc_after_zero_run(0x1234_5678, 0), Ok(0x1234_5678));
  assert_eq!(ctx.crc_after_zero_run(0, 1000), Ok(0));
  assert_eq!(ctx.crc_after_zero_run(1, 1), Ok(ctx.crc_of_buffer(1, &[0x00])));
}

#[test]
fn fixed_map_scenario() {
  let ctx = ctx();
  let map = ctx.build_fixed_zero_map(1492).unwrap();
  assert_eq!(map.count(), 1492);
  let seed = 0xABCD_EF01;
  assert_eq!(Ok(ctx.crc_after_fixed_zero_run(seed, &map)), ctx.crc_after_zero_run(seed, 1492));
}

#[test]
fn header_flip_scenario() {
  let ctx = ctx();
  let seed = 0x1234_5678;
  let old_buf = vec![0u8; 8 + 1492];
  let mut new_buf = old_buf.clone();
  new_buf[1] ^= 0x55;

  let old_full = ctx.crc_of_buffer(seed, &old_buf);
  let direct = ctx.crc_of_buffer(seed, &new_buf);

  let header_delta = ctx.crc_of_buffer(seed, &old_buf[..8]) ^ ctx.crc_of_buffer(seed, &new_buf[..8]);
  let xor_crc = ctx.crc_after_zero_run(header_delta, 1492).unwrap();
  assert_eq!(old_full ^ xor_crc, direct);

  let via_fn = crc_after_header_edit(&ctx, seed, old_full, &old_buf[..8], &new_buf[..8], 1492).unwrap();
  assert_eq!(via_fn, direct);

  let map = ctx.build_fixed_zero_map(1492).unwrap();
  let via_map = crc_after_header_edit_mapped(&ctx, seed, old_full, &old_buf[..8], &new_buf[..8], &map).unwrap();
  assert_eq!(via_map, direct);
}

#[test]
fn header_edit_invariants() {
  let ctx = ctx();
  let lengths = [0usize, 1, 2, 3, 4, 7, 8, 15, 16, 63, 64, 255, 256, 1024, 1492, 4096];
  let seeds = [0u32, 1, 0x1234_5678, 0xFFFF_FFFF];

  for &len in &lengths {
    for &seed in &seeds {
      let payload = gen_bytes(len, u64::from(seed) ^ len as u64 ^ 0xd1b5_4a32_d192_ed03);
      let old_header = gen_bytes(8, len as u64 + 1);
      let new_header = gen_bytes(8, len as u64 + 2);

      let old_full = ctx.crc_of_buffer(ctx.crc_of_buffer(seed, &old_header), &payload);
      let new_full = ctx.crc_of_buffer(ctx.crc_of_buffer(seed, &new_header), &payload);

      let edit = HeaderEdit::new(seed, &old_header, &new_header, payload.len()).unwrap();
      assert_eq!(edit.apply(&ctx, old_full), Ok(new_full), "header edit mismatch at len={len} seed={seed:#x}");
    }
  }
}

#[test]
fn zero_run_matches_reference_across_exponents() {
  let ctx = ctx();
  let table = ByteTable::crc32();
  for z in 0..16u32 {
    let count = (1u32 << z) - 1;
    for c in [0u32, 5, 17, 31] {
      let seed = 1u32 << c;
      let expected = table.crc_of_zeros(seed, u64::from(count));
      assert_eq!(ctx.crc_after_zero_run(seed, count), Ok(expected), "z={z} c={c}");
    }
  }
  assert_eq!(ctx.crc_after_zero_run(0x8000_0001, 65_535), Ok(crc32_zeros_bitwise(0xEDB8_8320, 0x8000_0001, 65_535)));
}

#[test]
fn preconditions_are_checked() {
  let ctx = ctx();
  assert_eq!(ctx.crc_after_zero_run(1, 65_536), Err(ZeroRunError::CountOutOfRange { count: 65_536, max: 65_535 }));
  assert!(matches!(CrcContext::with_count_bits(0), Err(ZeroRunError::InvalidCountBits { bits: 0 })));

  let map = ctx.build_fixed_zero_map(10).unwrap();
  assert_eq!(map.apply_checked(1, 11), Err(ZeroRunError::MapCountMismatch { map_count: 10, requested: 11 }));
}

#[test]
fn wider_count_bits_extend_range() {
  let ctx = CrcContext::with_count_bits(18).unwrap();
  assert_eq!(ctx.max_count(), 262_143);
  let table = ctx.table();
  assert_eq!(ctx.crc_after_zero_run(0xCAFE_F00D, 100_000), Ok(table.crc_of_zeros(0xCAFE_F00D, 100_000)));
}

#[test]
fn generated_record_file_validates() {
  let cfg = HarnessConfig::default();
  let mut file = Vec::new();
  validate::generate_records(&mut file, 64, 7, &cfg).unwrap();

  let report = validate::validate_records(&ctx(), Cursor::new(file), &cfg).unwrap();
  assert!(report.passed(), "{:?}", report.mismatches);
  assert_eq!(report.tried, 64);
  assert!(report.full_mapped >= 16);
}

#[test]
fn self_test_passes() {
  let cfg = HarnessConfig { self_test_exponents: 10, ..HarnessConfig::default() };
  let report = validate::self_test(&ctx(), &cfg).unwrap();
  assert!(report.passed());
}
