//! Re-tag a packet header without rescanning its payload.
//!
//! Run with: `cargo run --example header_edit -p crc-incremental`

use crc_incremental::{CrcContext, HeaderEdit};

const HEADER: usize = 8;
const PACKET: usize = 1500;

fn main() {
  println!("=== Incremental Header Edit ===\n");

  let ctx = CrcContext::init();
  let map = ctx.build_fixed_zero_map((PACKET - HEADER) as u32).expect("payload fits the operator range");

  let mut packet: Vec<u8> = (0..PACKET).map(|i| (i * 7) as u8).collect();
  let seed = !0u32;
  let mut crc = ctx.crc_of_buffer(seed, &packet);
  println!("initial CRC-32: 0x{:08X}", crc ^ !0);

  for sequence in 1u32..=3 {
    let old_header: [u8; HEADER] = packet[..HEADER].try_into().expect("header slice");
    packet[4..HEADER].copy_from_slice(&sequence.to_be_bytes());

    let edit = HeaderEdit::new(seed, &old_header, &packet[..HEADER], PACKET - HEADER).expect("same header length");
    crc = edit.apply_mapped(&ctx, crc, &map).expect("map built for payload length");

    let rescanned = ctx.crc_of_buffer(seed, &packet);
    println!("seq {sequence}: incremental 0x{:08X}  rescanned 0x{:08X}", crc ^ !0, rescanned ^ !0);
    assert_eq!(crc, rescanned);
  }
}
