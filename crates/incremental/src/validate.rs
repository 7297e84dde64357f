//! Cross-checks of the fast paths against brute-force recomputation.
//!
//! Two modes:
//! - [`self_test`]: walks single-bit registers through zero runs byte by byte
//!   and compares every intermediate count against the operator family, then
//!   checks a fixed map bit by bit.
//! - [`validate_records`]: reads length-prefixed buffers, edits their headers,
//!   and compares the header-edit recomputation against a full rescan.
//!
//! # Record framing
//!
//! ```text
//! [len: u32 little-endian][payload: len bytes]
//! ```
//!
//! `len` is clamped to `[header_size, max_buffer]` before the payload is read,
//! and exactly the clamped number of bytes is consumed. A truncated record ends
//! the stream.

use std::{
  io::{self, Read, Write},
  vec::Vec,
};

use crate::{
  CrcContext, HeaderEdit,
  constants::crc32::{CRC_BIT_WIDTH, DEFAULT_COUNT_BITS},
};

/// Knobs for the validation harness.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HarnessConfig {
  /// Size of the edited header at the start of each buffer.
  pub header_size: usize,
  /// Largest buffer read from a record.
  pub max_buffer: usize,
  /// Register seed for every checksum.
  pub seed: u32,
  /// Zero-run length compiled into the fixed map.
  pub fixed_run: u32,
  /// Self-test walks zero runs up to `2^self_test_exponents - 1` bytes,
  /// capped by the context width. Defaults to [`DEFAULT_COUNT_BITS`].
  pub self_test_exponents: u8,
}

impl Default for HarnessConfig {
  fn default() -> Self {
    Self {
      header_size: 8,
      max_buffer: 1500,
      seed: 0x1234_5678,
      fixed_run: 1492,
      self_test_exponents: DEFAULT_COUNT_BITS,
    }
  }
}

/// Which fast path disagreed with the rescan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FastPath {
  /// [`CrcContext::crc_after_zero_run`].
  ZeroRun,
  /// [`CrcContext::crc_after_fixed_zero_run`].
  FixedMap,
}

impl FastPath {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::ZeroRun => "zero-run",
      Self::FixedMap => "fixed-map",
    }
  }
}

/// A fast-path result that disagreed with brute force.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mismatch {
  /// Path that produced `fast`.
  pub path: FastPath,
  /// Record index (file mode) or starting bit position (self-test).
  pub index: usize,
  /// Brute-force register.
  pub expected: u32,
  /// Fast-path register.
  pub fast: u32,
}

/// Outcome of [`self_test`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelfTestReport {
  /// Zero-run counts compared against byte-by-byte application.
  pub zero_run_checks: u64,
  /// Single-bit registers compared through the fixed map.
  pub fixed_map_checks: u64,
  /// First disagreement, if any.
  pub first_mismatch: Option<Mismatch>,
}

impl SelfTestReport {
  #[must_use]
  pub const fn passed(&self) -> bool {
    self.first_mismatch.is_none()
  }
}

/// Outcome of [`validate_records`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
  /// Buffers checked.
  pub tried: u64,
  /// Smallest (clamped) buffer size seen.
  pub min_size: usize,
  /// Largest (clamped) buffer size seen.
  pub max_size: usize,
  /// Buffers whose payload length matched the fixed map.
  pub full_mapped: u64,
  /// Every disagreement found.
  pub mismatches: Vec<Mismatch>,
}

impl ValidationReport {
  #[must_use]
  pub fn passed(&self) -> bool {
    self.mismatches.is_empty()
  }

  fn record_size(&mut self, size: usize) {
    if self.tried == 0 {
      self.min_size = size;
      self.max_size = size;
    } else {
      self.min_size = self.min_size.min(size);
      self.max_size = self.max_size.max(size);
    }
    self.tried += 1;
  }
}

/// Compare the zero-run operators and a fixed map against brute force.
///
/// For each register bit `c`, walks `1 << c` forward one zero byte at a time
/// up to `2^e - 1` bytes, where `e = min(cfg.self_test_exponents, B)`, and
/// checks `crc_after_zero_run` at every count. Then checks the map for
/// `cfg.fixed_run` against `crc_after_zero_run` for each single-bit register.
/// Stops at the first mismatch.
///
/// # Errors
///
/// Returns an error when `cfg.fixed_run` exceeds the context's maximum.
pub fn self_test(ctx: &CrcContext, cfg: &HarnessConfig) -> Result<SelfTestReport, crate::ZeroRunError> {
  let mut report = SelfTestReport::default();
  let table = ctx.table();
  let exponents = cfg.self_test_exponents.min(ctx.count_bits());
  let limit = crate::config::max_count_for(exponents);

  for c in 0..CRC_BIT_WIDTH {
    let start = 1u32 << c;
    let mut slow = start;
    for count in 0..=limit {
      let fast = ctx.crc_after_zero_run(start, count)?;
      report.zero_run_checks += 1;
      if fast != slow {
        tracing::warn!(bit = c, count, expected = slow, fast, "zero-run mismatch");
        report.first_mismatch = Some(Mismatch { path: FastPath::ZeroRun, index: c, expected: slow, fast });
        return Ok(report);
      }
      slow = table.update_byte(slow, 0);
    }
  }

  let map = ctx.build_fixed_zero_map(cfg.fixed_run)?;
  for c in 0..CRC_BIT_WIDTH {
    let start = 1u32 << c;
    let expected = ctx.crc_after_zero_run(start, cfg.fixed_run)?;
    let fast = ctx.crc_after_fixed_zero_run(start, &map);
    report.fixed_map_checks += 1;
    if fast != expected {
      tracing::warn!(bit = c, expected, fast, "fixed-map mismatch");
      report.first_mismatch = Some(Mismatch { path: FastPath::FixedMap, index: c, expected, fast });
      return Ok(report);
    }
  }

  tracing::debug!(zero_run = report.zero_run_checks, fixed_map = report.fixed_map_checks, "self-test passed");
  Ok(report)
}

/// Iterator over length-prefixed records.
#[derive(Debug)]
pub struct RecordReader<R> {
  inner: R,
  min_len: usize,
  max_len: usize,
}

impl<R: Read> RecordReader<R> {
  /// Read records, clamping each length into `[min_len, max_len]`.
  pub fn new(inner: R, min_len: usize, max_len: usize) -> Self {
    Self { inner, min_len, max_len: max_len.max(min_len) }
  }

  fn read_record(&mut self) -> io::Result<Option<Vec<u8>>> {
    let mut len_bytes = [0u8; 4];
    if !read_exact_or_eof(&mut self.inner, &mut len_bytes)? {
      return Ok(None);
    }
    let declared = u32::from_le_bytes(len_bytes) as usize;
    let len = declared.clamp(self.min_len, self.max_len);
    if len != declared {
      tracing::trace!(declared, len, "record length clamped");
    }

    let mut buf = std::vec![0u8; len];
    if !read_exact_or_eof(&mut self.inner, &mut buf)? {
      return Ok(None);
    }
    Ok(Some(buf))
  }
}

impl<R: Read> Iterator for RecordReader<R> {
  type Item = io::Result<Vec<u8>>;

  fn next(&mut self) -> Option<Self::Item> {
    self.read_record().transpose()
  }
}

/// `read_exact`, mapping a clean or partial end of stream to `Ok(false)`.
fn read_exact_or_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<bool> {
  match reader.read_exact(buf) {
    Ok(()) => Ok(true),
    Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
    Err(e) => Err(e),
  }
}

/// Write one record in the framing [`RecordReader`] expects.
///
/// # Errors
///
/// Returns [`io::ErrorKind::InvalidInput`] when `data` is longer than
/// `u32::MAX`, or any error from `writer`.
pub fn write_record<W: Write>(writer: &mut W, data: &[u8]) -> io::Result<()> {
  let len = u32::try_from(data.len()).map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "record too long"))?;
  writer.write_all(&len.to_le_bytes())?;
  writer.write_all(data)
}

/// Write `count` pseudo-random records sized within `[header_size, max_buffer]`.
///
/// Every fourth record carries exactly `header_size + fixed_run` bytes (when
/// that fits) so the fixed-map path is exercised.
///
/// # Errors
///
/// Propagates errors from `writer`.
pub fn generate_records<W: Write>(writer: &mut W, count: usize, seed: u64, cfg: &HarnessConfig) -> io::Result<()> {
  let mut rng = XorShift64::new(seed);
  let min = cfg.header_size;
  let max = cfg.max_buffer.max(min);
  let mapped = min.saturating_add(cfg.fixed_run as usize);

  for i in 0..count {
    let len = if i % 4 == 0 && mapped <= max { mapped } else { min + (rng.next_u64() as usize) % (max - min + 1) };
    let data: Vec<u8> = (0..len).map(|_| rng.next_u64() as u8).collect();
    write_record(writer, &data)?;
  }
  Ok(())
}

/// The header mutation applied to every buffer in file mode.
///
/// Touches bytes 1 through 4 of `header`; positions past its end are skipped,
/// so passing exactly the header slice never reaches the payload.
pub fn mutate_header(header: &mut [u8]) {
  let b0 = header.first().copied().unwrap_or(0);
  if let Some(b) = header.get_mut(1) {
    *b ^= 0x55;
  }
  if let Some(b) = header.get_mut(2) {
    *b = b.wrapping_add(0x73);
  }
  if let Some(b) = header.get_mut(3) {
    *b = b.wrapping_add(0x1d);
  }
  if let Some(b) = header.get_mut(4) {
    *b = b.wrapping_add(b0);
  }
}

/// Check the header-edit recomputation on every record from `reader`.
///
/// # Errors
///
/// Returns I/O errors from `reader`. Precondition failures (payload longer
/// than the context supports) surface as [`io::ErrorKind::InvalidInput`].
pub fn validate_records<R: Read>(ctx: &CrcContext, reader: R, cfg: &HarnessConfig) -> io::Result<ValidationReport> {
  let map = ctx.build_fixed_zero_map(cfg.fixed_run).map_err(invalid_input)?;
  let mut report = ValidationReport::default();

  for (index, record) in RecordReader::new(reader, cfg.header_size, cfg.max_buffer).enumerate() {
    let old_buf = record?;
    let header_len = cfg.header_size.min(old_buf.len());
    let mut new_buf = old_buf.clone();
    if let Some(header) = new_buf.get_mut(..header_len) {
      mutate_header(header);
    }
    report.record_size(old_buf.len());

    let old_crc = ctx.crc_of_buffer(cfg.seed, &old_buf);
    let new_crc = ctx.crc_of_buffer(cfg.seed, &new_buf);

    let (old_header, payload) = old_buf.split_at(header_len);
    let new_header = new_buf.get(..header_len).unwrap_or_default();
    let edit = HeaderEdit::new(cfg.seed, old_header, new_header, payload.len()).map_err(invalid_input)?;

    let fast = edit.apply(ctx, old_crc).map_err(invalid_input)?;
    if fast != new_crc {
      tracing::warn!(record = index, old_crc, new_crc, fast, "zero-run recomputation mismatch");
      report.mismatches.push(Mismatch { path: FastPath::ZeroRun, index, expected: new_crc, fast });
    }

    if payload.len() == map.count() as usize {
      report.full_mapped += 1;
      let fast = edit.apply_mapped(ctx, old_crc, &map).map_err(invalid_input)?;
      if fast != new_crc {
        tracing::warn!(record = index, old_crc, new_crc, fast, "fixed-map recomputation mismatch");
        report.mismatches.push(Mismatch { path: FastPath::FixedMap, index, expected: new_crc, fast });
      }
    }
    tracing::trace!(record = index, len = old_buf.len(), "record checked");
  }

  Ok(report)
}

fn invalid_input(err: crate::ZeroRunError) -> io::Error {
  io::Error::new(io::ErrorKind::InvalidInput, err)
}

/// Deterministic generator for synthetic records.
struct XorShift64(u64);

impl XorShift64 {
  fn new(seed: u64) -> Self {
    Self(if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed })
  }

  fn next_u64(&mut self) -> u64 {
    let mut x = self.0;
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    self.0 = x;
    x
  }
}
