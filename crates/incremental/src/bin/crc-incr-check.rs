//! Validation harness for incremental CRC-32 recomputation.
//!
//! - No path argument: self-test the zero-run operators and a fixed map
//!   against byte-by-byte zero application.
//! - One path argument: read length-prefixed records from the file, edit each
//!   header, and cross-check the recomputed CRC against a full rescan.

use std::{
  env, fs,
  io::{self, BufReader, BufWriter, Write},
  path::PathBuf,
  process::ExitCode,
};

use crc_incremental::{
  CrcContext,
  validate::{self, HarnessConfig},
};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, Default)]
struct Args {
  input: Option<PathBuf>,
  generate: Option<(PathBuf, usize)>,
  count_bits: Option<u8>,
  dump_tables: bool,
  harness: HarnessConfig,
}

fn parse_args() -> Result<Args, String> {
  let mut args = Args::default();
  let mut it = env::args().skip(1);
  while let Some(arg) = it.next() {
    match arg.as_str() {
      "--" => continue,
      "--dump-tables" => args.dump_tables = true,
      "--header-size" => args.harness.header_size = parse_value(&arg, it.next())?,
      "--max-buffer" => args.harness.max_buffer = parse_value(&arg, it.next())?,
      "--fixed-run" => args.harness.fixed_run = parse_value(&arg, it.next())?,
      "--self-test-exponents" => args.harness.self_test_exponents = parse_value(&arg, it.next())?,
      "--count-bits" => args.count_bits = Some(parse_value(&arg, it.next())?),
      "--seed" => {
        let Some(value) = it.next() else {
          return Err("--seed requires a value".to_owned());
        };
        let digits = value.trim_start_matches("0x").trim_start_matches("0X");
        args.harness.seed = u32::from_str_radix(digits, 16).map_err(|e| format!("Invalid --seed {value}: {e}"))?;
      }
      "--generate" => {
        let Some(path) = it.next() else {
          return Err("--generate requires PATH COUNT".to_owned());
        };
        let count = parse_value("--generate", it.next())?;
        args.generate = Some((PathBuf::from(path), count));
      }
      "--help" | "-h" => {
        print_help();
        return Err(String::new());
      }
      other if other.starts_with('-') => return Err(format!("Unknown arg: {other}")),
      path => {
        if args.input.is_some() {
          return Err(format!("Unexpected extra argument: {path}"));
        }
        args.input = Some(PathBuf::from(path));
      }
    }
  }
  Ok(args)
}

fn parse_value<T: core::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, String>
where
  T::Err: core::fmt::Display,
{
  let Some(value) = value else {
    return Err(format!("{flag} requires a value"));
  };
  value.trim().parse::<T>().map_err(|e| format!("Invalid {flag} {value}: {e}"))
}

fn print_help() {
  eprintln!(
    "\
crc-incr-check: cross-check incremental CRC-32 recomputation

USAGE:
  crc-incr-check [OPTIONS] [DATAFILE]

Without DATAFILE, runs the self-test. With DATAFILE, validates every
length-prefixed record (u32 little-endian length, then payload).

OPTIONS:
  --header-size N           Edited header size in bytes (default: 8)
  --max-buffer N            Largest record buffer (default: 1500)
  --fixed-run N             Zero-run length for the fixed map (default: 1492)
  --seed HEX                Register seed (default: 12345678)
  --count-bits N            Zero-run count bit-width (default: CRC_INCR_COUNT_BITS or 16)
  --self-test-exponents N   Self-test walks runs up to 2^N - 1 (default: 16)
  --dump-tables             Print every zero-run operator column
  --generate PATH COUNT     Write COUNT synthetic records to PATH and exit
  -h, --help                Print help

Logging is controlled by RUST_LOG (default: info)."
  );
}

fn print_intro() {
  println!("crc-incr-check [DATAFILE]\n");
  match fs::read_to_string("README.txt") {
    Ok(text) => print!("{text}"),
    Err(_) => println!("Missing README.txt; skipping introduction."),
  }
}

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn dump_tables(ctx: &CrcContext) -> io::Result<()> {
  let mut out = BufWriter::new(io::stdout().lock());
  for (z, c, word) in ctx.operators().iter() {
    writeln!(out, "zero_op[{z:2}][{c:2}] = 0x{word:08X}")?;
  }
  out.flush()
}

fn run_generate(path: &PathBuf, count: usize, cfg: &HarnessConfig) -> io::Result<()> {
  let mut out = BufWriter::new(fs::File::create(path)?);
  validate::generate_records(&mut out, count, 0xC0FF_EE00_5EED, cfg)?;
  out.flush()?;
  println!("Wrote {count} records to {}", path.display());
  Ok(())
}

fn run_self_test(ctx: &CrcContext, cfg: &HarnessConfig) -> bool {
  println!("self_test(count_bits={}, fixed_run={})", ctx.count_bits(), cfg.fixed_run);
  match validate::self_test(ctx, cfg) {
    Ok(report) => {
      println!(
        "Checked {} zero-run counts, {} fixed-map registers",
        report.zero_run_checks, report.fixed_map_checks
      );
      if let Some(m) = report.first_mismatch {
        println!("Error: {} bit {}: expected 0x{:08X} != fast 0x{:08X}", m.path.as_str(), m.index, m.expected, m.fast);
      }
      report.passed()
    }
    Err(e) => {
      eprintln!("self-test failed: {e}");
      false
    }
  }
}

fn run_file(ctx: &CrcContext, path: &PathBuf, cfg: &HarnessConfig) -> bool {
  println!("validate_records({})", path.display());
  let file = match fs::File::open(path) {
    Ok(f) => f,
    Err(e) => {
      println!("Failed to open {}: {e}", path.display());
      return false;
    }
  };

  match validate::validate_records(ctx, BufReader::new(file), cfg) {
    Ok(report) => {
      for m in &report.mismatches {
        println!(
          "{}: record {} expected 0x{:08X} fast 0x{:08X} (xor 0x{:08X})",
          m.path.as_str(),
          m.index,
          m.expected,
          m.fast,
          m.expected ^ m.fast
        );
      }
      println!(
        "Tested {} buffers, minSize = {}, maxSize = {}, fullMapped = {}",
        report.tried, report.min_size, report.max_size, report.full_mapped
      );
      report.passed()
    }
    Err(e) => {
      eprintln!("validation failed: {e}");
      false
    }
  }
}

fn main() -> ExitCode {
  let args = match parse_args() {
    Ok(args) => args,
    Err(msg) if msg.is_empty() => return ExitCode::SUCCESS,
    Err(msg) => {
      eprintln!("{msg}");
      return ExitCode::FAILURE;
    }
  };
  init_tracing();

  if let Some((path, count)) = &args.generate {
    return match run_generate(path, *count, &args.harness) {
      Ok(()) => ExitCode::SUCCESS,
      Err(e) => {
        eprintln!("failed to write {}: {e}", path.display());
        ExitCode::FAILURE
      }
    };
  }

  print_intro();

  let ctx = match args.count_bits {
    Some(bits) => match CrcContext::with_count_bits(bits) {
      Ok(ctx) => ctx,
      Err(e) => {
        eprintln!("{e}");
        return ExitCode::FAILURE;
      }
    },
    None => CrcContext::init(),
  };

  if args.dump_tables {
    if let Err(e) = dump_tables(&ctx) {
      eprintln!("failed to print tables: {e}");
      return ExitCode::FAILURE;
    }
  }

  let passed = match &args.input {
    Some(path) => run_file(&ctx, path, &args.harness),
    None => run_self_test(&ctx, &args.harness),
  };

  println!("Done.");
  if passed { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
