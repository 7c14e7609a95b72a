//! # Output Module
//!
//! All user-facing lines of a batch run: the banner, per-file progress, the
//! failure list and the summary. Everything goes to stdout and is silenced by
//! `-q`, except the failure list, which stays as bare paths for scripting.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::{BatchSummary, FileOutcome, FileReport};

/// Symbols used in output
pub mod symbols {
  /// Success
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Warning / no insertion point
  pub const WARNING: &str = "!";
  /// Informational
  pub const INFO: &str = "-";
  /// Inserted / pending insertion
  pub const INSERT: &str = "+";
}

const RULE_WIDTH: usize = 60;

fn rule() -> String {
  "=".repeat(RULE_WIDTH)
}

/// Prints the run banner naming the directory, range and mode.
pub fn print_start_message(base_dir: &Path, start: u32, end: u32, check_only: bool) {
  if is_quiet() {
    return;
  }

  let verb = if check_only { "Checking" } else { "Patching" };
  println!("{}", rule());
  println!("{} files {}-{} in {}", verb, start, end, base_dir.display());
  println!("{}", rule());
  println!();
}

/// Prints the "Processing <file>..." line that opens each index.
pub fn print_processing(file_name: &str) {
  if is_quiet() {
    return;
  }
  println!("Processing {}...", file_name);
}

/// Prints the lines that close an index, matching its outcome.
pub fn print_file_outcome(file_name: &str, report: &FileReport) {
  if is_quiet() {
    return;
  }

  match report.outcome {
    FileOutcome::Patched => {
      println!(
        "  {} Inserted patch block",
        symbols::INSERT.if_supports_color(Stream::Stdout, |s| s.green())
      );
      print_updated(file_name);
    }
    FileOutcome::AlreadyPatched => {
      println!(
        "  {} Marker already present",
        symbols::INFO.if_supports_color(Stream::Stdout, |s| s.dimmed())
      );
      print_updated(file_name);
    }
    FileOutcome::WouldPatch => {
      println!(
        "  {} Patch block would be inserted",
        symbols::INSERT.if_supports_color(Stream::Stdout, |s| s.yellow())
      );
    }
    FileOutcome::NoAnchor => {
      println!(
        "  {} Could not find insertion point",
        symbols::WARNING.if_supports_color(Stream::Stdout, |s| s.yellow())
      );
    }
    FileOutcome::NotFound => {
      println!(
        "{} {} not found",
        symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
        file_name
      );
    }
    FileOutcome::Error => {
      println!(
        "{} Error processing {}: {}",
        symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
        file_name,
        report.message.as_deref().unwrap_or("unknown error")
      );
    }
  }
}

fn print_updated(file_name: &str) {
  println!(
    "{} {} updated successfully",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    file_name
  );
}

/// Lists failed files. In quiet mode prints bare paths so the list can be
/// piped.
pub fn print_failed_files(reports: &[FileReport], base_dir: &Path) {
  let failed: Vec<&FileReport> = reports.iter().filter(|r| !r.is_success()).collect();
  if failed.is_empty() {
    return;
  }

  if is_quiet() {
    for report in &failed {
      println!("{}", make_relative_path(&report.path, base_dir));
    }
    return;
  }

  println!();
  println!(
    "{} {} {} failed:",
    symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
    failed.len(),
    if failed.len() == 1 { "file" } else { "files" }
  );
  for report in failed {
    println!("  {} ({})", make_relative_path(&report.path, base_dir), report.outcome);
  }
}

/// Prints `Summary: N successful, M failed` between rules. Verbose mode adds
/// the per-outcome breakdown and timing.
pub fn print_summary(summary: &BatchSummary) {
  if is_quiet() {
    return;
  }

  let failed = if summary.failed > 0 {
    summary.failed.if_supports_color(Stream::Stdout, |s| s.red()).to_string()
  } else {
    summary.failed.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string()
  };

  println!();
  println!("{}", rule());
  println!(
    "Summary: {} successful, {} failed",
    summary.succeeded.if_supports_color(Stream::Stdout, |s| s.cyan()),
    failed
  );

  if is_verbose() {
    println!(
      "  patched {}, already patched {}, would patch {}, not found {}, no anchor {}, errors {} ({:.2}s)",
      summary.patched,
      summary.already_patched,
      summary.would_patch,
      summary.not_found,
      summary.no_anchor,
      summary.errors,
      summary.processing_time.as_secs_f64()
    );
  }

  println!("{}", rule());
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!();
  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

fn make_relative_path(path: &Path, base_dir: &Path) -> String {
  path
    .strip_prefix(base_dir)
    .unwrap_or(path)
    .to_string_lossy()
    .to_string()
}
