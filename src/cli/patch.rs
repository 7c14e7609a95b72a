//! # Patch Command
//!
//! Loads the configuration, runs the batch and prints the summary.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use batchpatch::config::{CliOverrides, load_config};
use batchpatch::diff::DiffManager;
use batchpatch::info_log;
use batchpatch::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use batchpatch::output::{print_failed_files, print_hint, print_start_message, print_summary};
use batchpatch::processor::{Patcher, PatcherConfig};
use batchpatch::report::{ReportFormat, ReportGenerator};
use clap::Args;
use tracing::debug;

/// Arguments for the patch run
#[derive(Args, Debug, Default)]
pub struct PatchArgs {
  /// Read the batch definition from this TOML file instead of the built-in
  /// defaults
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Directory containing the target files
  #[arg(long, short = 'd', value_name = "DIR")]
  pub base_dir: Option<PathBuf>,

  /// First index of the range (inclusive)
  #[arg(long, value_name = "N")]
  pub start: Option<u32>,

  /// Last index of the range (inclusive)
  #[arg(long, value_name = "N")]
  pub end: Option<u32>,

  /// File name template; {index} is replaced by each index
  #[arg(long, value_name = "TEMPLATE")]
  pub file_template: Option<String>,

  /// Marker text whose presence means a file is already patched
  #[arg(long, value_name = "TEXT")]
  pub marker: Option<String>,

  /// Anchor regular expression; the block is inserted before its first match
  #[arg(long, value_name = "REGEX")]
  pub anchor: Option<String>,

  /// Read the patch block from this file instead of the built-in block
  #[arg(long, short = 'b', value_name = "FILE")]
  pub block_file: Option<PathBuf>,

  /// Check mode: report what would change without modifying files
  #[arg(long)]
  pub check: bool,

  /// Show a diff of each insertion on stderr
  #[arg(long)]
  pub show_diff: bool,

  /// Save diffs of all insertions to a file
  #[arg(long, short = 'o', value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Write a JSON report of the run to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Write a CSV report of the run to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_csv: Option<PathBuf>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

impl PatchArgs {
  fn cli_overrides(&self) -> CliOverrides {
    CliOverrides {
      base_dir: self.base_dir.clone(),
      start: self.start,
      end: self.end,
      file_template: self.file_template.clone(),
      marker: self.marker.clone(),
      anchor: self.anchor.clone(),
      block_file: self.block_file.clone(),
    }
  }
}

/// Run the batch with the given arguments.
///
/// Per-file failures never change the exit status in patch mode. Check mode
/// exits with 1 when any file would be patched or failed.
pub fn run_patch(args: PatchArgs) -> Result<()> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let mut config = load_config(args.config.as_deref())?;
  config.merge_cli_overrides(args.cli_overrides());
  debug!("Effective config: {:?}", config);

  let diff_manager = DiffManager::new(args.show_diff, args.save_diff.clone());
  diff_manager.init()?;

  let patcher_config = PatcherConfig {
    check_only: args.check,
    diff_manager: Some(diff_manager),
    ..PatcherConfig::from_config(&config).context("Invalid configuration")?
  };
  let patcher = Patcher::new(patcher_config).context("Invalid configuration")?;

  let range = patcher.range();
  print_start_message(patcher.base_dir(), range.start(), range.end(), args.check);

  let report = patcher.run_batch();

  print_failed_files(&report.files, patcher.base_dir());
  print_summary(&report.summary);

  if args.check && report.summary.would_patch > 0 {
    print_hint("Run without --check to insert the patch block.");
  }

  let requested_reports = [
    (ReportFormat::Json, args.report_json.as_ref()),
    (ReportFormat::Csv, args.report_csv.as_ref()),
  ];
  for (format, output_path) in requested_reports {
    let Some(output_path) = output_path else {
      continue;
    };
    let generator = ReportGenerator::new(format, output_path);
    if let Err(e) = generator.generate(&report, args.check) {
      eprintln!("Error generating {} report: {:#}", format, e);
    } else {
      info_log!("Generated {} report at {}", format, output_path.display());
    }
  }

  if args.check && !report.is_clean() {
    process::exit(1);
  }

  Ok(())
}
