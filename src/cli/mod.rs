//! # CLI Module
//!
//! Command-line interface built on clap. With no arguments the tool patches
//! the built-in directory and range.

mod patch;

use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
pub use patch::{PatchArgs, run_patch};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Patch the built-in directory and range
  batchpatch

  # Preview insertions without writing, with diffs
  batchpatch --check --show-diff

  # Patch a different directory and range
  batchpatch --base-dir content/posts --start 1 --end 12

  # Use an explicit config file and a custom block
  batchpatch --config patch.toml --block-file helpers.jsx

  # Write a JSON report of the run
  batchpatch --report-json batch.json
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub patch_args: PatchArgs,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
