use std::sync::atomic::{AtomicU8, Ordering};

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Global output mode shared by the logging macros and output functions.
static OUTPUT_MODE: AtomicU8 = AtomicU8::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
  Normal = 0,
  Quiet = 1,
  Verbose = 2,
}

impl OutputMode {
  const fn from_u8(value: u8) -> Self {
    match value {
      1 => OutputMode::Quiet,
      2 => OutputMode::Verbose,
      _ => OutputMode::Normal,
    }
  }

  fn current() -> Self {
    Self::from_u8(OUTPUT_MODE.load(Ordering::SeqCst))
  }

  fn store(self) {
    OUTPUT_MODE.store(self as u8, Ordering::SeqCst);
  }
}

/// When to colour terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
  /// Colour when the stream is a terminal
  #[default]
  Auto,
  /// Never use colors
  Never,
  /// Always use colors
  Always,
}

impl ColorMode {
  /// Applies the mode process-wide through owo-colors' override.
  pub fn apply(self) {
    match self {
      ColorMode::Auto => owo_colors::unset_override(),
      ColorMode::Never => owo_colors::set_override(false),
      ColorMode::Always => owo_colors::set_override(true),
    }
  }
}

/// Enables verbose output: `verbose_log!` prints.
pub fn set_verbose() {
  OutputMode::Verbose.store();
}

/// Enables quiet output: `info_log!` and progress lines are suppressed.
pub fn set_quiet() {
  OutputMode::Quiet.store();
}

pub fn set_normal() {
  OutputMode::Normal.store();
}

pub fn is_verbose() -> bool {
  OutputMode::current() == OutputMode::Verbose
}

pub fn is_quiet() -> bool {
  OutputMode::current() == OutputMode::Quiet
}

/// Installs a stderr `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows the flags: `-q` is
/// `error`, no flag `warn`, `-v` `info`, `-vv` `debug`, `-vvv` and up `trace`.
/// A second call is a no-op.
pub fn init_tracing(quiet: bool, verbosity: u8) {
  let default_level = match (quiet, verbosity) {
    (true, _) => "error",
    (false, 0) => "warn",
    (false, 1) => "info",
    (false, 2) => "debug",
    (false, _) => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .compact()
    .try_init();
}
