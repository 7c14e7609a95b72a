//! # Logging Module
//!
//! Output gating for batchpatch:
//! - `verbose_log!` writes diagnostics to stderr when `-v` is given
//! - `info_log!` writes progress lines to stdout unless `-q` is given
//! - [`init_tracing`] installs the `tracing` subscriber used by `debug!` and
//!   `trace!` calls
//!
//! ## Example
//!
//! ```rust
//! use batchpatch::logging::{ColorMode, set_verbose};
//! use batchpatch::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Never.apply();
//!
//! verbose_log!("Resolved {} targets", 13);
//! info_log!("Processing {}...", "BlogPost18.jsx");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_normal, set_quiet, set_verbose};

/// Logs a message to stderr if verbose mode is enabled.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            println!($($arg)*);
        }
    };
}
