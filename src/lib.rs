//! # batchpatch
//!
//! Splices a block of boilerplate text into a numbered set of source files,
//! immediately before each file's export statement.
//!
//! Files are named by an index from a closed range (`BlogPost18.jsx` through
//! `BlogPost30.jsx` by default). A marker string inside the block makes the
//! operation idempotent: files that already contain it are left alone, so a
//! batch can be rerun at any time.
//!
//! ## Features
//!
//! * Index-keyed file names and anchors (`{index}` placeholders)
//! * Per-file outcomes: patched, already patched, not found, no anchor, error
//! * Check mode that reports pending insertions without writing
//! * Diffs of each insertion, on stderr or saved to a file
//! * JSON and CSV reports
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use batchpatch::config::Config;
//! use batchpatch::processor::{Patcher, PatcherConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config {
//!         base_dir: "src/pages/blogs/news".into(),
//!         start: 18,
//!         end: 30,
//!         ..Config::default()
//!     };
//!
//!     let patcher = Patcher::new(PatcherConfig::from_config(&config)?)?;
//!     let report = patcher.run_batch();
//!
//!     println!("{} successful, {} failed", report.summary.succeeded, report.summary.failed);
//!     Ok(())
//! }
//! ```
//!
//! The insertion rule itself is a pure function:
//!
//! ```rust
//! use batchpatch::processor::{SpliceOutcome, splice_block};
//! use regex::Regex;
//!
//! let anchor = Regex::new(r"export default BlogPost20\b").unwrap();
//! let (patched, outcome) = splice_block(
//!     "export default BlogPost20",
//!     "/* Subcomponents */",
//!     &anchor,
//!     "/* Subcomponents */",
//! );
//!
//! assert_eq!(outcome, SpliceOutcome::Inserted);
//! assert_eq!(patched, "/* Subcomponents */\nexport default BlogPost20");
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - Per-file patching and batch runs
//! * [`config`] - Configuration file loading and validation
//! * [`target`] - Index ranges and index-keyed templates
//! * [`block`] - Patch block sources
//! * [`report`] - Outcomes, summaries and report files
//!
//! [`processor`]: crate::processor
//! [`config`]: crate::config
//! [`target`]: crate::target
//! [`block`]: crate::block
//! [`report`]: crate::report

pub mod block;
pub mod config;
pub mod diff;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod target;
