//! # batchpatch
//!
//! Splices a boilerplate block into a numbered set of source files.

mod cli;

use anyhow::Result;

use crate::cli::{Cli, run_patch};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run_patch(cli.patch_args)
}
