#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use batchpatch::config::Config;
use batchpatch::processor::{Patcher, PatcherConfig};

pub const MARKER: &str = "/* Subcomponents */";

/// A minimal component file ending in the export statement for `index`.
pub fn blog_post(index: u32) -> String {
  format!(
    "import React from 'react'\n\nconst BlogPost{index} = () => (\n  <article>Post {index}</article>\n)\n\nexport default BlogPost{index}\n"
  )
}

/// Writes `BlogPost<index>.jsx` into `dir` with `content` and returns its path.
pub fn write_post(dir: &Path, index: u32, content: &str) -> Result<PathBuf> {
  let path = dir.join(format!("BlogPost{index}.jsx"));
  fs::write(&path, content)?;
  Ok(path)
}

/// Default config pointed at `dir` for `start..=end`.
pub fn config_for(dir: &Path, start: u32, end: u32) -> Config {
  Config {
    base_dir: dir.to_path_buf(),
    start,
    end,
    ..Config::default()
  }
}

pub fn patcher_for(dir: &Path, start: u32, end: u32) -> Result<Patcher> {
  let config = PatcherConfig::from_config(&config_for(dir, start, end))?;
  Ok(Patcher::new(config)?)
}

pub fn check_patcher_for(dir: &Path, start: u32, end: u32) -> Result<Patcher> {
  let config = PatcherConfig {
    check_only: true,
    ..PatcherConfig::from_config(&config_for(dir, start, end))?
  };
  Ok(Patcher::new(config)?)
}
