//! # Diff Module
//!
//! Line diffs of a file before and after the patch block is spliced in, shown
//! on stderr and/or appended to a diff file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use similar::{ChangeTag, TextDiff};

/// Renders and routes diffs of pending or applied insertions.
pub struct DiffManager {
  /// Print diffs to stderr.
  pub show_diff: bool,

  /// Append diffs to this file.
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  pub const fn is_enabled(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Truncates the diff file so a run starts from an empty file.
  pub fn init(&self) -> Result<()> {
    if let Some(ref path) = self.save_diff_path {
      std::fs::write(path, "").with_context(|| format!("Failed to create diff file: {}", path.display()))?;
    }
    Ok(())
  }

  /// Emits the diff between `original` and `new` for `path`.
  ///
  /// Failures writing the diff file are reported on stderr and do not fail
  /// the caller.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) {
    if !self.is_enabled() {
      return;
    }

    let rendered = render_diff(path, original, new);

    if self.show_diff {
      for line in rendered.lines() {
        let styled = match line.as_bytes().first() {
          Some(b'+') => line.if_supports_color(Stream::Stderr, |l| l.green()).to_string(),
          Some(b'-') => line.if_supports_color(Stream::Stderr, |l| l.red()).to_string(),
          _ => line.to_string(),
        };
        eprintln!("{styled}");
      }
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let appended = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .and_then(|mut file| file.write_all(rendered.as_bytes()));

      if let Err(e) = appended {
        eprintln!("Error writing to diff file {}: {}", diff_path.display(), e);
      }
    }
  }
}

/// Renders a diff with a `Diff for <path>:` header and one `+`, `-` or ` `
/// prefixed line per change, followed by a blank line.
pub fn render_diff(path: &Path, original: &str, new: &str) -> String {
  let diff = TextDiff::from_lines(original, new);
  let mut out = format!("Diff for {}:\n", path.display());

  for change in diff.iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => '-',
      ChangeTag::Insert => '+',
      ChangeTag::Equal => ' ',
    };
    out.push(sign);
    out.push_str(change.value());
    if change.missing_newline() {
      out.push('\n');
    }
  }

  out.push('\n');
  out
}
