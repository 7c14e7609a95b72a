//! # Processor Module
//!
//! This module applies the patch block across the configured index range.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - File reading and writing operations
//! - [`splice`] - The pure marker/anchor/insert transformation
//!
//! The [`Patcher`] struct is the main entry point: [`Patcher::process`]
//! handles one index, [`Patcher::run_batch`] walks the whole range.
//!
//! Each index owns a distinct file, so a failure on one never affects another.
//! Rerunning a batch is always safe: files carrying the marker keep their content.

mod file_io;
mod splice;

use std::path::{Path, PathBuf};
use std::time::Instant;

pub use file_io::FileIO;
pub use splice::{SpliceOutcome, splice_block};
use tracing::{debug, trace, warn};

use crate::block::PatchBlock;
use crate::config::{Config, ConfigError};
use crate::diff::DiffManager;
use crate::output;
use crate::report::{BatchReport, FileOutcome, FileReport};
use crate::target::{AnchorTemplate, IndexRange, TargetResolver};

/// A failure while patching a single file.
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
  #[error("Failed to read {path}: {source}")]
  Read { path: PathBuf, source: std::io::Error },

  #[error("Failed to write {path}: {source}")]
  Write { path: PathBuf, source: std::io::Error },

  #[error("Invalid anchor pattern for index {index}: {source}")]
  Anchor { index: u32, source: regex::Error },
}

/// Configuration for creating a [`Patcher`].
pub struct PatcherConfig {
  pub resolver: TargetResolver,
  pub range: IndexRange,
  pub marker: String,
  pub anchor: AnchorTemplate,
  pub block: PatchBlock,

  /// Report what would change without writing.
  pub check_only: bool,

  pub diff_manager: Option<DiffManager>,
}

impl PatcherConfig {
  /// Builds a patcher configuration from a validated [`Config`], resolving
  /// the patch block.
  ///
  /// Use struct update syntax to override the behavior flags:
  /// ```ignore
  /// PatcherConfig {
  ///     check_only: true,
  ///     ..PatcherConfig::from_config(&config)?
  /// }
  /// ```
  pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
    config.validate()?;

    Ok(Self {
      resolver: TargetResolver::new(config.base_dir.clone(), config.file_template()?),
      range: config.index_range()?,
      marker: config.marker.clone(),
      anchor: config.anchor_template(),
      block: PatchBlock::resolve(config)?,
      check_only: false,
      diff_manager: None,
    })
  }
}

/// Applies one patch block to an index range of files.
pub struct Patcher {
  resolver: TargetResolver,
  range: IndexRange,
  marker: String,
  anchor: AnchorTemplate,
  block: PatchBlock,
  check_only: bool,
  diff_manager: DiffManager,
}

impl Patcher {
  /// Creates a patcher.
  ///
  /// # Errors
  ///
  /// Returns an error if the marker is empty, the block lacks the marker, or
  /// the anchor does not compile for the first index.
  pub fn new(config: PatcherConfig) -> Result<Self, ConfigError> {
    if config.marker.is_empty() {
      return Err(ConfigError::EmptyMarker);
    }

    if !config.block.contains(&config.marker) {
      return Err(ConfigError::MarkerNotInBlock { marker: config.marker });
    }

    config
      .anchor
      .compile(config.range.start())
      .map_err(|e| ConfigError::InvalidAnchor {
        pattern: config.anchor.as_str().to_string(),
        source: e,
      })?;

    Ok(Self {
      resolver: config.resolver,
      range: config.range,
      marker: config.marker,
      anchor: config.anchor,
      block: config.block,
      check_only: config.check_only,
      diff_manager: config.diff_manager.unwrap_or_else(|| DiffManager::new(false, None)),
    })
  }

  pub const fn range(&self) -> IndexRange {
    self.range
  }

  pub fn base_dir(&self) -> &Path {
    self.resolver.base_dir()
  }

  pub const fn is_check_only(&self) -> bool {
    self.check_only
  }

  /// Path of the file for `index`.
  pub fn path_for(&self, index: u32) -> PathBuf {
    self.resolver.path_for(index)
  }

  /// Processes every index of the range in ascending order.
  ///
  /// Never stops early: every index yields exactly one [`FileReport`].
  pub fn run_batch(&self) -> BatchReport {
    let start_time = Instant::now();
    debug!(
      "Running batch over {}..={} in {}",
      self.range.start(),
      self.range.end(),
      self.base_dir().display()
    );

    let reports: Vec<FileReport> = self.range.iter().map(|index| self.process(index)).collect();

    let report = BatchReport::new(reports, start_time.elapsed());
    debug!(
      "Batch finished: {} successful, {} failed in {}ms",
      report.summary.succeeded,
      report.summary.failed,
      report.summary.processing_time.as_millis()
    );
    report
  }

  /// Processes the file for `index`.
  ///
  /// Outside check mode the content is written back even when unchanged.
  /// A missing file, a missing anchor and I/O failures are all reported in
  /// the returned [`FileReport`] rather than as errors.
  pub fn process(&self, index: u32) -> FileReport {
    let path = self.resolver.path_for(index);
    let file_name = self.resolver.file_name_for(index);

    if !path.exists() {
      trace!("Skipping: {} (not found)", path.display());
      let report = FileReport::new(index, path, FileOutcome::NotFound);
      output::print_file_outcome(&file_name, &report);
      return report;
    }

    output::print_processing(&file_name);

    let report = match self.patch_file(index, &path) {
      Ok(outcome) => FileReport::new(index, path, outcome),
      Err(e) => {
        warn!("{}", e);
        FileReport::error(index, path, e.to_string())
      }
    };

    output::print_file_outcome(&file_name, &report);
    report
  }

  fn patch_file(&self, index: u32, path: &Path) -> Result<FileOutcome, PatchError> {
    let content = FileIO::read_full_content(path)?;
    let anchor = self
      .anchor
      .compile(index)
      .map_err(|e| PatchError::Anchor { index, source: e })?;

    let (patched, outcome) = splice_block(&content, &self.marker, &anchor, self.block.as_str());
    trace!("{}: {:?}", path.display(), outcome);

    if !self.check_only {
      // Written back whatever the outcome.
      FileIO::write_file(path, &patched)?;
      debug!("Wrote {} bytes to {}", patched.len(), path.display());
    }

    match outcome {
      SpliceOutcome::AlreadyPatched => Ok(FileOutcome::AlreadyPatched),
      SpliceOutcome::AnchorNotFound => Ok(FileOutcome::NoAnchor),
      SpliceOutcome::Inserted => {
        self.diff_manager.display_diff(path, &content, &patched);

        if self.check_only {
          Ok(FileOutcome::WouldPatch)
        } else {
          Ok(FileOutcome::Patched)
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::*;
  use crate::target::FileTemplate;

  const MARKER: &str = "/* helpers */";
  const BLOCK: &str = "/* helpers */\nconst Help = () => null\n";

  fn patcher(base_dir: &Path, start: u32, end: u32, check_only: bool) -> Patcher {
    let config = PatcherConfig {
      resolver: TargetResolver::new(
        base_dir.to_path_buf(),
        FileTemplate::new("Post{index}.jsx").expect("has placeholder"),
      ),
      range: IndexRange::new(start, end).expect("valid range"),
      marker: MARKER.to_string(),
      anchor: AnchorTemplate::new(r"export default Post{index}\b"),
      block: PatchBlock::inline(BLOCK),
      check_only,
      diff_manager: None,
    };
    Patcher::new(config).expect("valid patcher")
  }

  #[test]
  fn test_new_rejects_block_without_marker() {
    let dir = tempdir().expect("create temp dir");
    let config = PatcherConfig {
      resolver: TargetResolver::new(
        dir.path().to_path_buf(),
        FileTemplate::new("Post{index}.jsx").expect("has placeholder"),
      ),
      range: IndexRange::new(1, 1).expect("valid range"),
      marker: MARKER.to_string(),
      anchor: AnchorTemplate::new("export default"),
      block: PatchBlock::inline("const Nothing = null\n"),
      check_only: false,
      diff_manager: None,
    };

    assert!(matches!(Patcher::new(config), Err(ConfigError::MarkerNotInBlock { .. })));
  }

  #[test]
  fn test_process_patches_file() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("Post4.jsx");
    fs::write(&path, "const Post4 = 1\nexport default Post4\n").expect("write");

    let report = patcher(dir.path(), 4, 4, false).process(4);

    assert_eq!(report.outcome, FileOutcome::Patched);
    assert_eq!(report.path, path);
    assert_eq!(
      fs::read_to_string(&path).expect("read"),
      format!("const Post4 = 1\n{BLOCK}\nexport default Post4\n")
    );
  }

  #[test]
  fn test_check_only_leaves_file_untouched() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("Post4.jsx");
    let original = "export default Post4\n";
    fs::write(&path, original).expect("write");

    let report = patcher(dir.path(), 4, 4, true).process(4);

    assert_eq!(report.outcome, FileOutcome::WouldPatch);
    assert_eq!(fs::read_to_string(&path).expect("read"), original);
  }

  #[test]
  fn test_directory_at_target_path_is_error() {
    let dir = tempdir().expect("create temp dir");
    fs::create_dir(dir.path().join("Post9.jsx")).expect("mkdir");

    let report = patcher(dir.path(), 9, 9, false).process(9);

    assert_eq!(report.outcome, FileOutcome::Error);
    assert!(report.message.as_deref().is_some_and(|m| m.contains("Post9.jsx")));
  }

  #[test]
  fn test_run_batch_reports_every_index() {
    let dir = tempdir().expect("create temp dir");
    fs::write(dir.path().join("Post1.jsx"), "export default Post1").expect("write");
    fs::write(dir.path().join("Post3.jsx"), "export { Post3 }").expect("write");

    let report = patcher(dir.path(), 1, 3, false).run_batch();

    let outcomes: Vec<(u32, FileOutcome)> = report.files.iter().map(|r| (r.index, r.outcome)).collect();
    assert_eq!(
      outcomes,
      vec![
        (1, FileOutcome::Patched),
        (2, FileOutcome::NotFound),
        (3, FileOutcome::NoAnchor),
      ]
    );
    assert_eq!(report.summary.succeeded, 1);
    assert_eq!(report.summary.failed, 2);
  }
}
