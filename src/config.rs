//! # Configuration Module
//!
//! This module holds the batch definition: where the target files live, which
//! index range to visit, how an index becomes a file name, and what to insert
//! where.
//!
//! The defaults are the built-in batch. A TOML file is only read when named
//! explicitly with `--config`; nothing is picked up from the environment or
//! the working directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::target::{AnchorTemplate, FileTemplate, IndexRange};
use crate::verbose_log;

pub const DEFAULT_BASE_DIR: &str = "src/pages/blogs/news";
pub const DEFAULT_START: u32 = 18;
pub const DEFAULT_END: u32 = 30;
pub const DEFAULT_FILE_TEMPLATE: &str = "BlogPost{index}.jsx";
pub const DEFAULT_MARKER: &str = "/* Subcomponents */";
pub const DEFAULT_ANCHOR: &str = r"export default BlogPost{index}\b";

/// Batch configuration.
///
/// Loaded from TOML with kebab-case keys. Missing keys fall back to the
/// defaults above.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
  /// Directory holding the target files.
  pub base_dir: PathBuf,

  /// First index, inclusive.
  pub start: u32,

  /// Last index, inclusive.
  pub end: u32,

  /// File name template; must contain `{index}`.
  pub file_template: String,

  /// Substring whose presence means the file is already patched.
  pub marker: String,

  /// Anchor regular expression template; `{index}` is substituted.
  pub anchor: String,

  /// Inline patch block text.
  pub block: Option<String>,

  /// File to read the patch block from.
  pub block_file: Option<PathBuf>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      base_dir: PathBuf::from(DEFAULT_BASE_DIR),
      start: DEFAULT_START,
      end: DEFAULT_END,
      file_template: DEFAULT_FILE_TEMPLATE.to_string(),
      marker: DEFAULT_MARKER.to_string(),
      anchor: DEFAULT_ANCHOR.to_string(),
      block: None,
      block_file: None,
    }
  }
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  #[error("Invalid index range: start {start} is greater than end {end}")]
  InvalidRange { start: u32, end: u32 },

  #[error("Invalid file template '{template}': must contain {{index}}")]
  InvalidFileTemplate { template: String },

  #[error("Marker cannot be empty")]
  EmptyMarker,

  #[error("Invalid anchor pattern '{pattern}': {source}")]
  InvalidAnchor { pattern: String, source: regex::Error },

  #[error("Only one of 'block' and 'block-file' may be set")]
  ConflictingBlockSources,

  /// The patch block file could not be read.
  #[error("Failed to read block file '{path}': {source}")]
  BlockReadError { path: PathBuf, source: std::io::Error },

  /// Without the marker inside the block, every run would insert it again.
  #[error("Patch block does not contain the marker '{marker}'")]
  MarkerNotInBlock { marker: String },
}

/// Values given on the command line. `Some` fields replace the config file's.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
  pub base_dir: Option<PathBuf>,
  pub start: Option<u32>,
  pub end: Option<u32>,
  pub file_template: Option<String>,
  pub marker: Option<String>,
  pub anchor: Option<String>,
  pub block_file: Option<PathBuf>,
}

impl Config {
  /// Load configuration from a file.
  ///
  /// Relative `base-dir` and `block-file` values are resolved against the
  /// directory containing the config file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let mut config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    if let Some(config_dir) = path.parent() {
      config.anchor_paths(config_dir);
    }

    config.validate()?;

    Ok(config)
  }

  fn anchor_paths(&mut self, dir: &Path) {
    if self.base_dir.is_relative() {
      self.base_dir = dir.join(&self.base_dir);
    }
    if let Some(block_file) = self.block_file.as_mut()
      && block_file.is_relative()
    {
      *block_file = dir.join(&*block_file);
    }
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - `start <= end`
  /// - the file template contains `{index}`
  /// - the marker is non-empty
  /// - the anchor compiles for the first index
  /// - at most one block source is given
  pub fn validate(&self) -> Result<(), ConfigError> {
    self.index_range()?;
    self.file_template()?;

    if self.marker.is_empty() {
      return Err(ConfigError::EmptyMarker);
    }

    self
      .anchor_template()
      .compile(self.start)
      .map_err(|e| ConfigError::InvalidAnchor {
        pattern: self.anchor.clone(),
        source: e,
      })?;

    if self.block.is_some() && self.block_file.is_some() {
      return Err(ConfigError::ConflictingBlockSources);
    }

    Ok(())
  }

  pub fn index_range(&self) -> Result<IndexRange, ConfigError> {
    match IndexRange::new(self.start, self.end) {
      Some(range) => Ok(range),
      None => Err(ConfigError::InvalidRange {
        start: self.start,
        end: self.end,
      }),
    }
  }

  pub fn file_template(&self) -> Result<FileTemplate, ConfigError> {
    FileTemplate::new(self.file_template.as_str()).ok_or_else(|| ConfigError::InvalidFileTemplate {
      template: self.file_template.clone(),
    })
  }

  pub fn anchor_template(&self) -> AnchorTemplate {
    AnchorTemplate::new(self.anchor.as_str())
  }

  /// Apply command-line overrides. A `--block-file` replaces any inline
  /// block from the config file.
  pub fn merge_cli_overrides(&mut self, overrides: CliOverrides) {
    if let Some(base_dir) = overrides.base_dir {
      self.base_dir = base_dir;
    }
    if let Some(start) = overrides.start {
      self.start = start;
    }
    if let Some(end) = overrides.end {
      self.end = end;
    }
    if let Some(file_template) = overrides.file_template {
      self.file_template = file_template;
    }
    if let Some(marker) = overrides.marker {
      self.marker = marker;
    }
    if let Some(anchor) = overrides.anchor {
      self.anchor = anchor;
    }
    if let Some(block_file) = overrides.block_file {
      self.block = None;
      self.block_file = Some(block_file);
    }
  }
}

/// Load the configuration from `explicit_path`, or the built-in defaults
/// when no path is given.
pub fn load_config(explicit_path: Option<&Path>) -> Result<Config> {
  let Some(path) = explicit_path else {
    verbose_log!("No config file given, using built-in defaults");
    return Ok(Config::default());
  };

  if !path.exists() {
    anyhow::bail!("Config file not found: {}", path.display());
  }

  Config::load(path).with_context(|| format!("Failed to load config from {}", path.display()))
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_parse_full_config() {
    let config_content = concat!(
      "base-dir = \"posts\"\n",
      "start = 1\n",
      "end = 3\n",
      "file-template = \"post-{index}.tsx\"\n",
      "marker = \"// helpers\"\n",
      "anchor = 'export default Post{index}\\b'\n",
      "block = \"// helpers\\nconst x = 1\\n\"\n",
    );

    let config: Config = toml::from_str(config_content).expect("valid config should parse");

    assert_eq!(config.base_dir, PathBuf::from("posts"));
    assert_eq!(config.start, 1);
    assert_eq!(config.end, 3);
    assert_eq!(config.file_template, "post-{index}.tsx");
    assert_eq!(config.marker, "// helpers");
    assert_eq!(config.anchor, r"export default Post{index}\b");
    assert_eq!(config.block.as_deref(), Some("// helpers\nconst x = 1\n"));
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_parse_empty_config_uses_defaults() {
    let config: Config = toml::from_str("").expect("empty config should parse");
    assert_eq!(config, Config::default());
    assert_eq!(config.start, DEFAULT_START);
    assert_eq!(config.end, DEFAULT_END);
  }

  #[test]
  fn test_unknown_keys_are_rejected() {
    let result: Result<Config, _> = toml::from_str("strat = 3\n");
    assert!(result.is_err());
  }

  #[test]
  fn test_validate_inverted_range() {
    let config = Config {
      start: 10,
      end: 2,
      ..Config::default()
    };

    let err = config.validate().expect_err("should fail");
    assert!(matches!(err, ConfigError::InvalidRange { start: 10, end: 2 }));
  }

  #[test]
  fn test_validate_template_without_placeholder() {
    let config = Config {
      file_template: "BlogPost.jsx".to_string(),
      ..Config::default()
    };

    let err = config.validate().expect_err("should fail");
    assert!(matches!(err, ConfigError::InvalidFileTemplate { .. }));
  }

  #[test]
  fn test_validate_empty_marker() {
    let config = Config {
      marker: String::new(),
      ..Config::default()
    };

    assert!(matches!(config.validate(), Err(ConfigError::EmptyMarker)));
  }

  #[test]
  fn test_validate_bad_anchor() {
    let config = Config {
      anchor: "export default [".to_string(),
      ..Config::default()
    };

    let err = config.validate().expect_err("should fail");
    assert!(matches!(err, ConfigError::InvalidAnchor { .. }));
  }

  #[test]
  fn test_validate_conflicting_block_sources() {
    let config = Config {
      block: Some("/* Subcomponents */".to_string()),
      block_file: Some(PathBuf::from("block.jsx")),
      ..Config::default()
    };

    assert!(matches!(config.validate(), Err(ConfigError::ConflictingBlockSources)));
  }

  #[test]
  fn test_load_resolves_paths_against_config_dir() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join("batch.toml");

    std::fs::write(
      &config_path,
      concat!("base-dir = \"news\"\n", "block-file = \"block.jsx\"\n"),
    )
    .expect("write config");

    let config = Config::load(&config_path).expect("load should succeed");
    assert_eq!(config.base_dir, temp_dir.path().join("news"));
    assert_eq!(config.block_file, Some(temp_dir.path().join("block.jsx")));
  }

  #[test]
  fn test_load_config_file_not_found() {
    let result = Config::load(Path::new("/nonexistent/path/batch.toml"));
    assert!(matches!(result.expect_err("should fail"), ConfigError::ReadError { .. }));
  }

  #[test]
  fn test_load_rejects_invalid_values() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join("batch.toml");
    std::fs::write(&config_path, "start = 9\nend = 1\n").expect("write config");

    let result = Config::load(&config_path);
    assert!(matches!(result, Err(ConfigError::InvalidRange { .. })));
  }

  #[test]
  fn test_load_config_without_path_returns_defaults() {
    let config = load_config(None).expect("defaults");
    assert_eq!(config, Config::default());
    assert_eq!(config.base_dir, PathBuf::from(DEFAULT_BASE_DIR));
  }

  #[test]
  fn test_load_config_explicit_path() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join("batch.toml");
    std::fs::write(&config_path, "start = 1\nend = 2\n").expect("write config");

    let config = load_config(Some(&config_path)).expect("load should succeed");
    assert_eq!(config.start, 1);
    assert_eq!(config.end, 2);
    assert_eq!(config.file_template, DEFAULT_FILE_TEMPLATE);
  }

  #[test]
  fn test_load_config_missing_explicit_path_is_error() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let missing = temp_dir.path().join("missing.toml");

    let err = load_config(Some(&missing)).expect_err("should fail");
    assert!(err.to_string().contains("Config file not found"));
  }

  #[test]
  fn test_merge_cli_overrides() {
    let mut config = Config {
      block: Some("inline".to_string()),
      ..Config::default()
    };

    config.merge_cli_overrides(CliOverrides {
      start: Some(1),
      end: Some(5),
      marker: Some("@patched".to_string()),
      block_file: Some(PathBuf::from("other.jsx")),
      ..CliOverrides::default()
    });

    assert_eq!(config.start, 1);
    assert_eq!(config.end, 5);
    assert_eq!(config.marker, "@patched");
    assert_eq!(config.file_template, DEFAULT_FILE_TEMPLATE);
    assert!(config.block.is_none());
    assert_eq!(config.block_file, Some(PathBuf::from("other.jsx")));
  }
}
