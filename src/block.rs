//! # Patch Block Module
//!
//! The text inserted into each unpatched file. The built-in block is the
//! "Subcomponents" set of small JSX helpers; a config file may replace it with
//! inline text or a file.

use std::path::{Path, PathBuf};

use crate::config::{Config, ConfigError};

/// The built-in patch block. Starts and ends with a newline.
pub const DEFAULT_PATCH_BLOCK: &str = include_str!("../assets/subcomponents.jsx");

/// Where a [`PatchBlock`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockSource {
  Builtin,
  Inline,
  File(PathBuf),
}

/// Patch block text plus its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchBlock {
  text: String,
  source: BlockSource,
}

impl PatchBlock {
  pub fn builtin() -> Self {
    Self {
      text: DEFAULT_PATCH_BLOCK.to_string(),
      source: BlockSource::Builtin,
    }
  }

  pub fn inline(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      source: BlockSource::Inline,
    }
  }

  /// Reads the block verbatim from `path`.
  pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::BlockReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    Ok(Self {
      text,
      source: BlockSource::File(path.to_path_buf()),
    })
  }

  /// Picks the block named by `config` and checks that it carries the marker.
  pub fn resolve(config: &Config) -> Result<Self, ConfigError> {
    let block = match (&config.block, &config.block_file) {
      (Some(_), Some(_)) => return Err(ConfigError::ConflictingBlockSources),
      (Some(text), None) => Self::inline(text.as_str()),
      (None, Some(path)) => Self::from_file(path)?,
      (None, None) => Self::builtin(),
    };

    if !block.contains(&config.marker) {
      return Err(ConfigError::MarkerNotInBlock {
        marker: config.marker.clone(),
      });
    }

    Ok(block)
  }

  pub fn as_str(&self) -> &str {
    &self.text
  }

  pub const fn source(&self) -> &BlockSource {
    &self.source
  }

  pub fn contains(&self, marker: &str) -> bool {
    self.text.contains(marker)
  }
}
