//! # Target Module
//!
//! Index-keyed naming: the closed range of indices to visit, the template that
//! turns an index into a file name, and the template that turns an index into
//! the anchor regular expression.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use regex::Regex;

/// Placeholder replaced by the decimal index in file and anchor templates.
pub const INDEX_PLACEHOLDER: &str = "{index}";

/// A closed, ascending range of target indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRange {
  start: u32,
  end: u32,
}

impl IndexRange {
  /// Creates a range covering `start..=end`, or `None` when `start > end`.
  pub const fn new(start: u32, end: u32) -> Option<Self> {
    if start > end {
      return None;
    }
    Some(Self { start, end })
  }

  pub const fn start(&self) -> u32 {
    self.start
  }

  pub const fn end(&self) -> u32 {
    self.end
  }

  /// Number of indices in the range.
  pub const fn len(&self) -> usize {
    (self.end - self.start) as usize + 1
  }

  /// Always `false`: a range holds at least one index.
  pub const fn is_empty(&self) -> bool {
    false
  }

  /// Iterates the indices in ascending order.
  pub const fn iter(&self) -> RangeInclusive<u32> {
    self.start..=self.end
  }
}

/// Expands a template by replacing every `{index}` with `index`.
fn expand(template: &str, index: u32) -> String {
  template.replace(INDEX_PLACEHOLDER, &index.to_string())
}

/// File name template such as `BlogPost{index}.jsx`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTemplate(String);

impl FileTemplate {
  /// Returns `None` unless the template contains `{index}`; without it every
  /// index would resolve to the same file.
  pub fn new(template: impl Into<String>) -> Option<Self> {
    let template = template.into();
    template.contains(INDEX_PLACEHOLDER).then_some(Self(template))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Renders the file name for `index`.
  pub fn render(&self, index: u32) -> String {
    expand(&self.0, index)
  }
}

/// Maps indices to paths under a base directory.
#[derive(Debug, Clone)]
pub struct TargetResolver {
  base_dir: PathBuf,
  template: FileTemplate,
}

impl TargetResolver {
  pub const fn new(base_dir: PathBuf, template: FileTemplate) -> Self {
    Self { base_dir, template }
  }

  pub fn base_dir(&self) -> &Path {
    &self.base_dir
  }

  /// Returns `<base_dir>/<template(index)>`.
  pub fn path_for(&self, index: u32) -> PathBuf {
    self.base_dir.join(self.template.render(index))
  }

  /// The bare file name for `index`, used in progress lines.
  pub fn file_name_for(&self, index: u32) -> String {
    self.template.render(index)
  }
}

/// Anchor regular expression template.
///
/// `{index}` is substituted before compilation, so the default
/// `export default BlogPost{index}\b` only matches the export that belongs to
/// the file's own index. A template without the placeholder compiles to the
/// same pattern for every index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorTemplate(String);

impl AnchorTemplate {
  pub fn new(template: impl Into<String>) -> Self {
    Self(template.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn is_index_keyed(&self) -> bool {
    self.0.contains(INDEX_PLACEHOLDER)
  }

  /// Compiles the anchor for `index`.
  pub fn compile(&self, index: u32) -> Result<Regex, regex::Error> {
    Regex::new(&expand(&self.0, index))
  }
}
