//! # Report Module
//!
//! Per-file outcomes of a batch run, the summary counts derived from them, and
//! report files in JSON or CSV.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// What happened to a single target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileOutcome {
  /// The block was inserted and the file rewritten.
  Patched,
  /// The marker was already present.
  AlreadyPatched,
  /// Check mode: the block would be inserted.
  WouldPatch,
  /// No file at the resolved path.
  NotFound,
  /// Marker absent and anchor not found.
  NoAnchor,
  /// Reading or writing failed.
  Error,
}

impl FileOutcome {
  pub const fn is_success(self) -> bool {
    matches!(self, Self::Patched | Self::AlreadyPatched | Self::WouldPatch)
  }

  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Patched => "patched",
      Self::AlreadyPatched => "already-patched",
      Self::WouldPatch => "would-patch",
      Self::NotFound => "not-found",
      Self::NoAnchor => "no-anchor",
      Self::Error => "error",
    }
  }
}

impl std::fmt::Display for FileOutcome {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Result of processing one index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
  pub index: u32,
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  pub outcome: FileOutcome,
  /// Underlying error message for [`FileOutcome::Error`].
  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub message: Option<String>,
}

impl FileReport {
  pub const fn new(index: u32, path: PathBuf, outcome: FileOutcome) -> Self {
    Self {
      index,
      path,
      outcome,
      message: None,
    }
  }

  pub fn error(index: u32, path: PathBuf, message: impl Into<String>) -> Self {
    Self {
      index,
      path,
      outcome: FileOutcome::Error,
      message: Some(message.into()),
    }
  }

  pub const fn is_success(&self) -> bool {
    self.outcome.is_success()
  }
}

mod path_serialization {
  use std::path::{Path, PathBuf};

  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(path: &Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy())
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
  where
    D: Deserializer<'de>,
  {
    String::deserialize(deserializer).map(PathBuf::from)
  }
}

/// Counts over a batch run. `succeeded + failed == total`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
  pub total: usize,
  pub succeeded: usize,
  pub failed: usize,
  pub patched: usize,
  pub already_patched: usize,
  pub would_patch: usize,
  pub not_found: usize,
  pub no_anchor: usize,
  pub errors: usize,
  #[serde(serialize_with = "serialize_duration_secs")]
  pub processing_time: Duration,
}

fn serialize_duration_secs<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
  S: serde::Serializer,
{
  serializer.serialize_f64(duration.as_secs_f64())
}

impl BatchSummary {
  pub fn from_reports(reports: &[FileReport], processing_time: Duration) -> Self {
    let mut summary = Self {
      total: reports.len(),
      processing_time,
      ..Self::default()
    };

    for report in reports {
      if report.is_success() {
        summary.succeeded += 1;
      } else {
        summary.failed += 1;
      }

      match report.outcome {
        FileOutcome::Patched => summary.patched += 1,
        FileOutcome::AlreadyPatched => summary.already_patched += 1,
        FileOutcome::WouldPatch => summary.would_patch += 1,
        FileOutcome::NotFound => summary.not_found += 1,
        FileOutcome::NoAnchor => summary.no_anchor += 1,
        FileOutcome::Error => summary.errors += 1,
      }
    }

    summary
  }
}

/// All per-file reports of a run plus their summary.
#[derive(Debug, Clone)]
pub struct BatchReport {
  pub files: Vec<FileReport>,
  pub summary: BatchSummary,
}

impl BatchReport {
  pub fn new(files: Vec<FileReport>, processing_time: Duration) -> Self {
    let summary = BatchSummary::from_reports(&files, processing_time);
    Self { files, summary }
  }

  /// `true` when nothing failed and nothing is left to patch.
  pub const fn is_clean(&self) -> bool {
    self.summary.failed == 0 && self.summary.would_patch == 0
  }
}

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
  Json,
  Csv,
}

impl std::fmt::Display for ReportFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ReportFormat::Json => write!(f, "JSON"),
      ReportFormat::Csv => write!(f, "CSV"),
    }
  }
}

#[derive(Serialize)]
struct JsonReport<'a> {
  generated_at: String,
  version: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  commit: Option<&'static str>,
  check_only: bool,
  summary: &'a BatchSummary,
  files: &'a [FileReport],
}

/// Writes a [`BatchReport`] to disk.
pub struct ReportGenerator<'a> {
  format: ReportFormat,
  output_path: &'a Path,
}

impl<'a> ReportGenerator<'a> {
  pub const fn new(format: ReportFormat, output_path: &'a Path) -> Self {
    Self { format, output_path }
  }

  pub fn generate(&self, report: &BatchReport, check_only: bool) -> Result<()> {
    let content = match self.format {
      ReportFormat::Json => Self::generate_json(report, check_only)?,
      ReportFormat::Csv => Self::generate_csv(report),
    };

    fs::write(self.output_path, content)
      .with_context(|| format!("Failed to write {} report to {}", self.format, self.output_path.display()))
  }

  fn generate_json(report: &BatchReport, check_only: bool) -> Result<String> {
    let json = JsonReport {
      generated_at: Local::now().to_rfc3339(),
      version: env!("CARGO_PKG_VERSION"),
      commit: option_env!("GIT_HASH").filter(|hash| !hash.is_empty()),
      check_only,
      summary: &report.summary,
      files: &report.files,
    };

    serde_json::to_string_pretty(&json).context("Failed to serialize JSON report")
  }

  fn generate_csv(report: &BatchReport) -> String {
    let mut csv = String::from("index,path,outcome,message\n");

    for file in &report.files {
      csv.push_str(&format!(
        "{},{},{},{}\n",
        file.index,
        csv_field(&file.path.to_string_lossy()),
        file.outcome,
        csv_field(file.message.as_deref().unwrap_or(""))
      ));
    }

    csv
  }
}

/// Quotes a CSV field when it contains a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
  if value.contains([',', '"', '\n', '\r']) {
    format!("\"{}\"", value.replace('"', "\"\""))
  } else {
    value.to_string()
  }
}
