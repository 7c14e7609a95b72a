//! # File I/O Module
//!
//! Whole-file UTF-8 reads and writes for target files.

use std::path::Path;

use super::PatchError;

/// File I/O operations for the patcher.
pub struct FileIO;

impl FileIO {
  /// Reads the full file as UTF-8. Invalid UTF-8 is reported as a read error.
  pub fn read_full_content(path: &Path) -> Result<String, PatchError> {
    std::fs::read_to_string(path).map_err(|e| PatchError::Read {
      path: path.to_path_buf(),
      source: e,
    })
  }

  /// Overwrites `path` with `content`.
  pub fn write_file(path: &Path, content: &str) -> Result<(), PatchError> {
    std::fs::write(path, content).map_err(|e| PatchError::Write {
      path: path.to_path_buf(),
      source: e,
    })
  }
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_round_trip_preserves_bytes() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("BlogPost1.jsx");
    let content = "const a = \"é\"\r\nexport default BlogPost1";

    FileIO::write_file(&path, content).expect("write");
    assert_eq!(FileIO::read_full_content(&path).expect("read"), content);
  }

  #[test]
  fn test_invalid_utf8_is_read_error() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("binary.jsx");
    std::fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).expect("write bytes");

    let err = FileIO::read_full_content(&path).expect_err("should fail");
    assert!(matches!(err, PatchError::Read { .. }));
    assert!(err.to_string().contains("binary.jsx"));
  }

  #[test]
  fn test_write_into_missing_directory_fails() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("missing").join("file.jsx");

    let err = FileIO::write_file(&path, "x").expect_err("should fail");
    assert!(matches!(err, PatchError::Write { .. }));
  }

  #[test]
  fn test_write_under_regular_file_fails() {
    let dir = tempdir().expect("create temp dir");
    let parent = dir.path().join("BlogPost1.jsx");
    std::fs::write(&parent, "export default BlogPost1").expect("write");

    let err = FileIO::write_file(&parent.join("nested.jsx"), "x").expect_err("should fail");
    assert!(matches!(err, PatchError::Write { .. }));
    assert!(err.to_string().starts_with("Failed to write"));
  }
}
