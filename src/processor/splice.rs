//! # Splice Module
//!
//! The marker/anchor/insert rule as a pure string transformation, kept apart
//! from file I/O.

use std::borrow::Cow;

use regex::Regex;

/// What [`splice_block`] did with the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpliceOutcome {
  /// The marker was already present; nothing changed.
  AlreadyPatched,
  /// The block was inserted before the first anchor match.
  Inserted,
  /// Neither marker nor anchor was found; nothing changed.
  AnchorNotFound,
}

/// Inserts `block` followed by a newline immediately before the first match of
/// `anchor`, unless `marker` already occurs in `content`.
///
/// Only the first anchor match receives the block. Everything before and
/// after the insertion point is kept byte for byte. Unless the outcome is
/// [`SpliceOutcome::Inserted`], the returned content borrows the input.
pub fn splice_block<'a>(content: &'a str, marker: &str, anchor: &Regex, block: &str) -> (Cow<'a, str>, SpliceOutcome) {
  if content.contains(marker) {
    return (Cow::Borrowed(content), SpliceOutcome::AlreadyPatched);
  }

  let Some(found) = anchor.find(content) else {
    return (Cow::Borrowed(content), SpliceOutcome::AnchorNotFound);
  };

  let (head, tail) = content.split_at(found.start());
  let mut patched = String::with_capacity(content.len() + block.len() + 1);
  patched.push_str(head);
  patched.push_str(block);
  patched.push('\n');
  patched.push_str(tail);

  (Cow::Owned(patched), SpliceOutcome::Inserted)
}
