//! Error and report types for rule graph generation.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// A failed file operation. Every variant names the file and carries the OS error.
#[derive(Debug, Error)]
pub enum GenerateError {
  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },

  #[error("can not open {} for write: {source}", path.display())]
  Open { path: PathBuf, source: std::io::Error },

  #[error("failed to write {}: {source}", path.display())]
  Write { path: PathBuf, source: std::io::Error },

  #[error("failed to replace {}: {source}", path.display())]
  Persist { path: PathBuf, source: std::io::Error },
}

impl GenerateError {
  pub fn path(&self) -> &Path {
    match self {
      GenerateError::CreateDir { path, .. }
      | GenerateError::Open { path, .. }
      | GenerateError::Write { path, .. }
      | GenerateError::Persist { path, .. } => path,
    }
  }
}

/// Result of a copy-if-different write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
  /// The file did not exist before.
  Created,
  /// The file existed with different content and was replaced.
  Updated,
  /// The file already had identical content and was left untouched.
  Unchanged,
}

impl WriteOutcome {
  pub fn is_changed(self) -> bool {
    !matches!(self, WriteOutcome::Unchanged)
  }
}

/// Result of ensuring a dependency stamp placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StampOutcome {
  Created,
  Existing,
}

/// What kind of generated file a record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
  Root,
  Target,
  Object,
  Descriptor,
}

/// One rule file written (or left alone) by a generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
  pub path: PathBuf,
  pub kind: FileKind,
  pub outcome: WriteOutcome,
}

/// One file the pass had to abandon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
  pub path: PathBuf,
  pub kind: FileKind,
  pub message: String,
}

/// Summary of a generation pass.
///
/// Failures are isolated per file, so a report can contain both written files
/// and failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerateReport {
  pub files: Vec<FileRecord>,
  pub stamps_created: Vec<PathBuf>,
  pub failures: Vec<Failure>,
  pub root_file: Option<PathBuf>,
  pub descriptor: Option<PathBuf>,
}

impl GenerateReport {
  pub(crate) fn record(&mut self, path: PathBuf, kind: FileKind, outcome: WriteOutcome) {
    self.files.push(FileRecord { path, kind, outcome });
  }

  pub(crate) fn fail(&mut self, kind: FileKind, err: &GenerateError) {
    self.failures.push(Failure {
      path: err.path().to_path_buf(),
      kind,
      message: err.to_string(),
    });
  }

  pub(crate) fn stamp(&mut self, path: &Path, outcome: StampOutcome) {
    if outcome == StampOutcome::Created {
      self.stamps_created.push(path.to_path_buf());
    }
  }

  /// Number of copy-if-different files whose content changed.
  pub fn changed_count(&self) -> usize {
    self.files.iter().filter(|f| f.outcome.is_changed()).count()
  }

  pub fn unchanged_count(&self) -> usize {
    self.files.len() - self.changed_count()
  }

  pub fn is_success(&self) -> bool {
    self.failures.is_empty()
  }

  pub fn outcome_of(&self, path: &Path) -> Option<WriteOutcome> {
    self.files.iter().find(|f| f.path == path).map(|f| f.outcome)
  }
}
