use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::consts::TARGET_DIR_SUFFIX;

/// Errors that can occur while building or loading a project model.
#[derive(Debug, Error)]
pub enum ProjectError {
  #[error("failed to read project file {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse project file {}: {source}", path.display())]
  Parse { path: PathBuf, source: serde_json::Error },

  #[error("target name must not be empty")]
  EmptyTargetName,

  #[error("target name contains a path separator: {0}")]
  InvalidTargetName(String),

  #[error("duplicate target: {0}")]
  DuplicateTarget(String),
}

/// A single source file owned by a target.
///
/// Identity is the full path. The extension tag selects the object suffix,
/// and the two flags exclude the source from object rule generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
  /// Absolute path of the source.
  pub path: PathBuf,
  /// Extension without the leading dot (`c`, `cpp`, ...). May be empty.
  pub extension: String,
  /// Header-only sources are never compiled.
  pub header_only: bool,
  /// Produced by a custom command; handled outside the object rule path.
  pub custom_command: bool,
}

impl SourceFile {
  /// Create a compilable source, deriving the extension from the path.
  pub fn new(path: impl Into<PathBuf>) -> Self {
    let path = path.into();
    let extension = path
      .extension()
      .map(|e| e.to_string_lossy().into_owned())
      .unwrap_or_default();
    Self {
      path,
      extension,
      header_only: false,
      custom_command: false,
    }
  }

  pub fn header_only(mut self) -> Self {
    self.header_only = true;
    self
  }

  pub fn custom_command(mut self) -> Self {
    self.custom_command = true;
    self
  }

  /// Whether an object rule file is generated for this source.
  pub fn is_compiled(&self) -> bool {
    !self.header_only && !self.custom_command
  }
}

/// A named build product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
  pub name: String,
  /// Member of the default (`all`) build set.
  pub in_all: bool,
  pub sources: Vec<SourceFile>,
}

impl Target {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      in_all: true,
      sources: Vec::new(),
    }
  }

  /// Exclude the target from the default build set.
  pub fn exclude_from_all(mut self) -> Self {
    self.in_all = false;
    self
  }

  pub fn with_source(mut self, source: SourceFile) -> Self {
    self.sources.push(source);
    self
  }

  /// Name of the target's output directory (`<name>.dir`).
  pub fn directory_name(&self) -> String {
    format!("{}{}", self.name, TARGET_DIR_SUFFIX)
  }

  /// Sources that get an object rule file, in declaration order.
  pub fn compiled_sources(&self) -> impl Iterator<Item = &SourceFile> {
    self.sources.iter().filter(|s| s.is_compiled())
  }
}

/// Read-only snapshot of a project handed to the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
  pub name: String,
  /// Current source directory (project root).
  pub source_dir: PathBuf,
  /// Current output directory; the rule tree is generated here.
  pub binary_dir: PathBuf,
  /// Top-level output directory holding the cache marker.
  pub home_output_dir: PathBuf,
  /// Configuration inputs observed while the model was built.
  pub list_files: Vec<PathBuf>,
  /// Build-tool variables injected verbatim into the root file.
  pub variables: BTreeMap<String, String>,
  targets: BTreeMap<String, Target>,
}

impl Project {
  pub fn new(name: impl Into<String>, source_dir: impl Into<PathBuf>, binary_dir: impl Into<PathBuf>) -> Self {
    let binary_dir = binary_dir.into();
    Self {
      name: name.into(),
      source_dir: source_dir.into(),
      home_output_dir: binary_dir.clone(),
      binary_dir,
      list_files: Vec::new(),
      variables: BTreeMap::new(),
      targets: BTreeMap::new(),
    }
  }

  /// Add a target, rejecting empty, path-like, or duplicate names.
  pub fn add_target(&mut self, target: Target) -> Result<(), ProjectError> {
    if target.name.is_empty() {
      return Err(ProjectError::EmptyTargetName);
    }
    if target.name.contains(['/', '\\']) {
      return Err(ProjectError::InvalidTargetName(target.name));
    }
    if self.targets.contains_key(&target.name) {
      return Err(ProjectError::DuplicateTarget(target.name));
    }
    self.targets.insert(target.name.clone(), target);
    Ok(())
  }

  pub fn add_list_file(&mut self, path: impl Into<PathBuf>) {
    self.list_files.push(path.into());
  }

  /// Targets in stable (name) order.
  pub fn targets(&self) -> impl Iterator<Item = &Target> {
    self.targets.values()
  }

  pub fn target(&self, name: &str) -> Option<&Target> {
    self.targets.get(name)
  }

  pub fn target_count(&self) -> usize {
    self.targets.len()
  }

  /// `dir` relative to the source or binary directory, whichever contains it.
  pub fn relative_dir<'d>(&self, dir: &'d Path) -> Option<&'d Path> {
    [&self.source_dir, &self.binary_dir]
      .into_iter()
      .find_map(|root| dir.strip_prefix(root).ok())
  }

  /// Whether `dir` lies inside the source or binary directory.
  pub fn contains_dir(&self, dir: &Path) -> bool {
    self.relative_dir(dir).is_some()
  }
}
