//! Test fixtures for mkgen-lib.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::project::Project;

/// A temporary source tree and an empty binary directory beside it.
pub struct TreeFixture {
  _temp: TempDir,
  pub src: PathBuf,
  pub build: PathBuf,
}

impl TreeFixture {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    let build = temp.path().join("build");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&build).unwrap();
    Self { _temp: temp, src, build }
  }

  /// An empty project rooted at this tree.
  pub fn project(&self, name: &str) -> Project {
    Project::new(name, &self.src, &self.build)
  }

  /// Read a generated file relative to the binary directory.
  pub fn read(&self, rel: impl AsRef<Path>) -> String {
    fs::read_to_string(self.build.join(rel)).unwrap()
  }
}
