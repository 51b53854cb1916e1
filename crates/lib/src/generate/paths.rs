//! Path formatting for rule text.
//!
//! Every path that ends up inside a generated file goes through a
//! [`PathFormatter`], so the tool-specific quoting rules live in one place.

use std::path::{Path, PathBuf};

/// Converts filesystem paths into the text written into rule files.
pub trait PathFormatter {
  /// Path as used in rule targets, prerequisites and commands.
  fn relative_output_path(&self, path: &Path) -> String;

  /// Path of an already existing file, as used in an include directive.
  fn output_for_existing(&self, path: &Path) -> String {
    self.relative_output_path(path)
  }
}

/// Formatter for POSIX make run from the output directory.
///
/// Paths under the output directory become relative to it; anything else
/// stays absolute. Separators are normalized to `/` and spaces are escaped.
#[derive(Debug, Clone)]
pub struct MakefilePathFormatter {
  output_dir: PathBuf,
}

impl MakefilePathFormatter {
  pub fn new(output_dir: impl Into<PathBuf>) -> Self {
    Self {
      output_dir: output_dir.into(),
    }
  }
}

impl PathFormatter for MakefilePathFormatter {
  fn relative_output_path(&self, path: &Path) -> String {
    let shown = match path.strip_prefix(&self.output_dir) {
      Ok(rel) if !rel.as_os_str().is_empty() => rel,
      Ok(_) => Path::new("."),
      Err(_) => path,
    };
    escape_for_make(&shown.to_string_lossy())
  }
}

fn escape_for_make(path: &str) -> String {
  path.replace('\\', "/").replace(' ', "\\ ")
}
