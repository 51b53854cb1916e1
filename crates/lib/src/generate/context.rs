use std::path::{Path, PathBuf};

use super::config::GeneratorConfig;
use super::paths::PathFormatter;
use super::rules::RuleFile;
use crate::consts::{APP_NAME, DEPENDS_SUFFIX, DESCRIPTOR_SUFFIX, ROOT_MAKEFILE, RULE_FILE_SUFFIX};
use crate::project::{Project, Target};

/// Everything one generation pass reads.
///
/// The context is immutable; generation only touches the filesystem under
/// [`Self::output_dir`].
#[derive(Clone, Copy)]
pub struct GenerationContext<'a> {
  pub project: &'a Project,
  pub config: &'a GeneratorConfig,
  pub paths: &'a dyn PathFormatter,
}

impl<'a> GenerationContext<'a> {
  pub fn new(project: &'a Project, config: &'a GeneratorConfig, paths: &'a dyn PathFormatter) -> Self {
    Self { project, config, paths }
  }

  pub fn output_dir(&self) -> &Path {
    &self.project.binary_dir
  }

  /// `<output>/Makefile2`
  pub fn root_file(&self) -> PathBuf {
    self.output_dir().join(ROOT_MAKEFILE)
  }

  /// `<output>/Makefile2.cmake`
  pub fn descriptor_file(&self) -> PathBuf {
    self.output_dir().join(format!("{ROOT_MAKEFILE}{DESCRIPTOR_SUFFIX}"))
  }

  /// `<output>/<name>.dir`
  pub fn target_dir(&self, target: &Target) -> PathBuf {
    self.output_dir().join(target.directory_name())
  }

  /// `<output>/<name>.dir/<name>.make`
  pub fn target_rule_file(&self, target: &Target) -> PathBuf {
    self
      .target_dir(target)
      .join(format!("{}{RULE_FILE_SUFFIX}", target.name))
  }

  /// `<output>/<name>.dir/<name>.depends` (the stamp rule's target)
  pub fn target_depends(&self, target: &Target) -> PathBuf {
    self
      .target_dir(target)
      .join(format!("{}{DEPENDS_SUFFIX}", target.name))
  }

  /// `<output>/<name>.dir/<name>.depends.make`
  pub fn target_depends_file(&self, target: &Target) -> PathBuf {
    append(&self.target_depends(target), RULE_FILE_SUFFIX)
  }

  /// Disclaimer header placed at the top of every generated file.
  pub fn disclaimer(&self) -> String {
    format!(
      "# {APP_NAME} generated file: DO NOT EDIT!\n\
       # Generated by \"{}\" Generator, {APP_NAME} Version {}.{}\n\n",
      self.config.generator_name,
      env!("CARGO_PKG_VERSION_MAJOR"),
      env!("CARGO_PKG_VERSION_MINOR"),
    )
  }

  /// Start a rule file with the disclaimer.
  pub fn rule_file(&self) -> RuleFile {
    let mut file = RuleFile::new();
    file.raw(self.disclaimer().trim_end_matches('\n')).blank();
    file
  }

  /// Render with the configured include directive.
  pub fn render(&self, file: &RuleFile) -> String {
    file.render(&self.config.include_directive)
  }
}

/// Append a suffix to a path's final component (`a.c.o` + `.make`).
pub(crate) fn append(path: &Path, suffix: &str) -> PathBuf {
  let mut s = path.as_os_str().to_owned();
  s.push(suffix);
  PathBuf::from(s)
}
