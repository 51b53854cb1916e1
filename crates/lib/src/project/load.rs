//! Project snapshot loading.
//!
//! A snapshot is a JSON serialization of the project model produced by
//! whatever front end evaluated the project configuration.
//!
//! # Example Snapshot
//!
//! ```json
//! {
//!   "name": "demo",
//!   "source_dir": ".",
//!   "binary_dir": "build",
//!   "list_files": ["CMakeLists.txt"],
//!   "targets": [
//!     { "name": "app", "sources": ["a.c", { "path": "doc.h", "header_only": true }] }
//!   ]
//! }
//! ```
//!
//! `source_dir`, `binary_dir` and `home_output_dir` resolve against the
//! snapshot's directory; source paths and list files resolve against `source_dir`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use super::types::{Project, ProjectError, SourceFile, Target};
use crate::generate::GeneratorConfig;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProjectSpec {
  name: String,
  #[serde(default = "default_source_dir")]
  source_dir: PathBuf,
  binary_dir: PathBuf,
  #[serde(default)]
  home_output_dir: Option<PathBuf>,
  #[serde(default)]
  list_files: Vec<PathBuf>,
  #[serde(default)]
  variables: BTreeMap<String, String>,
  #[serde(default)]
  generator: GeneratorConfig,
  #[serde(default)]
  targets: Vec<TargetSpec>,
}

fn default_source_dir() -> PathBuf {
  PathBuf::from(".")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TargetSpec {
  name: String,
  #[serde(default = "default_in_all")]
  in_all: bool,
  #[serde(default)]
  sources: Vec<SourceSpec>,
}

fn default_in_all() -> bool {
  true
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SourceSpec {
  Path(PathBuf),
  Detailed(SourceDetail),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SourceDetail {
  path: PathBuf,
  #[serde(default)]
  extension: Option<String>,
  #[serde(default)]
  header_only: bool,
  #[serde(default)]
  custom_command: bool,
}

/// A loaded snapshot: the project model plus the dialect settings it carried.
#[derive(Debug, Clone)]
pub struct LoadedProject {
  pub project: Project,
  pub generator: GeneratorConfig,
}

/// Load a project snapshot from disk.
pub fn load_project(path: &Path) -> Result<LoadedProject, ProjectError> {
  info!(path = %path.display(), "loading project snapshot");

  let content = fs::read_to_string(path).map_err(|e| ProjectError::Read {
    path: path.to_path_buf(),
    source: e,
  })?;

  let base = path
    .parent()
    .filter(|p| !p.as_os_str().is_empty())
    .unwrap_or_else(|| Path::new("."));
  let base = dunce::canonicalize(base).unwrap_or_else(|_| base.to_path_buf());

  parse_project(&content, &base).map_err(|e| match e {
    ParseFailure::Json(source) => ProjectError::Parse {
      path: path.to_path_buf(),
      source,
    },
    ParseFailure::Model(e) => e,
  })
}

enum ParseFailure {
  Json(serde_json::Error),
  Model(ProjectError),
}

fn parse_project(content: &str, base: &Path) -> Result<LoadedProject, ParseFailure> {
  let spec: ProjectSpec = serde_json::from_str(content).map_err(ParseFailure::Json)?;

  let source_dir = normalize(&base.join(&spec.source_dir));
  let binary_dir = normalize(&base.join(&spec.binary_dir));

  let mut project = Project::new(spec.name, &source_dir, &binary_dir);
  if let Some(home) = spec.home_output_dir {
    project.home_output_dir = normalize(&base.join(home));
  }
  project.variables = spec.variables;
  for list_file in spec.list_files {
    project.add_list_file(normalize(&source_dir.join(list_file)));
  }

  for target_spec in spec.targets {
    let mut target = Target::new(target_spec.name);
    target.in_all = target_spec.in_all;
    for source in target_spec.sources {
      target.sources.push(resolve_source(source, &source_dir));
    }
    debug!(target = %target.name, sources = target.sources.len(), "loaded target");
    project.add_target(target).map_err(ParseFailure::Model)?;
  }

  info!(
    project = %project.name,
    targets = project.target_count(),
    binary_dir = %project.binary_dir.display(),
    "project snapshot loaded"
  );

  Ok(LoadedProject {
    project,
    generator: spec.generator,
  })
}

fn resolve_source(spec: SourceSpec, source_dir: &Path) -> SourceFile {
  match spec {
    SourceSpec::Path(path) => SourceFile::new(normalize(&source_dir.join(path))),
    SourceSpec::Detailed(detail) => {
      let mut source = SourceFile::new(normalize(&source_dir.join(detail.path)));
      if let Some(ext) = detail.extension {
        source.extension = ext.trim_start_matches('.').to_string();
      }
      source.header_only = detail.header_only;
      source.custom_command = detail.custom_command;
      source
    }
  }
}

/// Lexically normalize a path: drop `.` components and fold `..` where possible.
pub fn normalize(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        let popped = matches!(out.components().next_back(), Some(Component::Normal(_))) && out.pop();
        if !popped && !out.has_root() {
          out.push("..");
        }
      }
      other => out.push(other.as_os_str()),
    }
  }
  out
}
