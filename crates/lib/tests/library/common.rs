use std::fs;
use std::path::{Path, PathBuf};

use mkgen_lib::generate::{GenerateReport, GenerationContext, GeneratorConfig, MakefilePathFormatter, generate};
use mkgen_lib::project::Project;
use tempfile::TempDir;
use walkdir::WalkDir;

/// A scratch source tree with a sibling build directory.
pub struct Workspace {
  pub temp: TempDir,
  pub src: PathBuf,
  pub build: PathBuf,
}

impl Workspace {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let root = dunce::canonicalize(temp.path()).unwrap();
    let src = root.join("src");
    let build = root.join("build");
    fs::create_dir_all(&src).unwrap();
    Self { temp, src, build }
  }

  pub fn project(&self, name: &str) -> Project {
    Project::new(name, &self.src, &self.build)
  }

  pub fn build_path(&self, rel: &str) -> PathBuf {
    self.build.join(rel)
  }

  pub fn read(&self, rel: &str) -> String {
    fs::read_to_string(self.build_path(rel)).unwrap()
  }

  /// Write a file into the project root, e.g. a snapshot.
  pub fn write_root(&self, rel: &str, contents: &str) -> PathBuf {
    let path = self.temp.path().join(rel);
    fs::write(&path, contents).unwrap();
    path
  }
}

/// Run one generation pass with the default dialect.
pub fn run(project: &Project) -> GenerateReport {
  run_with(project, &GeneratorConfig::default())
}

pub fn run_with(project: &Project, config: &GeneratorConfig) -> GenerateReport {
  let fmt = MakefilePathFormatter::new(&project.binary_dir);
  let ctx = GenerationContext::new(project, config, &fmt);
  generate(&ctx)
}

/// Every regular file under `dir` with its content, sorted by path.
pub fn snapshot_tree(dir: &Path) -> Vec<(PathBuf, Vec<u8>)> {
  WalkDir::new(dir)
    .sort_by_file_name()
    .into_iter()
    .map(|entry| entry.unwrap())
    .filter(|entry| entry.file_type().is_file())
    .map(|entry| {
      let content = fs::read(entry.path()).unwrap();
      (entry.into_path(), content)
    })
    .collect()
}

/// Paths named by `include` lines in a rule file's text.
pub fn includes(text: &str) -> Vec<&str> {
  text.lines().filter_map(|l| l.strip_prefix("include ")).collect()
}
