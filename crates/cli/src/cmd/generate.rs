//! Implementation of the `mkgen generate` command.
//!
//! Loads a project snapshot, resolves the dialect settings and writes the rule
//! tree into the project's binary directory.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::info;

use mkgen_lib::generate::{GenerationContext, GeneratorConfig, MakefilePathFormatter, generate};
use mkgen_lib::project::load_project;

use crate::output::{OutputFormat, format_duration, print_error, print_info, print_json, print_stat, print_success, print_warning};

/// Command-line switches that take precedence over the snapshot and environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateFlags {
  pub verbose_makefile: bool,
  pub pass_makeflags: bool,
}

impl GenerateFlags {
  fn apply(self, mut config: GeneratorConfig) -> GeneratorConfig {
    if self.verbose_makefile {
      config.verbose_makefile = true;
    }
    if self.pass_makeflags {
      config.pass_makeflags = true;
    }
    config
  }
}

/// Execute the generate command.
///
/// Configuration is resolved from defaults, then the snapshot's `generator`
/// section, then `MKGEN_*` environment variables, then `flags`. Fails when any
/// file could not be written.
pub fn cmd_generate(project_file: &Path, flags: GenerateFlags, output: OutputFormat) -> Result<()> {
  let start = Instant::now();

  let loaded = load_project(project_file)
    .with_context(|| format!("Failed to load project {}", project_file.display()))?;
  let project = loaded.project;
  let config = flags.apply(loaded.generator.with_env_overrides());
  info!(
    verbose_makefile = config.verbose_makefile,
    pass_makeflags = config.pass_makeflags,
    "resolved generator settings"
  );

  let formatter = MakefilePathFormatter::new(&project.binary_dir);
  let ctx = GenerationContext::new(&project, &config, &formatter);
  let report = generate(&ctx);

  if output.is_json() {
    print_json(&report)?;
  } else {
    println!();
    if report.is_success() && report.changed_count() == 0 {
      print_info("Rule tree is up to date");
    } else if report.is_success() {
      print_success(&format!("Generated {} in {}", project.name, project.binary_dir.display()));
    } else {
      print_warning(&format!("Generated {} with errors", project.name));
    }
    print_stat("Targets", &project.target_count().to_string());
    print_stat("Files changed", &report.changed_count().to_string());
    print_stat("Files unchanged", &report.unchanged_count().to_string());
    print_stat("Stamps created", &report.stamps_created.len().to_string());
    print_stat("Failures", &report.failures.len().to_string());
    print_stat("Duration", &format_duration(start.elapsed()));

    for failure in &report.failures {
      print_error(&failure.message);
    }
  }

  if !report.is_success() {
    bail!("{} file(s) could not be generated", report.failures.len());
  }

  Ok(())
}
