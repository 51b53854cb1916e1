//! The root build file, `<output>/Makefile2`.
//!
//! # Layout
//!
//! ```text
//! <disclaimer>
//! .SUFFIXES:                      implicit rule suppression
//! NAME = value                    injected variables, if any
//! default_target: ...             always the first rule
//! $(VERBOSE).SILENT:              unless verbose
//! all.depends: ...                default-set targets' stamp rules
//! all: ...                        default-set targets' .requires markers
//! include <target>.dir/<target>.make ...
//! ```

use std::path::PathBuf;

use tracing::debug;

use super::context::GenerationContext;
use super::rules::{Rule, RuleFile};
use super::types::{FileKind, GenerateError, GenerateReport};
use super::write::write_if_different;
use crate::consts::{REQUIRES_SUFFIX, ROOT_MAKEFILE};

/// Re-invocation command that builds `pseudo_target` through the root file.
fn make_command(ctx: &GenerationContext<'_>, pseudo_target: &str) -> String {
  let config = ctx.config;
  let mut cmd = format!(
    "{} -f {ROOT_MAKEFILE} $({})",
    config.make_program, config.silent_variable
  );
  if config.pass_makeflags {
    cmd.push_str(" -$(MAKEFLAGS)");
  }
  cmd.push(' ');
  cmd.push_str(pseudo_target);
  cmd
}

/// Build the root file's content.
pub fn root_rules(ctx: &GenerationContext<'_>) -> RuleFile {
  let project = ctx.project;
  let config = ctx.config;
  let paths = ctx.paths;

  let mut file = ctx.rule_file();
  file
    .comment("Disable some common implicit rules to speed things up.")
    .raw(".SUFFIXES:")
    .raw(".SUFFIXES:.hpuxmakemusthaverule")
    .blank();

  if !project.variables.is_empty() {
    file.comment("Set environment variables for the build.");
    for (name, value) in &project.variables {
      file.variable(name, value);
    }
    file.blank();
  }

  file.rule(
    Rule::new("default_target")
      .comment("Default target executed when no arguments are given to make.")
      .command(make_command(ctx, "all.depends"))
      .command(make_command(ctx, "all")),
  );

  if !config.verbose_makefile {
    file
      .comment("Suppress display of executed commands.")
      .raw(format!("$({}).SILENT:", config.verbose_variable))
      .blank();
  }

  let default_set: Vec<_> = project.targets().filter(|t| t.in_all).collect();

  file.rule(
    Rule::new("all.depends")
      .comment("all dependencies")
      .depends(default_set.iter().map(|t| paths.relative_output_path(&ctx.target_depends(t)))),
  );

  file.rule(
    Rule::new("all").comment("all").depends(
      default_set
        .iter()
        .map(|t| paths.relative_output_path(&ctx.output_dir().join(format!("{}{REQUIRES_SUFFIX}", t.name)))),
    ),
  );

  file.comment("Include target rule files.");
  for target in project.targets() {
    file.include(paths.output_for_existing(&ctx.target_rule_file(target)));
  }

  file
}

/// Write the root file with copy-if-different semantics.
pub fn emit_root(ctx: &GenerationContext<'_>, report: &mut GenerateReport) -> Result<PathBuf, GenerateError> {
  let path = ctx.root_file();
  let outcome = write_if_different(&path, &ctx.render(&root_rules(ctx)))?;
  debug!(path = %path.display(), ?outcome, "root file generated");
  report.record(path.clone(), FileKind::Root, outcome);
  Ok(path)
}
