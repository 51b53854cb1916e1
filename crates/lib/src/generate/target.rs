//! Per-target rule files.
//!
//! `<target>.dir/<target>.make` includes the target's dependency placeholder
//! and every object rule file, and defines the `<target>.depends` stamp rule.
//! Object rule files are written first so every include written here refers
//! to a file that already exists.

use std::path::PathBuf;

use tracing::{debug, error, warn};

use super::context::GenerationContext;
use super::object::{ObjectRecord, emit_object, plan_objects};
use super::rules::Rule;
use super::stamp::ensure_placeholder;
use super::types::{FileKind, GenerateError, GenerateReport};
use super::write::{create_dir, write_if_different};
use crate::project::Target;

/// Generate the rule tree for one target.
///
/// Object failures are recorded in `report` and the object is left out of the
/// target's includes. An error is returned only when the target's own
/// placeholder or rule file cannot be written.
pub fn emit_target(
  ctx: &GenerationContext<'_>,
  target: &Target,
  report: &mut GenerateReport,
) -> Result<PathBuf, GenerateError> {
  let dir = ctx.target_dir(target);
  if let Err(e) = create_dir(&dir) {
    warn!(target = %target.name, path = %dir.display(), error = %e, "failed to create target directory");
  }

  let mut objects: Vec<ObjectRecord> = Vec::new();
  for object in plan_objects(ctx, target) {
    match emit_object(ctx, &object, report) {
      Ok(_) => objects.push(object),
      Err(e) => {
        error!(target = %target.name, object = %object.name, error = %e, "failed to generate object rules");
        report.fail(FileKind::Object, &e);
      }
    }
  }

  let depends_file = ctx.target_depends_file(target);
  let outcome = ensure_placeholder(&depends_file, &format!("target {}", target.name), &ctx.disclaimer())?;
  report.stamp(&depends_file, outcome);

  let rule_file = ctx.target_rule_file(target);
  let depends = ctx.target_depends(target);
  let paths = ctx.paths;

  let mut file = ctx.rule_file();
  file
    .comment(format!("Rule file for target {}.", target.name))
    .blank()
    .comment("Include any dependencies generated for this rule.")
    .include(paths.output_for_existing(&depends_file))
    .blank();

  if !objects.is_empty() {
    file.comment("Include rules for object files.");
    for object in &objects {
      file.include(paths.output_for_existing(&object.rule_file()));
    }
    file.blank();
  }

  file.rule(
    Rule::new(paths.relative_output_path(&depends))
      .comment(format!("dependencies for {}", target.name))
      .depends(objects.iter().map(|o| paths.relative_output_path(&o.depends())))
      .depend(paths.relative_output_path(&rule_file))
      .command(format!("@touch {}", paths.relative_output_path(&depends))),
  );

  let outcome = write_if_different(&rule_file, &ctx.render(&file))?;
  debug!(target = %target.name, objects = objects.len(), ?outcome, "target rules generated");
  report.record(rule_file.clone(), FileKind::Target, outcome);
  Ok(rule_file)
}
