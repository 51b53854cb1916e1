//! Makefile rule graph generation.
//!
//! A generation pass reads a [`Project`](crate::project::Project) through a
//! [`GenerationContext`] and writes a tree of rule files under the project's
//! binary directory:
//!
//! ```text
//! Makefile2                 root build file
//! Makefile2.cmake           regeneration descriptor
//! <target>.dir/
//!   <target>.make           target rule file
//!   <target>.depends.make   dependency stamp placeholder
//!   <obj>.make              object rule file
//!   <obj>.depends.make      dependency stamp placeholder
//! ```
//!
//! Rule files are replaced only when their content changes, so a repeated
//! pass over an unchanged project leaves every modification time alone.
//! Stamp placeholders are created once and never rewritten; a dependency
//! scanner owns them afterwards.
//!
//! Failures are isolated per file. A file that cannot be written is recorded
//! in the [`GenerateReport`] and generation carries on with its siblings.

mod config;
mod context;
mod descriptor;
mod lang;
mod object;
mod paths;
mod root;
mod rules;
mod stamp;
mod target;
mod types;
mod write;

pub use config::{GeneratorConfig, is_on};
pub use context::GenerationContext;
pub use descriptor::{emit_descriptor, render_descriptor, write_descriptor};
pub use lang::{Language, object_extension};
pub use object::{ObjectRecord, emit_object, object_name, plan_objects};
pub use paths::{MakefilePathFormatter, PathFormatter};
pub use root::{emit_root, root_rules};
pub use rules::{Rule, RuleFile};
pub use stamp::ensure_placeholder;
pub use target::emit_target;
pub use types::*;
pub use write::{create_dir, write_always, write_if_different};

use std::time::Instant;

use tracing::{error, info, warn};

/// Generate the full rule tree for `ctx`'s project.
///
/// Targets are generated in name order, then the root file, then the
/// descriptor. The descriptor is written even when the root file fails.
pub fn generate(ctx: &GenerationContext<'_>) -> GenerateReport {
  let start = Instant::now();
  let project = ctx.project;
  info!(
    project = %project.name,
    output = %ctx.output_dir().display(),
    targets = project.target_count(),
    "generating rule tree"
  );

  let mut report = GenerateReport::default();

  if let Err(e) = create_dir(ctx.output_dir()) {
    warn!(error = %e, "failed to create output directory");
  }

  for target in project.targets() {
    if let Err(e) = emit_target(ctx, target, &mut report) {
      error!(target = %target.name, error = %e, "failed to generate target rules");
      report.fail(FileKind::Target, &e);
    }
  }

  match emit_root(ctx, &mut report) {
    Ok(path) => report.root_file = Some(path),
    Err(e) => {
      error!(error = %e, "failed to generate root file");
      report.fail(FileKind::Root, &e);
    }
  }

  match emit_descriptor(ctx) {
    Ok(path) => report.descriptor = Some(path),
    Err(e) => {
      error!(error = %e, "failed to write regeneration descriptor");
      report.fail(FileKind::Descriptor, &e);
    }
  }

  info!(
    changed = report.changed_count(),
    unchanged = report.unchanged_count(),
    stamps = report.stamps_created.len(),
    failures = report.failures.len(),
    elapsed_ms = start.elapsed().as_millis() as u64,
    "rule tree generated"
  );
  report
}
