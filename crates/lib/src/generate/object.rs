//! Per-object rule files.
//!
//! Each compiled source gets `<target>.dir/<objname>.make` and a
//! `<objname>.depends.make` placeholder. The object name keeps the source's
//! location relative to the project when the source lives inside it, so
//! same-named files in different directories do not collide.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::context::{GenerationContext, append};
use super::lang::object_extension;
use super::rules::Rule;
use super::stamp::ensure_placeholder;
use super::types::{FileKind, GenerateError, GenerateReport};
use super::write::{create_dir, write_if_different};
use crate::consts::{DEPENDS_SUFFIX, RULE_FILE_SUFFIX};
use crate::project::{Project, SourceFile, Target};
use crate::util::hash::path_digest;

/// A compiled source paired with its object path inside the target directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRecord {
  /// Object name relative to the target directory (`sub/a.c.o`).
  pub name: String,
  /// Full object path (`<output>/<target>.dir/sub/a.c.o`).
  pub path: PathBuf,
  /// Full path of the source it is compiled from.
  pub source: PathBuf,
}

impl ObjectRecord {
  /// `<obj>.make`
  pub fn rule_file(&self) -> PathBuf {
    append(&self.path, RULE_FILE_SUFFIX)
  }

  /// `<obj>.depends` (the stamp rule's target)
  pub fn depends(&self) -> PathBuf {
    append(&self.path, DEPENDS_SUFFIX)
  }

  /// `<obj>.depends.make`
  pub fn depends_file(&self) -> PathBuf {
    append(&self.depends(), RULE_FILE_SUFFIX)
  }
}

/// Object name stem for a source, without the object extension.
///
/// Inside the source or binary directory the stem is the relative path minus
/// the extension; anywhere else it is the bare file stem.
fn object_stem(project: &Project, source: &SourceFile) -> String {
  let path = &source.path;
  let file_stem = path
    .file_stem()
    .map(|s| s.to_string_lossy().into_owned())
    .unwrap_or_default();

  let parent = path.parent().unwrap_or_else(|| Path::new(""));
  match project.relative_dir(parent) {
    Some(rel) if !rel.as_os_str().is_empty() => {
      let rel = rel.to_string_lossy().replace('\\', "/");
      format!("{rel}/{file_stem}")
    }
    _ => file_stem,
  }
}

/// Object name (relative to the target directory) for a source.
pub fn object_name(ctx: &GenerationContext<'_>, source: &SourceFile) -> String {
  let stem = object_stem(ctx.project, source);
  format!("{stem}{}", object_extension(ctx.config, &source.extension))
}

/// Name used when [`object_name`] collides with an earlier object of the same target.
///
/// The stem gets a digest of the source's directory. Sources from one
/// directory share that digest, so a counter follows it until the name is free.
fn disambiguated_name(ctx: &GenerationContext<'_>, source: &SourceFile, used: &HashSet<String>) -> String {
  let base = object_name(ctx, source);
  let ext = object_extension(ctx.config, &source.extension);
  let stem = base.strip_suffix(ext.as_str()).unwrap_or(&base);
  let digest = path_digest(source.path.parent().unwrap_or_else(|| Path::new("")));

  let mut name = format!("{stem}-{digest}{ext}");
  let mut n = 1;
  while used.contains(&name) {
    n += 1;
    name = format!("{stem}-{digest}-{n}{ext}");
  }
  name
}

/// Compute the object records for a target's compiled sources, in source order.
///
/// A source listed twice is compiled once. When two different sources map to
/// the same object name, every later one gets a name suffixed with a digest
/// of its directory, plus a counter if that is taken too.
pub fn plan_objects(ctx: &GenerationContext<'_>, target: &Target) -> Vec<ObjectRecord> {
  let target_dir = ctx.target_dir(target);
  let mut seen_sources = HashSet::new();
  let mut used_names = HashSet::new();
  let mut records = Vec::new();

  for source in target.compiled_sources() {
    if !seen_sources.insert(source.path.clone()) {
      debug!(target = %target.name, source = %source.path.display(), "skipping duplicate source");
      continue;
    }

    let mut name = object_name(ctx, source);
    if used_names.contains(&name) {
      let unique = disambiguated_name(ctx, source, &used_names);
      warn!(
        target = %target.name,
        source = %source.path.display(),
        object = %name,
        renamed = %unique,
        "object name collision"
      );
      name = unique;
    }
    used_names.insert(name.clone());

    records.push(ObjectRecord {
      path: target_dir.join(&name),
      name,
      source: source.path.clone(),
    });
  }

  records
}

/// Write the rule file and placeholder for one object.
///
/// Returns the rule file path. The object's containing directory is created first.
pub fn emit_object(
  ctx: &GenerationContext<'_>,
  object: &ObjectRecord,
  report: &mut GenerateReport,
) -> Result<PathBuf, GenerateError> {
  if let Some(dir) = object.path.parent()
    && let Err(e) = create_dir(dir)
  {
    warn!(path = %dir.display(), error = %e, "failed to create object directory");
  }

  let depends_file = object.depends_file();
  let outcome = ensure_placeholder(&depends_file, &format!("object file {}", object.name), &ctx.disclaimer())?;
  report.stamp(&depends_file, outcome);

  let rule_file = object.rule_file();
  let depends = object.depends();
  let paths = ctx.paths;

  let mut file = ctx.rule_file();
  file
    .comment(format!("Rule file for object file {}.", object.name))
    .blank()
    .comment("Include any dependencies generated for this rule.")
    .include(paths.output_for_existing(&depends_file))
    .blank()
    .rule(
      Rule::new(paths.relative_output_path(&depends))
        .comment(format!("dependencies for {}", object.name))
        .depend(paths.relative_output_path(&object.source))
        .depend(paths.relative_output_path(&rule_file))
        .command(format!("@touch {}", paths.relative_output_path(&depends))),
    );

  let outcome = write_if_different(&rule_file, &ctx.render(&file))?;
  report.record(rule_file.clone(), FileKind::Object, outcome);
  Ok(rule_file)
}
