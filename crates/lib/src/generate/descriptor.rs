//! Regeneration descriptor, `<output>/Makefile2.cmake`.
//!
//! Lists the configuration inputs the root file was generated from, plus the
//! cache marker, so a later check can tell whether regeneration is needed.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::context::GenerationContext;
use super::types::GenerateError;
use super::write::write_always;
use crate::consts::CACHE_FILENAME;

fn quoted(path: &Path) -> String {
  format!("  \"{}\"\n", path.to_string_lossy().replace('\\', "/"))
}

/// Render the descriptor text.
///
/// `inputs` are sorted and de-duplicated; `cache_marker` always comes first.
pub fn render_descriptor<'p>(
  header: &str,
  makefile: &Path,
  cache_marker: &Path,
  inputs: impl IntoIterator<Item = &'p Path>,
) -> String {
  let unique: BTreeSet<String> = inputs
    .into_iter()
    .map(|p| p.to_string_lossy().replace('\\', "/"))
    .collect();

  let mut out = String::from(header);
  out.push_str("# The corresponding makefile\n");
  out.push_str(&format!("# \"{}\"\n", makefile.to_string_lossy().replace('\\', "/")));
  out.push_str("# was generated from the following files:\n");
  out.push_str("SET(CMAKE_MAKEFILE_DEPENDS\n");
  out.push_str(&quoted(cache_marker));
  for input in &unique {
    out.push_str(&format!("  \"{input}\"\n"));
  }
  out.push_str("  )\n\n");

  out.push_str("# The corresponding makefile is:\n");
  out.push_str("SET(CMAKE_MAKEFILE_OUTPUTS\n");
  out.push_str(&quoted(makefile));
  out.push_str("  )\n");
  out
}

/// Overwrite the descriptor at `path`.
pub fn write_descriptor(path: &Path, contents: &str) -> Result<(), GenerateError> {
  write_always(path, contents)?;
  debug!(path = %path.display(), "descriptor written");
  Ok(())
}

/// Render and write the descriptor for `ctx`'s project.
pub fn emit_descriptor(ctx: &GenerationContext<'_>) -> Result<PathBuf, GenerateError> {
  let project = ctx.project;
  let path = ctx.descriptor_file();
  let cache_marker = project.home_output_dir.join(CACHE_FILENAME);
  let contents = render_descriptor(
    &ctx.disclaimer(),
    &ctx.root_file(),
    &cache_marker,
    project.list_files.iter().map(PathBuf::as_path),
  );
  write_descriptor(&path, &contents)?;
  Ok(path)
}
