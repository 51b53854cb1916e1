//! Implementation of the `mkgen objects` command.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use mkgen_lib::generate::{GenerationContext, MakefilePathFormatter, plan_objects};
use mkgen_lib::project::load_project;

use crate::output::{OutputFormat, print_json, symbols};

#[derive(Debug, Serialize)]
struct TargetObjects {
  target: String,
  in_all: bool,
  objects: Vec<ObjectEntry>,
}

#[derive(Debug, Serialize)]
struct ObjectEntry {
  source: String,
  object: String,
  in_tree: bool,
}

/// Print the object name every compiled source maps to. Nothing is written.
pub fn cmd_objects(project_file: &Path, output: OutputFormat) -> Result<()> {
  let loaded = load_project(project_file)
    .with_context(|| format!("Failed to load project {}", project_file.display()))?;
  let project = loaded.project;
  let config = loaded.generator.with_env_overrides();

  let formatter = MakefilePathFormatter::new(&project.binary_dir);
  let ctx = GenerationContext::new(&project, &config, &formatter);

  let listing: Vec<TargetObjects> = project
    .targets()
    .map(|target| TargetObjects {
      target: target.name.clone(),
      in_all: target.in_all,
      objects: plan_objects(&ctx, target)
        .into_iter()
        .map(|obj| ObjectEntry {
          in_tree: obj.source.parent().is_some_and(|dir| project.contains_dir(dir)),
          source: obj.source.display().to_string(),
          object: obj.name,
        })
        .collect(),
    })
    .collect();

  if output.is_json() {
    return print_json(&listing);
  }

  for entry in &listing {
    let suffix = if entry.in_all { "" } else { " (excluded from all)" };
    println!("{}{}", entry.target, suffix);
    for obj in &entry.objects {
      let marker = if obj.in_tree { "" } else { " [out of tree]" };
      println!("  {} {} {}{}", obj.object, symbols::ARROW, obj.source, marker);
    }
  }

  Ok(())
}
