use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{ENV_PASS_MAKEFLAGS, ENV_VERBOSE_MAKEFILE};

/// Dialect settings for the generated makefiles.
///
/// One generator serves every make flavour; the differences between them are
/// the strings and switches recorded here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
  /// Name shown in the disclaimer header.
  pub generator_name: String,
  /// Keyword used to include child rule files.
  pub include_directive: String,
  /// Command used to re-invoke the build tool on the root file.
  pub make_program: String,
  /// Variable holding the tool's silent-mode flags, referenced as `$(NAME)`.
  pub silent_variable: String,
  /// Variable that, when set, disables the `.SILENT:` directive.
  pub verbose_variable: String,
  /// Forward the caller's flags explicitly with `-$(MAKEFLAGS)`.
  pub pass_makeflags: bool,
  /// Echo every command; omits the silence directive.
  pub verbose_makefile: bool,
  /// Object suffix used when a language has no override.
  pub object_suffix: String,
  /// Per-language object suffix overrides, keyed by language name (`C`, `CXX`, ...).
  pub object_suffixes: BTreeMap<String, String>,
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self {
      generator_name: "Unix Makefiles".to_string(),
      include_directive: "include".to_string(),
      make_program: "$(MAKE)".to_string(),
      silent_variable: "MAKESILENT".to_string(),
      verbose_variable: "VERBOSE".to_string(),
      pass_makeflags: false,
      verbose_makefile: false,
      object_suffix: ".o".to_string(),
      object_suffixes: BTreeMap::new(),
    }
  }
}

impl GeneratorConfig {
  /// Apply `MKGEN_VERBOSE_MAKEFILE` / `MKGEN_PASS_MAKEFLAGS` overrides from the environment.
  pub fn with_env_overrides(mut self) -> Self {
    if let Some(value) = env_flag(ENV_VERBOSE_MAKEFILE) {
      debug!(var = ENV_VERBOSE_MAKEFILE, value, "environment override");
      self.verbose_makefile = value;
    }
    if let Some(value) = env_flag(ENV_PASS_MAKEFLAGS) {
      debug!(var = ENV_PASS_MAKEFLAGS, value, "environment override");
      self.pass_makeflags = value;
    }
    self
  }

  /// Object suffix for a language, falling back to [`Self::object_suffix`].
  pub fn object_suffix_for(&self, language: Option<&str>) -> &str {
    language
      .and_then(|lang| self.object_suffixes.get(lang))
      .map(String::as_str)
      .unwrap_or(&self.object_suffix)
  }
}

fn env_flag(name: &str) -> Option<bool> {
  std::env::var(name).ok().map(|v| is_on(&v))
}

/// CMake-style truthiness: `1`, `ON`, `YES`, `TRUE`, `Y` (case-insensitive).
pub fn is_on(value: &str) -> bool {
  matches!(
    value.trim().to_ascii_uppercase().as_str(),
    "1" | "ON" | "YES" | "TRUE" | "Y"
  )
}
