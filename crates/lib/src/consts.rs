//! Names and fixed strings shared across the generator.

pub const APP_NAME: &str = "mkgen";

/// Default project snapshot looked up by the CLI.
pub const PROJECT_FILENAME: &str = "mkgen.json";

/// Root build file written into the output directory.
pub const ROOT_MAKEFILE: &str = "Makefile2";

/// Suffix appended to the root build file name to form the regeneration descriptor.
pub const DESCRIPTOR_SUFFIX: &str = ".cmake";

/// Cache marker always listed first among the descriptor's inputs.
pub const CACHE_FILENAME: &str = "CMakeCache.txt";

/// Suffix of the per-target output directory (`<name>.dir`).
pub const TARGET_DIR_SUFFIX: &str = ".dir";

/// Suffix of a rule file (`<target>.make`, `<object>.make`).
pub const RULE_FILE_SUFFIX: &str = ".make";

/// Suffix of a dependency stamp target (`<target>.depends`).
pub const DEPENDS_SUFFIX: &str = ".depends";

/// Suffix of the pseudo-target each target rule file is expected to provide.
pub const REQUIRES_SUFFIX: &str = ".requires";

/// Length of the directory digest used to disambiguate colliding object names.
pub const OBJ_DIGEST_LEN: usize = 8;

/// Environment override for [`GeneratorConfig::verbose_makefile`](crate::generate::GeneratorConfig).
pub const ENV_VERBOSE_MAKEFILE: &str = "MKGEN_VERBOSE_MAKEFILE";

/// Environment override for [`GeneratorConfig::pass_makeflags`](crate::generate::GeneratorConfig).
pub const ENV_PASS_MAKEFLAGS: &str = "MKGEN_PASS_MAKEFLAGS";
