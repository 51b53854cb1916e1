//! Source language detection and object extension resolution.

use super::config::GeneratorConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
  C,
  Cxx,
  Fortran,
  Asm,
}

impl Language {
  /// Detect the language from a source extension (without the leading dot).
  ///
  /// Matching is case-sensitive where it matters: `.C` is C++ while `.c` is C.
  pub fn from_extension(ext: &str) -> Option<Self> {
    match ext {
      "c" => Some(Language::C),
      "C" | "cc" | "cpp" | "cxx" | "c++" | "CPP" => Some(Language::Cxx),
      "f" | "F" | "for" | "f77" | "f90" | "F90" | "f95" | "F95" => Some(Language::Fortran),
      "s" | "S" | "asm" => Some(Language::Asm),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Language::C => "C",
      Language::Cxx => "CXX",
      Language::Fortran => "Fortran",
      Language::Asm => "ASM",
    }
  }
}

/// Object extension appended to an object name stem.
///
/// The source extension is kept so `a.c` and `a.cpp` in one directory map to
/// distinct objects: `c` resolves to `.c.o`, `cpp` to `.cpp.o`. A source
/// without an extension gets the bare suffix.
pub fn object_extension(config: &GeneratorConfig, source_ext: &str) -> String {
  let language = Language::from_extension(source_ext);
  let suffix = config.object_suffix_for(language.map(|l| l.as_str()));
  if source_ext.is_empty() {
    suffix.to_string()
  } else {
    format!(".{source_ext}{suffix}")
  }
}
