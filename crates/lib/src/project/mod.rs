//! Project model consumed by the generator.
//!
//! A [`Project`] is a read-only snapshot: a set of uniquely named [`Target`]s,
//! each owning an ordered list of [`SourceFile`]s, plus the directories and
//! configuration inputs the generator needs. Nothing in the generator mutates it.
//!
//! # Submodules
//!
//! - [`load`] - JSON snapshot loading

pub mod load;
mod types;

pub use load::{LoadedProject, load_project};
pub use types::*;
