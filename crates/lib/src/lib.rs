//! mkgen-lib: Core types and logic for mkgen
//!
//! This crate turns a read-only project model into an incremental tree of
//! Makefile rule files:
//! - `Project`: targets, their sources and the directories they live in
//! - `GeneratorConfig`: the make dialect the rule files are written for
//! - `generate`: the pass that writes root, target and object rule files,
//!   dependency stamp placeholders and the regeneration descriptor

pub mod consts;
pub mod generate;
pub mod project;
pub mod util;
