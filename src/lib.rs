//! cargo-mkmf - Makefiles that build native extensions with Cargo
//!
//! This crate provides the core library functionality for cargo-mkmf:
//! turning a build configuration and the host's baseline Makefile into a
//! Makefile that runs cargo and installs the resulting shared library where
//! the host extension loader expects it.

pub mod core;
pub mod host;
pub mod makefile;
pub mod ops;
pub mod util;

/// Test fixtures shared by unit tests.
///
/// This module is only available when compiling with `--cfg test`.
#[cfg(test)]
pub mod test_support;

pub use core::{BuildConfig, CommandSpec, ConfigError, DylibNaming, Profile, TargetName};
pub use host::HostConfig;
pub use makefile::{GenerateError, MakefileGenerator, TemplateError};
pub use ops::{create_rust_makefile, MakefileOptions};
pub use util::context::GlobalContext;
