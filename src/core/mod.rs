//! Core data structures for cargo-mkmf.
//!
//! This module contains the build intent that drives Makefile generation:
//! - Target names and install prefixes
//! - Cargo build profiles
//! - The per-invocation build configuration
//! - Shared library naming conventions
//! - Toolchain command specs

pub mod build_config;
pub mod command;
pub mod errors;
pub mod naming;
pub mod profile;
pub mod target;

pub use build_config::BuildConfig;
pub use command::CommandSpec;
pub use errors::ConfigError;
pub use naming::{DylibNaming, TargetOs};
pub use profile::Profile;
pub use target::TargetName;
