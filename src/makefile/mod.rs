//! Makefile generation.
//!
//! This module turns a [`BuildConfig`](crate::core::BuildConfig) and the
//! host's baseline ("dummy") Makefile into the Makefile that builds the
//! extension with cargo:
//! - `escape`: shell escaping of the cargo invocation
//! - `transform`: pure rewrites of the baseline template
//! - `generator`: assembly of the final text

pub mod errors;
pub mod escape;
pub mod generator;
pub mod transform;

pub use errors::{GenerateError, TemplateError};
pub use generator::{MakefileGenerator, DEFAULT_ARCHIVER_SENTINEL, MAKEFILE_NAME};
