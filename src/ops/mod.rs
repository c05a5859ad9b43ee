//! High-level operations.
//!
//! This module contains the implementation of cargo-mkmf commands.

pub mod create_makefile;

pub use create_makefile::{
    cargo_invocation, create_rust_makefile, render_rust_makefile, MakefileOptions,
    RenderedMakefile,
};
