//! Shared utilities

pub mod config;
pub mod context;
pub mod diagnostic;
pub mod env;
pub mod fs;
pub mod shell;

pub use config::Config;
pub use context::GlobalContext;
pub use diagnostic::Diagnostic;
pub use env::{EnvSource, MapEnv, ProcessEnv};
