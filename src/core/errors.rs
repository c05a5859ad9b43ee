//! Configuration error types and diagnostics.

use thiserror::Error;

use crate::util::diagnostic::Diagnostic;

/// Error raised while constructing a build configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid target name `{name}`: {reason}")]
    InvalidTarget { name: String, reason: &'static str },
}

impl ConfigError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ConfigError::InvalidTarget { name, reason } => {
                let mut diag = Diagnostic::error(format!("invalid target name `{}`", name))
                    .with_context(*reason);

                if name.ends_with('/') {
                    diag = diag.with_suggestion(format!(
                        "Drop the trailing `/`: `{}`",
                        name.trim_end_matches('/')
                    ));
                }

                diag.with_suggestion(
                    "Pass the extension name, optionally nested: `my_ext` or `my_gem/my_ext`",
                )
            }
        }
    }
}
