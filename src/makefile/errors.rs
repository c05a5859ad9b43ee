//! Makefile generation errors.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::Diagnostic;

/// The baseline Makefile cannot be transformed.
#[derive(Debug, Error, MietteDiagnostic, PartialEq, Eq)]
pub enum TemplateError {
    #[error("baseline Makefile template is empty")]
    #[diagnostic(
        code(cargo_mkmf::template::empty),
        help("Generate the host's dummy Makefile and pass it with `--baseline`")
    )]
    Empty,

    #[error("baseline Makefile template has no `{anchor}` to {step}")]
    #[diagnostic(
        code(cargo_mkmf::template::missing_anchor),
        help("The baseline must be the host's unmodified dummy Makefile")
    )]
    MissingAnchor {
        anchor: &'static str,
        step: &'static str,
    },
}

/// Error during Makefile generation.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum GenerateError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Template(#[from] TemplateError),

    #[error("build directory must be an absolute path: {}", path.display())]
    #[diagnostic(code(cargo_mkmf::generate::relative_build_dir))]
    RelativeBuildDir { path: PathBuf },
}

impl GenerateError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            GenerateError::Template(err @ TemplateError::Empty) => Diagnostic::from_miette(err),
            GenerateError::Template(err @ TemplateError::MissingAnchor { anchor, .. }) => {
                Diagnostic::from_miette(err).with_context(format!(
                    "baseline Makefile template is malformed: no line matches `{}`",
                    anchor.trim_end()
                ))
            }
            GenerateError::RelativeBuildDir { path } => Diagnostic::from_miette(self)
                .with_location(path)
                .with_context("cargo's target directory is recorded as an absolute path")
                .with_suggestion("Pass an absolute `--build-dir`"),
        }
    }
}
