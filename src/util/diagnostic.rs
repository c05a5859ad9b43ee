//! User-facing error reports.
//!
//! Errors that know how to help the user turn into a [`Diagnostic`]: a
//! message, notes explaining what was expected and suggested fixes, printed
//! in the layout rustc uses.

use std::fmt;
use std::path::PathBuf;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when the baseline Makefile is missing.
    pub const NO_BASELINE: &str =
        "help: Pass the host's dummy Makefile with `cargo-mkmf generate --baseline <file>`";

    /// Suggestion when the host configuration is missing or invalid.
    pub const BAD_HOST_CONFIG: &str =
        "help: Check the file passed with `--host-config` is valid TOML";

    /// Suggestion when generation fails for an unclear reason.
    pub const GENERATE_FAILED: &str = "help: Run `cargo-mkmf --verbose generate` for more details";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn label(self, color: bool) -> &'static str {
        match (self, color) {
            (Severity::Error, false) => "error",
            (Severity::Warning, false) => "warning",
            (Severity::Error, true) => "\x1b[1;31merror\x1b[0m",
            (Severity::Warning, true) => "\x1b[1;33mwarning\x1b[0m",
        }
    }
}

/// A report for the user.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Stable error code, e.g. `cargo_mkmf::template::empty`
    pub code: Option<String>,
    pub message: String,
    /// File the report is about
    pub location: Option<PathBuf>,
    pub notes: Vec<String>,
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            code: None,
            message: message.into(),
            location: None,
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic::new(Severity::Warning, message)
    }

    /// Build an error report from a `miette` diagnostic, keeping its code
    /// and help text.
    pub fn from_miette(err: &dyn miette::Diagnostic) -> Self {
        let mut diag = Diagnostic::error(err.to_string());
        diag.code = err.code().map(|c| c.to_string());
        if let Some(help) = err.help() {
            diag.suggestions.push(help.to_string());
        }
        diag
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Add a note explaining the failure.
    pub fn with_context(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Add a suggested fix.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Render for the terminal.
    ///
    /// ```text
    /// error[code]: message
    ///   --> path
    ///    = note: ...
    ///    = help: ...
    /// ```
    pub fn format(&self, color: bool) -> String {
        let mut out = String::from(self.severity.label(color));
        if let Some(code) = &self.code {
            out.push_str(&format!("[{}]", code));
        }
        out.push_str(&format!(": {}\n", self.message));

        if let Some(path) = &self.location {
            out.push_str(&format!("  --> {}\n", path.display()));
        }
        for note in &self.notes {
            out.push_str(&format!("   = note: {}\n", note));
        }
        for suggestion in &self.suggestions {
            out.push_str(&format!("   = help: {}\n", suggestion));
        }

        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::makefile::TemplateError;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("baseline Makefile template is malformed")
            .with_context("expected `clean-so::` to remove the shared library on clean")
            .with_location("/build/my_ext/dummy.mk")
            .with_suggestion("Regenerate the baseline from the host's dummy Makefile");

        assert_eq!(
            diag.format(false),
            "error: baseline Makefile template is malformed\n\
             \x20 --> /build/my_ext/dummy.mk\n\
             \x20  = note: expected `clean-so::` to remove the shared library on clean\n\
             \x20  = help: Regenerate the baseline from the host's dummy Makefile\n"
        );
    }

    #[test]
    fn test_from_miette_keeps_code_and_help() {
        let output = Diagnostic::from_miette(&TemplateError::Empty).to_string();

        assert!(output.starts_with(
            "error[cargo_mkmf::template::empty]: baseline Makefile template is empty\n"
        ));
        assert!(output.contains("= help: Generate the host's dummy Makefile"));
    }

    #[test]
    fn test_warning_without_notes() {
        let output = Diagnostic::warning("host config has no DLEXT").format(false);
        assert_eq!(output, "warning: host config has no DLEXT\n");
    }

    #[test]
    fn test_color_label() {
        let output = Diagnostic::error("boom").format(true);
        assert!(output.starts_with("\x1b[1;31merror\x1b[0m: boom"));
    }
}
