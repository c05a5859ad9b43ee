//! Rewrites of the host's baseline Makefile.
//!
//! Each step takes the template text and returns the rewritten text, so the
//! steps can be tested and composed independently. A step whose anchor is
//! missing fails instead of silently producing a Makefile that misbehaves.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::makefile::errors::TemplateError;

/// Aggregate phony targets in the host's dummy Makefile.
pub const AGGREGATE_TARGETS: &str = "all install static install-so install-rb";

/// Aggregate phony targets without `install`.
pub const AGGREGATE_TARGETS_NO_INSTALL: &str = "all static install-so install-rb";

/// Empty double-colon rule hooked into `clean`.
pub const CLEAN_SO_RULE: &str = "clean-so::";

/// Replacement for [`CLEAN_SO_RULE`] that also removes the extension.
pub const CLEAN_SO_WITH_DLLIB: &str = "clean-so:\n\t-$(Q)$(RM) $(DLLIB)\n";

static CLEAN_SO_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^clean-so::$").expect("valid clean-so regex"));

static SRCDIR_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^srcdir = .*$").expect("valid srcdir regex"));

/// Reject an empty or whitespace-only template.
pub fn ensure_present(template: &str) -> Result<&str, TemplateError> {
    if template.trim().is_empty() {
        return Err(TemplateError::Empty);
    }
    Ok(template)
}

/// Drop `install` from the aggregate targets so `make` alone does not install.
pub fn opt_in_install(template: &str) -> Result<String, TemplateError> {
    if !template.contains(AGGREGATE_TARGETS) {
        return Err(TemplateError::MissingAnchor {
            anchor: AGGREGATE_TARGETS,
            step: "make installation opt-in",
        });
    }
    Ok(template.replace(AGGREGATE_TARGETS, AGGREGATE_TARGETS_NO_INSTALL))
}

/// Make `clean` remove the copied extension library.
///
/// Only the `clean-so::` rule itself is rewritten; `distclean-so::` stays.
pub fn clean_dylib(template: &str) -> Result<String, TemplateError> {
    if !CLEAN_SO_LINE.is_match(template) {
        return Err(TemplateError::MissingAnchor {
            anchor: CLEAN_SO_RULE,
            step: "remove the shared library on clean",
        });
    }
    Ok(CLEAN_SO_LINE
        .replace_all(template, NoExpand(CLEAN_SO_WITH_DLLIB))
        .into_owned())
}

/// Point `srcdir` at the crate instead of the extension sources.
pub fn rewrite_srcdir(template: &str, cargo_dir: &str) -> Result<String, TemplateError> {
    if !SRCDIR_LINE.is_match(template) {
        return Err(TemplateError::MissingAnchor {
            anchor: "srcdir = ",
            step: "point srcdir at the crate",
        });
    }
    let line = format!("srcdir = {}", cargo_dir);
    Ok(SRCDIR_LINE.replace_all(template, NoExpand(&line)).into_owned())
}

/// The value the baseline assigns to `srcdir`, if any.
pub fn baseline_srcdir(template: &str) -> Option<&str> {
    SRCDIR_LINE
        .find(template)
        .and_then(|m| m.as_str().strip_prefix("srcdir = "))
        .map(str::trim_end)
}

/// Apply every baseline rewrite in order.
pub fn transform_baseline(template: &str, cargo_dir: &str) -> Result<String, TemplateError> {
    let template = ensure_present(template)?;
    let template = opt_in_install(template)?;
    let template = clean_dylib(&template)?;
    rewrite_srcdir(&template, cargo_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::DUMMY_MAKEFILE;

    #[test]
    fn test_opt_in_install() {
        let out = opt_in_install("all install static install-so install-rb: Makefile\n").unwrap();
        assert_eq!(out, "all static install-so install-rb: Makefile\n");
    }

    #[test]
    fn test_opt_in_install_missing_anchor() {
        let err = opt_in_install("all: Makefile\n").unwrap_err();
        assert!(matches!(
            err,
            TemplateError::MissingAnchor {
                anchor: AGGREGATE_TARGETS,
                ..
            }
        ));
    }

    #[test]
    fn test_clean_dylib() {
        let out = clean_dylib("clean-static::\nclean-so::\nclean: clean-so\n").unwrap();
        assert_eq!(
            out,
            "clean-static::\nclean-so:\n\t-$(Q)$(RM) $(DLLIB)\n\nclean: clean-so\n"
        );
    }

    #[test]
    fn test_rewrite_srcdir_keeps_dollar_signs() {
        let out = rewrite_srcdir("V = 0\nsrcdir = .\ntopdir = /x\n", "$(srcdir)/../crate").unwrap();
        assert_eq!(out, "V = 0\nsrcdir = $(srcdir)/../crate\ntopdir = /x\n");
    }

    #[test]
    fn test_rewrite_srcdir_only_whole_lines() {
        let err = rewrite_srcdir("VPATH = $(srcdir)\n", "/crate").unwrap_err();
        assert!(matches!(err, TemplateError::MissingAnchor { .. }));
    }

    #[test]
    fn test_empty_template() {
        assert_eq!(
            transform_baseline("  \n", "/crate").unwrap_err(),
            TemplateError::Empty
        );
    }

    #[test]
    fn test_transform_dummy_makefile() {
        let out = transform_baseline(DUMMY_MAKEFILE, "/home/me/ext").unwrap();

        assert!(out.contains("srcdir = /home/me/ext\n"));
        assert!(!out.contains(AGGREGATE_TARGETS));
        assert!(out.contains("all static install-so install-rb: Makefile"));
        assert!(out.contains("clean-so:\n\t-$(Q)$(RM) $(DLLIB)\n"));
        assert!(!out.contains("\nclean-so::"));
        assert!(out.contains("distclean-so::\n"));
    }

    #[test]
    fn test_baseline_srcdir() {
        assert_eq!(baseline_srcdir(DUMMY_MAKEFILE), Some("."));
        assert_eq!(baseline_srcdir("VPATH = $(srcdir)\n"), None);
    }
}
