//! Host build configuration.
//!
//! The host extension pipeline (mkmf) knows where things live on this
//! machine: the C compiler and archiver, the shared object extension the
//! extension loader expects, install directories. cargo-mkmf reads those as
//! opaque strings from a TOML file:
//!
//! ```toml
//! fakeroot_install = false
//!
//! [vars]
//! CC = "gcc"
//! AR = "ar"
//! DLEXT = "so"
//! srcdir = "/home/me/my_gem/ext/my_ext"
//! sitearchdir = "$(sitelibdir)/$(sitearch)"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

mod expand;

pub use expand::expand;

/// Values reported by the host build configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Whether the host installs into a staging tree before packaging
    /// (mkmf's `$extout`). When set, `all` depends on `install`.
    pub fakeroot_install: bool,

    /// `MAKEFILE_CONFIG`-style variables (`CC`, `AR`, `DLEXT`, `srcdir`, ...)
    pub vars: BTreeMap<String, String>,
}

impl HostConfig {
    /// Load host configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read host config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse host config: {}", path.display()))
    }

    /// Set a host variable.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Enable fakeroot install semantics.
    pub fn with_fakeroot_install(mut self, fakeroot_install: bool) -> Self {
        self.fakeroot_install = fakeroot_install;
        self
    }

    /// Get a raw host variable.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Expand `$(var)` references against the host variables.
    pub fn expand(&self, value: &str) -> String {
        expand(value, &self.vars)
    }

    /// Extension of loadable host extensions (`so`, `bundle`, ...).
    pub fn dlext(&self) -> Option<&str> {
        self.get("DLEXT")
    }

    /// Extension of ordinary shared objects (`so`, `dylib`, `dll`).
    pub fn soext(&self) -> Option<&str> {
        self.get("SOEXT")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_host_config_default() {
        let host = HostConfig::default();
        assert!(!host.fakeroot_install);
        assert!(host.dlext().is_none());
    }

    #[test]
    fn test_host_config_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("host.toml");

        std::fs::write(
            &path,
            r#"
fakeroot_install = true

[vars]
CC = "clang"
AR = "libtool -static"
DLEXT = "bundle"
SOEXT = "dylib"
"#,
        )
        .unwrap();

        let host = HostConfig::load(&path).unwrap();
        assert!(host.fakeroot_install);
        assert_eq!(host.get("CC"), Some("clang"));
        assert_eq!(host.get("AR"), Some("libtool -static"));
        assert_eq!(host.dlext(), Some("bundle"));
        assert_eq!(host.soext(), Some("dylib"));
    }

    #[test]
    fn test_host_config_load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = HostConfig::load(&tmp.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read host config"));
    }

    #[test]
    fn test_host_expand() {
        let host = HostConfig::default()
            .with_var("srcdir", "/ext")
            .with_var("sitearchdir", "$(prefix)/arch")
            .with_var("prefix", "/usr");

        assert_eq!(host.expand("$(srcdir)/rust"), "/ext/rust");
        assert_eq!(host.expand("${sitearchdir}"), "/usr/arch");
    }
}
