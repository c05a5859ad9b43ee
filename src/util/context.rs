//! Global context for cargo-mkmf operations.
//!
//! Provides centralized access to the working directory and the locations of
//! the global and project configuration files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;

/// Name of the project configuration file, looked up in the build directory.
pub const PROJECT_CONFIG_NAME: &str = ".cargo-mkmf.toml";

/// Global context containing configuration paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global cargo-mkmf data (~/.cargo-mkmf/)
    home: PathBuf,

    /// Whether to use verbose output
    verbose: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        let home = BaseDirs::new()
            .map(|b| b.home_dir().join(".cargo-mkmf"))
            .unwrap_or_else(|| PathBuf::from(".cargo-mkmf"));

        Ok(GlobalContext {
            cwd,
            home,
            verbose: false,
        })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Use a different home directory.
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = home;
        self
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the cargo-mkmf home directory (~/.cargo-mkmf/).
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Get the project configuration file path for `build_dir`.
    pub fn project_config_path(&self, build_dir: &Path) -> PathBuf {
        build_dir.join(PROJECT_CONFIG_NAME)
    }

    /// Resolve `path` against the working directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_paths() {
        let ctx = GlobalContext::with_cwd(PathBuf::from("/work/ext"))
            .unwrap()
            .with_home(PathBuf::from("/home/me/.cargo-mkmf"));

        assert_eq!(ctx.cwd(), Path::new("/work/ext"));
        assert_eq!(
            ctx.config_path(),
            PathBuf::from("/home/me/.cargo-mkmf/config.toml")
        );
        assert_eq!(
            ctx.project_config_path(ctx.cwd()),
            PathBuf::from("/work/ext/.cargo-mkmf.toml")
        );
    }

    #[test]
    fn test_resolve() {
        let ctx = GlobalContext::with_cwd(PathBuf::from("/work")).unwrap();
        assert_eq!(ctx.resolve(Path::new("ext")), PathBuf::from("/work/ext"));
        assert_eq!(ctx.resolve(Path::new("/abs")), PathBuf::from("/abs"));
    }
}
