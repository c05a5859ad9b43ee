//! Configuration file support for cargo-mkmf.
//!
//! cargo-mkmf supports two configuration file locations:
//! - Global: `~/.cargo-mkmf/config.toml` - User-wide defaults
//! - Project: `.cargo-mkmf.toml` in the build directory - Project overrides
//!
//! Project config takes precedence over global config, and command line
//! flags take precedence over both.
//!
//! ```toml
//! [build]
//! profile = "release"
//! features = ["jit"]
//! extra_rustflags = ["--cfg=rb_sys_use_stable_api_compiled_fallback"]
//! env_unset = ["RUSTFLAGS"]
//!
//! [env]
//! CARGO_PROFILE_RELEASE_LTO = "true"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::BuildConfig;

/// cargo-mkmf configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build settings
    pub build: BuildSettings,

    /// Environment bindings for the cargo build
    pub env: BTreeMap<String, String>,
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    /// Cargo profile (dev, release, or a custom profile)
    pub profile: Option<String>,

    /// Cargo features to enable
    pub features: Vec<String>,

    /// Extra flags passed to rustc
    pub extra_rustflags: Vec<String>,

    /// Target triple for cross-compilation
    pub target: Option<String>,

    /// Environment variables that must not be exported to the cargo build
    pub env_unset: Vec<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.build.profile.is_some() {
            self.build.profile = other.build.profile;
        }
        if !other.build.features.is_empty() {
            self.build.features = other.build.features;
        }
        if !other.build.extra_rustflags.is_empty() {
            self.build.extra_rustflags = other.build.extra_rustflags;
        }
        if other.build.target.is_some() {
            self.build.target = other.build.target;
        }
        for key in other.build.env_unset {
            self.env.remove(&key);
            if !self.build.env_unset.contains(&key) {
                self.build.env_unset.push(key);
            }
        }
        for (key, value) in other.env {
            self.build.env_unset.retain(|k| k != &key);
            self.env.insert(key, value);
        }
    }

    /// Apply these settings to a build configuration.
    pub fn apply(&self, config: &mut BuildConfig) {
        if let Some(profile) = &self.build.profile {
            config.set_profile(profile.as_str());
        }
        for feature in &self.build.features {
            config.add_feature(feature.as_str());
        }
        for flag in &self.build.extra_rustflags {
            config.add_rustflag(flag.as_str());
        }
        if let Some(target) = &self.build.target {
            config.set_target_triple(target.as_str());
        }
        for (key, value) in &self.env {
            config.set_env(key.as_str(), value.as_str());
        }
        for key in &self.build.env_unset {
            config.unset_env(key.as_str());
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.cargo-mkmf.toml)
/// 2. Global config (~/.cargo-mkmf/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    // Load global config first
    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    // Project config overrides global
    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Profile;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.build.profile.is_none());
        assert!(config.build.features.is_empty());
        assert!(config.env.is_empty());
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[build]
profile = "release"
features = ["a", "b"]
extra_rustflags = ["--cfg=foo"]
env_unset = ["RUSTFLAGS"]

[env]
FOO = "bar"
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.build.profile, Some("release".to_string()));
        assert_eq!(config.build.features, vec!["a", "b"]);
        assert_eq!(config.build.extra_rustflags, vec!["--cfg=foo"]);
        assert_eq!(config.build.env_unset, vec!["RUSTFLAGS"]);
        assert_eq!(config.env.get("FOO"), Some(&"bar".to_string()));
    }

    #[test]
    fn test_config_load_invalid_falls_back() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[build\nprofile = ").unwrap();

        assert!(Config::load(&config_path).is_err());
        assert_eq!(Config::load_or_default(&config_path), Config::default());
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.build.profile = Some("release".to_string());
        base.build.features = vec!["a".to_string()];
        base.env.insert("FOO".to_string(), "1".to_string());
        base.env.insert("KEEP".to_string(), "1".to_string());

        let mut override_cfg = Config::default();
        override_cfg.build.features = vec!["b".to_string()];
        override_cfg.build.env_unset = vec!["FOO".to_string()];

        base.merge(override_cfg);

        assert_eq!(base.build.profile, Some("release".to_string())); // Not overridden
        assert_eq!(base.build.features, vec!["b"]);
        assert!(!base.env.contains_key("FOO"));
        assert_eq!(base.build.env_unset, vec!["FOO"]);
        assert!(base.env.contains_key("KEEP"));
    }

    #[test]
    fn test_config_apply() {
        let mut settings = Config::default();
        settings.build.profile = Some("bench".to_string());
        settings.build.features = vec!["x".to_string(), "x".to_string()];
        settings.build.target = Some("aarch64-apple-darwin".to_string());
        settings.build.env_unset = vec!["CARGO_HOME".to_string()];
        settings.env.insert("FOO".to_string(), "bar".to_string());

        let mut config = BuildConfig::new("my_ext").unwrap();
        settings.apply(&mut config);

        assert_eq!(config.profile(), &Profile::Custom("bench".to_string()));
        assert_eq!(config.features(), &["x".to_string()]);
        assert_eq!(config.target_triple(), Some("aarch64-apple-darwin"));
        assert_eq!(config.env().get("CARGO_HOME"), Some(&None));
        assert_eq!(config.env().get("FOO"), Some(&Some("bar".to_string())));
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join(".cargo-mkmf.toml");

        std::fs::write(
            &global_path,
            r#"
[build]
profile = "release"
features = ["global"]

[env]
FOO = "global"
"#,
        )
        .unwrap();

        std::fs::write(
            &project_path,
            r#"
[build]
features = ["project"]

[env]
FOO = "project"
"#,
        )
        .unwrap();

        let config = load_config(&global_path, &project_path);

        assert_eq!(config.build.profile, Some("release".to_string()));
        assert_eq!(config.build.features, vec!["project"]);
        assert_eq!(config.env.get("FOO"), Some(&"project".to_string()));
    }
}
