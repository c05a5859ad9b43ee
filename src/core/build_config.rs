//! Per-invocation build configuration.
//!
//! A [`BuildConfig`] is created for every `extconf` run, customized once, and
//! then consumed by the Makefile generator. It knows how to spell the cargo
//! invocation and where cargo will leave the shared library.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::command::CommandSpec;
use crate::core::errors::ConfigError;
use crate::core::naming::DylibNaming;
use crate::core::profile::Profile;
use crate::core::target::TargetName;

/// Program name of the external toolchain.
pub const CARGO: &str = "cargo";

/// Build intent for one extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    target: TargetName,
    profile: Profile,
    features: Vec<String>,
    env: BTreeMap<String, Option<String>>,
    extra_rustflags: Vec<String>,
    extra_cargo_args: Vec<String>,
    target_triple: Option<String>,
}

impl BuildConfig {
    /// Create a configuration with defaults for `target`.
    pub fn new(target: &str) -> Result<Self, ConfigError> {
        Ok(BuildConfig {
            target: TargetName::parse(target)?,
            profile: Profile::default(),
            features: Vec::new(),
            env: BTreeMap::new(),
            extra_rustflags: Vec::new(),
            extra_cargo_args: Vec::new(),
            target_triple: None,
        })
    }

    pub fn target(&self) -> &TargetName {
        &self.target
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn set_profile(&mut self, profile: impl Into<Profile>) {
        self.profile = profile.into();
    }

    /// Enabled cargo features, in the order they were added.
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Enable a cargo feature. Enabling a feature twice is a no-op.
    pub fn add_feature(&mut self, feature: impl Into<String>) {
        let feature = feature.into();
        if !self.features.contains(&feature) {
            self.features.push(feature);
        }
    }

    /// Replace the feature list.
    pub fn set_features(&mut self, features: impl IntoIterator<Item = impl Into<String>>) {
        self.features.clear();
        for feature in features {
            self.add_feature(feature);
        }
    }

    /// Environment overrides; `None` values are skipped when generating.
    pub fn env(&self) -> &BTreeMap<String, Option<String>> {
        &self.env
    }

    /// Bind `key` for the cargo build.
    pub fn set_env(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.env.insert(key.into(), Some(value.into()));
    }

    /// Mark `key` as skipped, dropping any earlier binding.
    pub fn unset_env(&mut self, key: impl Into<String>) {
        self.env.insert(key.into(), None);
    }

    /// Environment bindings that will actually be emitted.
    pub fn build_env(&self) -> impl Iterator<Item = (&str, &str)> {
        self.env
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (k.as_str(), v)))
    }

    pub fn extra_rustflags(&self) -> &[String] {
        &self.extra_rustflags
    }

    /// Pass an extra flag to rustc after `--`.
    pub fn add_rustflag(&mut self, flag: impl Into<String>) {
        self.extra_rustflags.push(flag.into());
    }

    pub fn extra_cargo_args(&self) -> &[String] {
        &self.extra_cargo_args
    }

    /// Pass an extra argument to `cargo rustc`.
    pub fn add_cargo_arg(&mut self, arg: impl Into<String>) {
        self.extra_cargo_args.push(arg.into());
    }

    pub fn target_triple(&self) -> Option<&str> {
        self.target_triple.as_deref()
    }

    /// Cross-compile for `triple`.
    pub fn set_target_triple(&mut self, triple: impl Into<String>) {
        self.target_triple = Some(triple.into());
    }

    /// Build the cargo invocation.
    ///
    /// # Arguments
    /// * `source_dir` - Directory holding the crate's `Cargo.toml`
    /// * `dest_dir` - Cargo target directory
    /// * `extra_args` - Caller supplied arguments, appended after configured ones
    pub fn cargo_command(
        &self,
        source_dir: impl AsRef<Path>,
        dest_dir: impl AsRef<Path>,
        extra_args: &[String],
    ) -> CommandSpec {
        let manifest = source_dir.as_ref().join("Cargo.toml");

        let mut cmd = CommandSpec::new(CARGO)
            .arg("rustc")
            .arg("--manifest-path")
            .arg(manifest.to_string_lossy())
            .arg("--target-dir")
            .arg(dest_dir.as_ref().to_string_lossy());

        if let Some(triple) = &self.target_triple {
            cmd = cmd.arg("--target").arg(triple.as_str());
        }

        cmd = cmd.arg("--lib").arg("--profile").arg(self.profile.as_str());

        if !self.features.is_empty() {
            cmd = cmd.arg("--features").arg(self.features.join(","));
        }

        cmd = cmd
            .args(self.extra_cargo_args.iter().cloned())
            .args(extra_args.iter().cloned());

        if !self.extra_rustflags.is_empty() {
            cmd = cmd.arg("--").args(self.extra_rustflags.iter().cloned());
        }

        cmd
    }

    /// Naming convention of the library cargo will produce.
    pub fn dylib_naming(&self) -> DylibNaming {
        match &self.target_triple {
            Some(triple) => DylibNaming::for_triple(triple),
            None => DylibNaming::host(),
        }
    }

    /// Path of the shared library cargo writes below `dest_dir`.
    pub fn dylib_path(&self, dest_dir: impl AsRef<Path>, naming: &DylibNaming) -> PathBuf {
        self.dylib_path_in(dest_dir, self.profile.target_dir_name(), naming)
    }

    /// Like [`BuildConfig::dylib_path`], with an explicit profile directory.
    pub fn dylib_path_in(
        &self,
        dest_dir: impl AsRef<Path>,
        profile_dir: &str,
        naming: &DylibNaming,
    ) -> PathBuf {
        let mut path = dest_dir.as_ref().to_path_buf();
        if let Some(triple) = &self.target_triple {
            path.push(triple);
        }
        path.push(profile_dir);
        path.push(naming.file_name(self.target.leaf()));
        path
    }
}
