//! Implementation of `cargo-mkmf generate`.
//!
//! Ties the pieces together: build the [`BuildConfig`], hand it to the
//! caller's customization callback exactly once, read the host's baseline
//! Makefile, generate, and write `Makefile` into the build directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::{BuildConfig, CommandSpec};
use crate::host::HostConfig;
use crate::makefile::{MakefileGenerator, MAKEFILE_NAME};
use crate::util::diagnostic::suggestions;
use crate::util::env::{EnvSource, ProcessEnv};
use crate::util::fs::{read_to_string, write_string};

/// Options for Makefile generation.
#[derive(Debug, Clone, Default)]
pub struct MakefileOptions {
    /// Directory the Makefile is written to; cargo builds into `target/` below it
    pub build_dir: PathBuf,

    /// Crate location relative to the host's `$(srcdir)`
    pub srcprefix: Option<String>,

    /// The host's baseline (dummy) Makefile
    pub baseline: PathBuf,

    /// Values reported by the host build configuration
    pub host: HostConfig,

    /// Extra arguments appended to the cargo invocation
    pub extra_args: Vec<String>,
}

impl MakefileOptions {
    /// Options for building in `build_dir` from the baseline at `baseline`.
    pub fn new(build_dir: impl Into<PathBuf>, baseline: impl Into<PathBuf>) -> Self {
        MakefileOptions {
            build_dir: build_dir.into(),
            baseline: baseline.into(),
            ..Default::default()
        }
    }

    fn generator<'a>(&'a self, env: &'a dyn EnvSource) -> MakefileGenerator<'a> {
        let mut generator = MakefileGenerator::new(&self.host, env, &self.build_dir)
            .with_extra_args(self.extra_args.iter().cloned());
        if let Some(srcprefix) = &self.srcprefix {
            generator = generator.with_srcprefix(srcprefix.as_str());
        }
        generator
    }
}

/// A generated Makefile and the configuration it was generated from.
#[derive(Debug, Clone)]
pub struct RenderedMakefile {
    pub config: BuildConfig,
    pub contents: String,
}

/// Build and customize the configuration for `target`.
fn configure<F>(target: &str, customize: F) -> Result<BuildConfig>
where
    F: FnOnce(&mut BuildConfig),
{
    let mut config = BuildConfig::new(target)?;
    customize(&mut config);
    tracing::debug!(
        "configured `{}`: profile {}, features [{}]",
        config.target(),
        config.profile(),
        config.features().join(", ")
    );
    Ok(config)
}

/// Generate the Makefile text for `target` without writing it.
pub fn render_rust_makefile<F>(
    target: &str,
    opts: &MakefileOptions,
    env: &dyn EnvSource,
    customize: F,
) -> Result<RenderedMakefile>
where
    F: FnOnce(&mut BuildConfig),
{
    let config = configure(target, customize)?;

    let baseline = read_to_string(&opts.baseline).with_context(|| {
        format!(
            "failed to load the baseline Makefile\n{}",
            suggestions::NO_BASELINE
        )
    })?;

    let contents = opts.generator(env).generate(&config, &baseline)?;

    Ok(RenderedMakefile { config, contents })
}

/// Generate `Makefile` for `target` in the build directory.
///
/// Any existing Makefile is overwritten. Returns the path written.
///
/// # Example
/// ```ignore
/// let opts = MakefileOptions::new(std::env::current_dir()?, "dummy.mk");
/// create_rust_makefile("my_gem/my_ext", &opts, |config| {
///     config.set_profile("release");
///     config.add_feature("jit");
///     config.set_env("FOO", "bar");
/// })?;
/// ```
pub fn create_rust_makefile<F>(target: &str, opts: &MakefileOptions, customize: F) -> Result<PathBuf>
where
    F: FnOnce(&mut BuildConfig),
{
    let rendered = render_rust_makefile(target, opts, &ProcessEnv, customize)?;
    let path = makefile_path(&opts.build_dir);

    write_string(&path, &rendered.contents)?;
    tracing::info!("wrote {}", path.display());

    Ok(path)
}

/// The cargo invocation `target` would be built with, before deferral.
pub fn cargo_invocation<F>(target: &str, opts: &MakefileOptions, customize: F) -> Result<CommandSpec>
where
    F: FnOnce(&mut BuildConfig),
{
    let config = configure(target, customize)?;
    Ok(opts.generator(&ProcessEnv).cargo_command(&config))
}

/// Path of the generated Makefile in `build_dir`.
pub fn makefile_path(build_dir: &Path) -> PathBuf {
    build_dir.join(MAKEFILE_NAME)
}
