//! Command implementations

pub mod command;
pub mod completions;
pub mod generate;

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::TargetArgs;
use cargo_mkmf::core::BuildConfig;
use cargo_mkmf::host::HostConfig;
use cargo_mkmf::ops::MakefileOptions;
use cargo_mkmf::util::config::{load_config, Config};
use cargo_mkmf::util::diagnostic::suggestions;
use cargo_mkmf::util::shell::Shell;
use cargo_mkmf::util::GlobalContext;

/// Resolve the build directory, host config and file configuration.
pub(crate) fn prepare(
    ctx: &GlobalContext,
    args: &TargetArgs,
    baseline: PathBuf,
    shell: &Shell,
) -> Result<(MakefileOptions, Config)> {
    let build_dir = match &args.build_dir {
        Some(dir) => ctx.resolve(dir),
        None => ctx.cwd().to_path_buf(),
    };

    let host = match &args.host_config {
        Some(path) => {
            let path = ctx.resolve(path);
            if ctx.is_verbose() {
                shell.note(format!("host config {}", path.display()));
            }
            HostConfig::load(&path).with_context(|| {
                format!("unusable host config\n{}", suggestions::BAD_HOST_CONFIG)
            })?
        }
        None => {
            shell.warn("no --host-config given; CC, AR and DLEXT come from the environment only");
            HostConfig::default()
        }
    };

    // Load configuration (global + project)
    let config = load_config(&ctx.config_path(), &ctx.project_config_path(&build_dir));

    let mut opts = MakefileOptions::new(build_dir, ctx.resolve(&baseline));
    opts.srcprefix = args.srcprefix.clone();
    opts.host = host;
    opts.extra_args = args.cargo_args.clone();

    Ok((opts, config))
}

/// Apply file configuration, then command line flags (CLI overrides config).
pub(crate) fn customize(config: &Config, args: &TargetArgs, build: &mut BuildConfig) {
    config.apply(build);

    if let Some(profile) = &args.profile {
        build.set_profile(profile.as_str());
    }
    if !args.features.is_empty() {
        build.set_features(args.features.iter().filter(|f| !f.is_empty()));
    }
    for flag in &args.rustflags {
        build.add_rustflag(flag.as_str());
    }
    if let Some(triple) = &args.target_triple {
        build.set_target_triple(triple.as_str());
    }
    for (key, value) in &args.env {
        build.set_env(key.as_str(), value.as_str());
    }
    for key in &args.unset_env {
        build.unset_env(key.as_str());
    }
}
