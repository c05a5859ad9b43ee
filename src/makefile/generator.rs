//! Makefile assembly.
//!
//! The generated Makefile is the host's dummy Makefile (see
//! [`transform`](crate::makefile::transform)) wrapped with:
//! - make-time overridable profile and feature variables
//! - the variables the host's install and clean rules expect
//! - per-target environment bindings for the cargo build
//! - the rule that runs cargo and copies the library into place
//! - `install` and `all` rules

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::{BuildConfig, CommandSpec, DylibNaming};
use crate::host::HostConfig;
use crate::makefile::errors::GenerateError;
use crate::makefile::escape::escape_words;
use crate::makefile::transform::{baseline_srcdir, transform_baseline};
use crate::util::env::EnvSource;

/// File name of the generated Makefile.
pub const MAKEFILE_NAME: &str = "Makefile";

/// Archiver value meaning "let the linker archive"; no `AR` is exported for it.
pub const DEFAULT_ARCHIVER_SENTINEL: &str = "libtool -static";

/// Make variable naming the cargo executable.
pub const CARGO_VAR: &str = "CARGO";

/// Make variable selecting the cargo profile.
pub const PROFILE_VAR: &str = "CARGO_MKMF_PROFILE";

/// Make variable selecting the comma separated cargo features.
pub const FEATURES_VAR: &str = "CARGO_MKMF_FEATURES";

/// Make variable naming the profile's output directory below the target dir.
pub const TARGET_DIR_VAR: &str = "CARGO_MKMF_TARGET_DIR";

/// Generates the Makefile for one extension.
pub struct MakefileGenerator<'a> {
    host: &'a HostConfig,
    env: &'a dyn EnvSource,
    build_dir: PathBuf,
    srcprefix: Option<String>,
    extra_args: Vec<String>,
}

impl<'a> MakefileGenerator<'a> {
    /// Create a generator writing cargo output below `build_dir/target`.
    pub fn new(host: &'a HostConfig, env: &'a dyn EnvSource, build_dir: impl Into<PathBuf>) -> Self {
        MakefileGenerator {
            host,
            env,
            build_dir: build_dir.into(),
            srcprefix: None,
            extra_args: Vec::new(),
        }
    }

    /// Locate the crate at `$(srcdir)/<srcprefix>` instead of `$(srcdir)`.
    pub fn with_srcprefix(mut self, srcprefix: impl Into<String>) -> Self {
        self.srcprefix = Some(srcprefix.into());
        self
    }

    /// Append arguments to the cargo invocation.
    pub fn with_extra_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extra_args.extend(args.into_iter().map(|a| a.into()));
        self
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Cargo's `--target-dir`.
    pub fn cargo_target_dir(&self) -> PathBuf {
        self.build_dir.join("target")
    }

    /// Directory containing the crate's `Cargo.toml`, expanded against the
    /// host variables.
    pub fn cargo_dir(&self) -> String {
        let raw = format!("$(srcdir)/{}", self.srcprefix.as_deref().unwrap_or(""));
        let raw = raw.strip_suffix('/').unwrap_or(&raw);
        self.host.expand(raw)
    }

    /// Naming of the library cargo produces, honoring the host's `SOEXT`.
    pub fn dylib_naming(&self, config: &BuildConfig) -> DylibNaming {
        let naming = config.dylib_naming();
        match self.host.soext() {
            Some(soext) if config.target_triple().is_none() => naming.with_extension(soext),
            _ => naming,
        }
    }

    /// The cargo invocation with literal profile and features.
    pub fn cargo_command(&self, config: &BuildConfig) -> CommandSpec {
        config.cargo_command(self.cargo_dir(), self.cargo_target_dir(), &self.extra_args)
    }

    /// The recipe line running cargo, with profile and features deferred to
    /// make time.
    pub fn invocation(&self, config: &BuildConfig) -> String {
        let cmd = self.cargo_command(config);
        debug!("cargo command: {}", cmd.display_command());
        render_invocation(&cmd, config)
    }

    /// Generate the Makefile text from the host's baseline Makefile.
    pub fn generate(&self, config: &BuildConfig, baseline: &str) -> Result<String, GenerateError> {
        if !self.build_dir.is_absolute() {
            return Err(GenerateError::RelativeBuildDir {
                path: self.build_dir.clone(),
            });
        }

        // srcdir must resolve at generation time or the rewritten
        // `srcdir = $(srcdir)/...` line would refer to itself.
        if self.host.get("srcdir").is_none() {
            if let Some(srcdir) = baseline_srcdir(baseline) {
                let host = self.host.clone().with_var("srcdir", srcdir);
                let generator = MakefileGenerator {
                    host: &host,
                    env: self.env,
                    build_dir: self.build_dir.clone(),
                    srcprefix: self.srcprefix.clone(),
                    extra_args: self.extra_args.clone(),
                };
                return generator.generate(config, baseline);
            }
        }

        let cargo_dir = self.cargo_dir();
        let baseline = transform_baseline(baseline, &cargo_dir)?;

        let target = config.target();
        let naming = self.dylib_naming(config);
        let rustlib = config.dylib_path_in(
            self.cargo_target_dir(),
            &format!("$({})", TARGET_DIR_VAR),
            &naming,
        );
        debug!("cargo output: {}", rustlib.display());

        let dlext = match self.host.dlext() {
            Some(dlext) => dlext.to_string(),
            None => {
                let fallback = DylibNaming::host().extension;
                warn!("host config has no DLEXT, using `{}`", fallback);
                fallback
            }
        };

        let mut out = String::new();

        out.push_str(&format!("{} ?= cargo\n", CARGO_VAR));
        out.push_str(&format!("{} ?= {}\n", PROFILE_VAR, config.profile()));
        out.push_str(&format!("{} ?= {}\n", FEATURES_VAR, config.features().join(",")));
        out.push('\n');

        out.push_str(&format!("ifeq ($({}),dev)\n", PROFILE_VAR));
        out.push_str(&format!("  {} ?= debug\n", TARGET_DIR_VAR));
        out.push_str("else\n");
        out.push_str(&format!("  {} ?= $({})\n", TARGET_DIR_VAR, PROFILE_VAR));
        out.push_str("endif\n");
        out.push('\n');

        out.push_str(&format!("target_prefix = {}\n", target.prefix()));
        out.push_str("CLEANLIBS = $(RUSTLIB) $(DLLIB)\n");
        out.push_str("DISTCLEANDIRS = target/\n");
        out.push_str("RUBYARCHDIR   = $(sitearchdir)$(target_prefix)\n");
        out.push_str(&format!("RUSTLIB = {}\n", rustlib.display()));
        out.push_str(&format!("TARGET = {}\n", target.leaf()));
        out.push_str(&format!("DLLIB = $(TARGET).{}\n", dlext));
        out.push('\n');

        out.push_str(&baseline);
        if !baseline.ends_with('\n') {
            out.push('\n');
        }
        out.push('\n');

        for line in self.env_lines(config) {
            out.push_str(&line);
            out.push('\n');
        }
        out.push('\n');

        out.push_str("FORCE: ;\n");
        out.push('\n');

        out.push_str("$(DLLIB): FORCE\n");
        out.push_str(&format!("\t{}\n", self.invocation(config)));
        out.push_str("\t$(COPY) \"$(RUSTLIB)\" $@\n");
        out.push('\n');

        out.push_str("install: $(DLLIB) Makefile\n");
        out.push_str("\t$(INSTALL_PROG) $(DLLIB) $(RUBYARCHDIR)\n");
        out.push('\n');

        let all = if self.host.fakeroot_install {
            "install"
        } else {
            "$(DLLIB)"
        };
        out.push_str(&format!("all: {}\n", all));

        Ok(out)
    }

    /// Environment bindings scoped to the extension target.
    fn env_lines(&self, config: &BuildConfig) -> Vec<String> {
        let mut lines: Vec<String> = config
            .build_env()
            .map(|(key, value)| env_line(key, value))
            .collect();

        for (key, value) in config.env() {
            if value.is_none() {
                debug!("skipping unset environment override `{}`", key);
            }
        }

        match self.host_tool("CC") {
            Some(cc) => lines.push(env_line("CC", &cc)),
            None => debug!("no CC in environment or host config"),
        }

        match self.host_tool("AR") {
            Some(ar) if ar == DEFAULT_ARCHIVER_SENTINEL => {
                debug!("archiver is `{}`, not exporting AR", ar)
            }
            Some(ar) => lines.push(env_line("AR", &ar)),
            None => debug!("no AR in environment or host config"),
        }

        lines
    }

    /// A host tool from the environment, falling back to the host config.
    fn host_tool(&self, key: &str) -> Option<String> {
        self.env
            .var(key)
            .filter(|v| !v.is_empty())
            .or_else(|| self.host.get(key).map(str::to_string))
            .filter(|v| !v.is_empty())
    }
}

/// A target-specific `export` binding for the extension library.
pub fn env_line(key: &str, value: &str) -> String {
    format!("$(DLLIB): export {} = {}", key, value.replace('\n', "\\n"))
}

/// Escape `cmd` for a recipe and defer profile and features to make time.
fn render_invocation(cmd: &CommandSpec, config: &BuildConfig) -> String {
    let mut words = escape_words(&cmd.args);

    // Only cargo's own flags are rewritten, not rustc flags after `--`.
    let cargo_args = match cmd.args.iter().position(|a| a == "--") {
        Some(separator) => &cmd.args[..separator],
        None => &cmd.args[..],
    };

    defer_flag_value(
        cargo_args,
        &mut words,
        "--profile",
        config.profile().as_str(),
        PROFILE_VAR,
    );

    if !config.features().is_empty() {
        defer_flag_value(
            cargo_args,
            &mut words,
            "--features",
            &config.features().join(","),
            FEATURES_VAR,
        );
    }

    format!("$({}) {}", CARGO_VAR, words.join(" "))
}

/// Replace the word after `flag` with a reference to `var` when it holds `literal`.
fn defer_flag_value(args: &[String], words: &mut [String], flag: &str, literal: &str, var: &str) {
    if let Some(i) = args.windows(2).position(|w| w[0] == flag && w[1] == literal) {
        words[i + 1] = format!("$({})", var);
    }
}
