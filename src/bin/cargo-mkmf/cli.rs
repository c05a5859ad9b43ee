//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use cargo_mkmf::util::shell::ColorChoice;

/// cargo-mkmf - Makefiles that build native extensions with Cargo
#[derive(Parser)]
#[command(name = "cargo-mkmf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a Makefile that builds the extension with cargo
    Generate(GenerateArgs),

    /// Print the cargo invocation the Makefile would run
    Command(CommandArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Build settings shared by `generate` and `command`.
#[derive(Args)]
pub struct TargetArgs {
    /// Extension name, optionally nested (`my_gem/my_ext`)
    pub target: String,

    /// Crate directory relative to the host's $(srcdir)
    #[arg(long)]
    pub srcprefix: Option<String>,

    /// Cargo profile (dev, release, or a custom profile)
    #[arg(long, env = "CARGO_MKMF_PROFILE")]
    pub profile: Option<String>,

    /// Cargo features to enable (comma separated or repeated)
    #[arg(short = 'F', long, env = "CARGO_MKMF_FEATURES", value_delimiter = ',')]
    pub features: Vec<String>,

    /// Export an environment variable to the cargo build
    #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub env: Vec<(String, String)>,

    /// Never export this environment variable, even if configured
    #[arg(long = "unset-env", value_name = "KEY")]
    pub unset_env: Vec<String>,

    /// Extra flag passed to rustc
    #[arg(long = "rustflag", value_name = "FLAG", allow_hyphen_values = true)]
    pub rustflags: Vec<String>,

    /// Target triple for cross-compilation
    #[arg(long)]
    pub target_triple: Option<String>,

    /// Host configuration (TOML with CC, AR, DLEXT, srcdir, ...)
    #[arg(long, env = "CARGO_MKMF_HOST_CONFIG")]
    pub host_config: Option<PathBuf>,

    /// Directory to write the Makefile to (defaults to current directory)
    #[arg(long)]
    pub build_dir: Option<PathBuf>,

    /// Extra arguments for `cargo rustc`
    #[arg(last = true)]
    pub cargo_args: Vec<String>,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// The host's baseline (dummy) Makefile
    #[arg(long, env = "CARGO_MKMF_BASELINE")]
    pub baseline: PathBuf,

    /// Print the Makefile instead of writing it
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Args)]
pub struct CommandArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Print as a JSON object instead of a shell command line
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

/// Parse a `KEY=VALUE` pair.
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, _)) if key.is_empty() => Err(format!("empty variable name in `{}`", s)),
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("expected KEY=VALUE, got `{}`", s)),
    }
}
