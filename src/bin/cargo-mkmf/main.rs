//! cargo-mkmf CLI - Makefiles that build native extensions with Cargo

use std::ffi::OsString;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cargo_mkmf::util::diagnostic::{self, suggestions};
use cargo_mkmf::util::shell::Shell;
use cargo_mkmf::{ConfigError, GenerateError};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    // Parse CLI
    let cli = Cli::parse_from(args());

    let shell = Shell::from_flags(cli.quiet, cli.verbose, cli.color);

    // Set up logging
    let filter = if shell.is_verbose() {
        EnvFilter::new("cargo_mkmf=debug")
    } else if shell.is_quiet() {
        EnvFilter::new("cargo_mkmf=error")
    } else {
        EnvFilter::new("cargo_mkmf=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = run(cli, &shell) {
        report(&e, &shell);
        std::process::exit(1);
    }
}

/// Command line arguments, minus the subcommand name cargo inserts when run
/// as `cargo mkmf`.
fn args() -> Vec<OsString> {
    let mut args: Vec<OsString> = std::env::args_os().collect();
    if args.get(1).is_some_and(|a| a == "mkmf") {
        args.remove(1);
    }
    args
}

fn run(cli: Cli, shell: &Shell) -> Result<()> {
    // Execute command
    match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, shell),
        Commands::Command(args) => commands::command::execute(args, shell),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

fn report(e: &anyhow::Error, shell: &Shell) {
    if let Some(err) = e.downcast_ref::<GenerateError>() {
        diagnostic::emit(&err.to_diagnostic(), shell.use_color());
    } else if let Some(err) = e.downcast_ref::<ConfigError>() {
        diagnostic::emit(&err.to_diagnostic(), shell.use_color());
    } else {
        eprintln!("error: {:#}", e);
        if !shell.is_verbose() {
            eprintln!("{}", suggestions::GENERATE_FAILED);
        }
    }
}
