//! `cargo-mkmf generate` command

use anyhow::Result;

use super::{customize, prepare};
use crate::cli::GenerateArgs;
use cargo_mkmf::ops::{create_rust_makefile, render_rust_makefile};
use cargo_mkmf::util::env::ProcessEnv;
use cargo_mkmf::util::shell::{Shell, Status};
use cargo_mkmf::util::GlobalContext;

pub fn execute(args: GenerateArgs, shell: &Shell) -> Result<()> {
    let mut ctx = GlobalContext::new()?;
    ctx.set_verbose(shell.is_verbose());

    let (opts, config) = prepare(&ctx, &args.target, args.baseline.clone(), shell)?;
    let target = &args.target;

    if args.stdout {
        let rendered = render_rust_makefile(&target.target, &opts, &ProcessEnv, |build| {
            customize(&config, target, build)
        })?;
        print!("{}", rendered.contents);
        return Ok(());
    }

    let path = create_rust_makefile(&target.target, &opts, |build| {
        customize(&config, target, build)
    })?;

    shell.status(
        Status::Created,
        format!("Makefile for `{}` at {}", target.target, path.display()),
    );

    Ok(())
}
