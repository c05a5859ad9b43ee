//! `cargo-mkmf command` command

use anyhow::Result;

use super::{customize, prepare};
use crate::cli::CommandArgs;
use cargo_mkmf::makefile::escape::shell_join;
use cargo_mkmf::ops::cargo_invocation;
use cargo_mkmf::util::shell::Shell;
use cargo_mkmf::util::GlobalContext;

pub fn execute(args: CommandArgs, shell: &Shell) -> Result<()> {
    let mut ctx = GlobalContext::new()?;
    ctx.set_verbose(shell.is_verbose());

    // The baseline is not read when only printing the command.
    let (opts, config) = prepare(&ctx, &args.target, Default::default(), shell)?;
    let target = &args.target;

    let cmd = cargo_invocation(&target.target, &opts, |build| {
        customize(&config, target, build)
    })?;

    if args.json {
        let out = serde_json::json!({
            "program": cmd.program.display().to_string(),
            "args": cmd.args,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let mut words = vec![cmd.program.display().to_string()];
        words.extend(cmd.args.iter().cloned());
        println!("{}", shell_join(&words));
    }

    Ok(())
}
