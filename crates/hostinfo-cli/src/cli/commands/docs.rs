//! `hostinfo completions <shell>` and `hostinfo manpage`.

use anyhow::Result;
use clap_complete::Shell;
use std::io;

pub fn run_completions(shell: Shell, mut cmd: clap::Command) -> Result<()> {
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

pub fn run_manpage(cmd: clap::Command) -> Result<()> {
    clap_mangen::Man::new(cmd).render(&mut io::stdout())?;
    Ok(())
}
