//! # Completions Command Implementation
//!
//! Generates shell completion scripts for `kpt-recreate` with `clap_complete`.
//!
//! ```bash
//! kpt-recreate completions bash > ~/.local/share/bash-completion/completions/kpt-recreate
//! kpt-recreate completions zsh > ~/.zfunc/_kpt-recreate
//! ```

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the `completions` command, writing the script to stdout.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(args.shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
