//! # kpt-recreate CLI
//!
//! Binary entry point for the `kpt-recreate` command-line tool. It parses the
//! arguments with `clap`, installs the logger and dispatches to the selected
//! subcommand. The recreation logic itself lives in the library crate.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
