//! Plan command implementation
//!
//! Walks the input tree in place and prints the fetch each package would get,
//! one `destination <- expression` line per package. Nothing is copied,
//! deleted or fetched.

use anyhow::{Context, Result};
use clap::Args;
use kpt_recreate::output::OutputConfig;
use kpt_recreate::plan;
use kpt_recreate::recreate::FetchTool;
use std::path::PathBuf;

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Directory to recursively look for Kptfiles in
    #[arg(short, long, value_name = "PATH", default_value = ".")]
    pub dir: PathBuf,

    /// Print the full fetch command for each package
    #[arg(short, long)]
    pub verbose: bool,
}

/// Execute the plan command
pub fn execute(args: PlanArgs, output: &OutputConfig) -> Result<()> {
    let root = std::fs::canonicalize(&args.dir)
        .with_context(|| format!("failed to resolve {}", args.dir.display()))?;
    let plan = plan::plan(&root)
        .with_context(|| format!("failed to plan kpt packages in {}", root.display()))?;

    if plan.is_empty() {
        println!("No Kptfiles found in {}", root.display());
        return Ok(());
    }

    let fetch_tool = FetchTool::default();
    for request in plan.iter() {
        println!("{}", output.request_line(request));
        if args.verbose {
            println!("    {}", fetch_tool.command(request));
        }
    }
    println!();
    println!(
        "{} {} package(s) would be recreated",
        output.emoji("🔎", "[PLAN]"),
        plan.len()
    );

    Ok(())
}
