//! Run command implementation
//!
//! Copies the input tree into the output directory, then deletes and
//! refetches every kpt package in the copy with `kpt pkg get`.

use anyhow::{Context, Result};
use clap::Args;
use kpt_recreate::output::OutputConfig;
use kpt_recreate::recreate::{FetchTool, RecreateOptions, Recreator};
use kpt_recreate::runner::SystemCommandRunner;
use kpt_recreate::staging::DirCopier;
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Directory to recursively look for Kptfiles in
    #[arg(short, long, value_name = "PATH", default_value = ".")]
    pub dir: PathBuf,

    /// Directory the recreated tree is written to (defaults to a new temp directory)
    #[arg(short, long, value_name = "PATH", env = "KPT_RECREATE_OUT_DIR")]
    pub out_dir: Option<PathBuf>,

    /// The kpt binary used to fetch packages
    #[arg(long, value_name = "PATH", env = "KPT_BIN", default_value = "kpt")]
    pub kpt_bin: String,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the run command
pub fn execute(args: RunArgs, output: &OutputConfig) -> Result<()> {
    let start_time = Instant::now();

    let recreator = Recreator::new(
        Box::new(DirCopier),
        Box::new(SystemCommandRunner),
        FetchTool::kpt(args.kpt_bin),
    );
    let mut options = RecreateOptions::new(&args.dir);
    if let Some(out_dir) = args.out_dir {
        options = options.out_dir(out_dir);
    }

    let outcome = match recreator.run(&options) {
        Ok(outcome) => outcome,
        Err(e) => {
            if !args.quiet {
                println!("{} Recreate failed", output.emoji("❌", "[FAIL]"));
            }
            return Err(e).with_context(|| {
                format!(
                    "failed to recreate kpt packages in {}",
                    args.dir.display()
                )
            });
        }
    };

    if !args.quiet {
        println!(
            "{} Recreated {} package(s) in {:.2}s",
            output.emoji("✅", "[OK]"),
            outcome.recreated.len(),
            start_time.elapsed().as_secs_f64()
        );
        println!("   Output written to: {}", outcome.staged_root.display());
    }

    Ok(())
}
