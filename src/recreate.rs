//! # Recreating Packages
//!
//! [`Recreator`] drives a full run:
//!
//! 1.  **Staging**: the input directory is copied into the output directory
//!     (a fresh temporary directory by default). When both are the same
//!     directory the copy is skipped and the tree is recreated in place. An
//!     output directory that contains the input directory is rejected, since
//!     the staged walk would reach the input tree itself.
//! 2.  **Discovery**: the staged tree is walked once and every `Kptfile`
//!     location is kept in walk order.
//! 3.  **Execution**: for each location, the `Kptfile` is read as it is at
//!     that moment, the package directory is deleted and the fetch tool is
//!     run to fetch it again.
//!
//! Reading happens at each package's turn, so a subpackage nested inside a
//! package that was just refetched is recreated from the reference its
//! parent's fetch wrote. When that fetch did not bring the subpackage back,
//! its location is skipped.
//!
//! Deletion happens right before each fetch. When a read or fetch fails the
//! run stops: earlier packages have been recreated, a failing fetch leaves
//! its package's directory gone, and later packages are untouched.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::discovery::ManifestLocation;
use crate::error::{Error, Result};
use crate::plan::{self, RecreateRequest};
use crate::runner::{Command, CommandRunner};
use crate::staging::{self, TreeCopier};

/// The external tool that fetches a package, e.g. `kpt pkg get`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTool {
    /// Binary to run.
    pub program: String,
    /// Arguments placed before the expression and destination.
    pub subcommand: Vec<String>,
}

impl FetchTool {
    /// `kpt pkg get` using the given `kpt` binary.
    pub fn kpt(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            subcommand: vec!["pkg".to_string(), "get".to_string()],
        }
    }

    /// The command that fetches `request`.
    pub fn command(&self, request: &RecreateRequest) -> Command {
        Command::new(&self.program, &request.working_root)
            .args(self.subcommand.iter().cloned())
            .arg(request.expression.as_str())
            .arg(request.destination.to_string_lossy())
    }
}

impl Default for FetchTool {
    fn default() -> Self {
        Self::kpt("kpt")
    }
}

/// What to recreate and where.
#[derive(Debug, Clone)]
pub struct RecreateOptions {
    /// Input tree.
    pub dir: PathBuf,
    /// Where the recreated tree is written. `None` allocates a temp directory.
    pub out_dir: Option<PathBuf>,
}

impl RecreateOptions {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            out_dir: None,
        }
    }

    pub fn out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(out_dir.into());
        self
    }
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct RecreateOutcome {
    /// Directory holding the recreated tree.
    pub staged_root: PathBuf,
    /// Requests executed, in order.
    pub recreated: Vec<RecreateRequest>,
}

/// Recreates every package in a tree through the supplied collaborators.
pub struct Recreator {
    copier: Box<dyn TreeCopier>,
    runner: Box<dyn CommandRunner>,
    fetch_tool: FetchTool,
}

impl Recreator {
    pub fn new(
        copier: Box<dyn TreeCopier>,
        runner: Box<dyn CommandRunner>,
        fetch_tool: FetchTool,
    ) -> Self {
        Self {
            copier,
            runner,
            fetch_tool,
        }
    }

    /// Stage, plan and recreate the tree described by `options`.
    pub fn run(&self, options: &RecreateOptions) -> Result<RecreateOutcome> {
        let dir = fs::canonicalize(&options.dir)
            .map_err(|e| Error::filesystem("resolve input directory", &options.dir, e))?;
        let staged_root = staging::prepare_staging_dir(options.out_dir.as_deref())?;

        if staged_root != dir && dir.starts_with(&staged_root) {
            return Err(Error::InputInsideOutput {
                input: dir,
                output: staged_root,
            });
        }
        if staged_root == dir {
            debug!("recreating {} in place", dir.display());
        } else {
            debug!("staging {} into {}", dir.display(), staged_root.display());
            self.copier.copy_tree(&dir, &staged_root)?;
        }

        let locations = plan::discover(&staged_root)?;
        debug!(
            "found {} package(s) to recreate in {}",
            locations.len(),
            staged_root.display()
        );
        let recreated = self.execute(&staged_root, &locations)?;

        Ok(RecreateOutcome {
            staged_root,
            recreated,
        })
    }

    /// Read, delete and refetch the package at each of `locations` under
    /// `root`, stopping at the first failure.
    ///
    /// A location whose `Kptfile` no longer exists is skipped.
    pub fn execute(
        &self,
        root: &Path,
        locations: &[ManifestLocation],
    ) -> Result<Vec<RecreateRequest>> {
        let mut recreated = Vec::with_capacity(locations.len());
        for location in locations {
            if !location.file_path.exists() {
                info!(
                    "skipping {}: removed by an earlier fetch",
                    location.file_path.display()
                );
                continue;
            }
            let request = RecreateRequest::read(root, location)?;
            self.recreate(&request)?;
            recreated.push(request);
        }
        Ok(recreated)
    }

    fn recreate(&self, request: &RecreateRequest) -> Result<()> {
        remove_package_dir(&request.package_dir)?;

        let command = self.fetch_tool.command(request);
        info!("about to run {} in dir {}", command, command.dir.display());

        match self.runner.run(&command) {
            Ok(output) => {
                log_output(&output, false);
                Ok(())
            }
            Err(source) => {
                if let Error::Command { output, .. } = &source {
                    log_output(output, true);
                }
                Err(Error::Fetch {
                    expression: request.expression.to_string(),
                    destination: request.destination.clone(),
                    source: Box::new(source),
                })
            }
        }
    }
}

fn log_output(output: &str, failed: bool) {
    let output = output.trim_end();
    if output.is_empty() {
        return;
    }
    if failed {
        warn!("{}", output);
    } else {
        info!("{}", output);
    }
}

/// Remove a package directory; one that is already gone counts as removed.
fn remove_package_dir(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::filesystem("remove package directory", dir, e)),
    }
}
