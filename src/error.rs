//! # Error Handling
//!
//! This module defines the centralized error type for `kpt-recreate`. Every
//! failure is fatal to a recreation run, so each variant carries enough
//! context (manifest path, directory, command line) for the caller to act on
//! it without re-running with more logging.
//!
//! The variants fall into four groups:
//!
//! - **Filesystem**: `Io`, `Filesystem` and `Walk` cover reading, copying,
//!   deleting and walking the staged tree.
//! - **Manifest**: `ManifestParse` and `MissingField` cover a `Kptfile` that
//!   is not valid YAML or lacks one of the required upstream fields.
//! - **Planning**: `RootManifest` rejects a `Kptfile` at the tree root, and
//!   `InputInsideOutput` an output directory that holds the input tree.
//! - **Fetching**: `Command` reports a failed external command, and `Fetch`
//!   wraps it with the fetch expression and destination it was serving.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A required field of the `upstream.git` block in a `Kptfile`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamField {
    /// `upstream.git.repo`
    Repo,
    /// `upstream.git.directory`
    Directory,
    /// `upstream.git.commit`
    Commit,
}

impl UpstreamField {
    /// The dotted path of the field inside the manifest.
    pub fn key(self) -> &'static str {
        match self {
            UpstreamField::Repo => "upstream.git.repo",
            UpstreamField::Directory => "upstream.git.directory",
            UpstreamField::Commit => "upstream.git.commit",
        }
    }
}

impl fmt::Display for UpstreamField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Main error type for kpt-recreate operations
#[derive(Error, Debug)]
pub enum Error {
    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A filesystem operation on a known path failed.
    #[error("Failed to {operation} {}", path.display())]
    Filesystem {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The directory walk could not proceed.
    #[error("Failed to walk directory {}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A `Kptfile` is not valid YAML, or one of its fields has the wrong type.
    #[error("Failed to parse manifest {}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A required upstream field is absent or empty.
    ///
    /// `path` is empty when the manifest was parsed from a string.
    #[error("No {field} in manifest {}", path.display())]
    MissingField { path: PathBuf, field: UpstreamField },

    /// A `Kptfile` sits directly at the tree root, which cannot be deleted and
    /// refetched into itself.
    #[error("Refusing to recreate the tree root: {} is not inside a subpackage directory", path.display())]
    RootManifest { path: PathBuf },

    /// The output directory contains the input directory, so the staged walk
    /// would reach the input tree.
    #[error("Output directory {} contains the input directory {}", output.display(), input.display())]
    InputInsideOutput { input: PathBuf, output: PathBuf },

    /// An external command could not be started or exited unsuccessfully.
    #[error("Command `{command}` failed: {message}")]
    Command {
        command: String,
        message: String,
        /// Combined stdout and stderr captured from the command.
        output: String,
    },

    /// The fetch tool failed to refetch a subpackage.
    #[error("Failed to fetch {expression} into {}", destination.display())]
    Fetch {
        expression: String,
        destination: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Build a `Filesystem` error for `operation` on `path`.
    pub fn filesystem(
        operation: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Error::Filesystem {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
