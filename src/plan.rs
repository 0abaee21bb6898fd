//! # Recreate Planning
//!
//! Turns a package tree into the ordered delete-then-fetch requests a
//! recreation executes. [`discover`] walks the tree once with
//! [`discovery::walk`](crate::discovery::walk) and keeps every location in
//! walk order. [`RecreateRequest::read`] parses one location's `Kptfile` into
//! a request; the executor calls it at each package's turn, so a subpackage
//! sees whatever its parent's refetch wrote.
//!
//! [`plan`] does both steps up front for a read-only preview of a tree.

use std::path::{Path, PathBuf};

use crate::discovery::{self, ManifestLocation};
use crate::error::{Error, Result};
use crate::expression::FetchExpression;
use crate::manifest::{self, UpstreamReference};

/// One package to delete and refetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecreateRequest {
    /// The `Kptfile` the request was built from.
    pub manifest: PathBuf,
    /// Directory deleted before fetching.
    pub package_dir: PathBuf,
    /// Argument naming what to fetch.
    pub expression: FetchExpression,
    /// Where the fetch tool writes the package, relative to `working_root`.
    pub destination: PathBuf,
    /// Working directory of the fetch tool.
    pub working_root: PathBuf,
}

impl RecreateRequest {
    /// Build the request for one discovered manifest.
    pub fn new(root: &Path, location: &ManifestLocation, upstream: &UpstreamReference) -> Self {
        Self {
            manifest: location.file_path.clone(),
            package_dir: location.containing_dir.clone(),
            expression: FetchExpression::new(upstream),
            destination: location.relative_dir.clone(),
            working_root: root.to_path_buf(),
        }
    }

    /// Read the `Kptfile` at `location` as it is on disk now.
    pub fn read(root: &Path, location: &ManifestLocation) -> Result<Self> {
        let upstream = manifest::read_upstream(&location.file_path)?;
        Ok(Self::new(root, location, &upstream))
    }
}

/// The requests for one tree, in walk order.
#[derive(Debug, Clone, Default)]
pub struct RecreatePlan {
    pub root: PathBuf,
    pub requests: Vec<RecreateRequest>,
}

impl RecreatePlan {
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecreateRequest> {
        self.requests.iter()
    }
}

/// Every package location under `root`, in walk order.
///
/// The first walk error aborts, as does a `Kptfile` at `root` itself.
pub fn discover(root: &Path) -> Result<Vec<ManifestLocation>> {
    let mut locations = Vec::new();
    for location in discovery::walk(root) {
        let location = location?;
        if location.is_root() {
            return Err(Error::RootManifest {
                path: location.file_path,
            });
        }
        locations.push(location);
    }
    Ok(locations)
}

/// Plan the recreation of every package under `root` without touching it.
pub fn plan(root: &Path) -> Result<RecreatePlan> {
    let requests = discover(root)?
        .iter()
        .map(|location| RecreateRequest::read(root, location))
        .collect::<Result<Vec<_>>>()?;

    Ok(RecreatePlan {
        root: root.to_path_buf(),
        requests,
    })
}
