//! # Kptfile Upstream Parsing
//!
//! Reads the `upstream.git` block of a `Kptfile` into an [`UpstreamReference`].
//! The manifest is deserialized into typed structs so a missing field is a
//! structural condition rather than an ad hoc nested lookup. Every field other
//! than `repo`, `directory` and `commit` is ignored.
//!
//! ```yaml
//! apiVersion: kpt.dev/v1alpha1
//! kind: Kptfile
//! metadata:
//!   name: cert-manager
//! upstream:
//!   type: git
//!   git:
//!     repo: https://github.com/jenkins-x/jxr-versions
//!     directory: /charts/jetstack/cert-manager
//!     commit: 9a5e1d4d6704c1b57c6d0a3f9ab3a1f0f5b70e8c
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result, UpstreamField};

#[derive(Debug, Default, Deserialize)]
struct Kptfile {
    #[serde(default)]
    upstream: Option<Upstream>,
}

#[derive(Debug, Default, Deserialize)]
struct Upstream {
    #[serde(default)]
    git: Option<GitUpstream>,
}

#[derive(Debug, Default, Deserialize)]
struct GitUpstream {
    #[serde(default)]
    repo: Option<String>,
    #[serde(default)]
    directory: Option<String>,
    #[serde(default)]
    commit: Option<String>,
}

/// The upstream source a subpackage was fetched from.
///
/// All three fields are guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReference {
    /// Git remote URL.
    pub repo: String,
    /// Path of the package inside the repository.
    pub directory: String,
    /// Pinned commit or tag.
    pub commit: String,
}

impl UpstreamReference {
    /// Parse the upstream reference out of `Kptfile` content.
    ///
    /// The failure carries no path; [`read_upstream`] attaches one.
    pub fn from_yaml_str(content: &str) -> std::result::Result<Self, ParseFailure> {
        let kptfile = if content.trim().is_empty() {
            Kptfile::default()
        } else {
            serde_yaml::from_str::<Option<Kptfile>>(content)
                .map_err(ParseFailure::Yaml)?
                .unwrap_or_default()
        };
        let git = kptfile
            .upstream
            .and_then(|upstream| upstream.git)
            .unwrap_or_default();

        Ok(Self {
            repo: require(git.repo, UpstreamField::Repo)?,
            directory: require(git.directory, UpstreamField::Directory)?,
            commit: require(git.commit, UpstreamField::Commit)?,
        })
    }
}

/// Why [`UpstreamReference::from_yaml_str`] rejected a manifest.
#[derive(thiserror::Error, Debug)]
pub enum ParseFailure {
    /// The content is not valid YAML for a `Kptfile`.
    #[error("Invalid Kptfile YAML: {0}")]
    Yaml(#[source] serde_yaml::Error),
    /// A required field is absent or empty.
    #[error("No {0} in manifest")]
    Missing(UpstreamField),
}

impl ParseFailure {
    fn at(self, path: &Path) -> Error {
        match self {
            ParseFailure::Yaml(source) => Error::ManifestParse {
                path: path.to_path_buf(),
                source,
            },
            ParseFailure::Missing(field) => Error::MissingField {
                path: path.to_path_buf(),
                field,
            },
        }
    }
}

fn require(
    value: Option<String>,
    field: UpstreamField,
) -> std::result::Result<String, ParseFailure> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ParseFailure::Missing(field)),
    }
}

/// Read the `Kptfile` at `path` and extract its upstream reference.
pub fn read_upstream(path: &Path) -> Result<UpstreamReference> {
    let content =
        fs::read_to_string(path).map_err(|e| Error::filesystem("read manifest", path, e))?;
    UpstreamReference::from_yaml_str(&content).map_err(|failure| failure.at(path))
}
