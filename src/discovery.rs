//! # Kptfile Discovery
//!
//! Walks a package tree and yields the location of every `Kptfile` in it.
//!
//! [`walk`] returns a [`ManifestWalker`], a lazy iterator over
//! [`ManifestLocation`]s. The order is deterministic: inside each directory,
//! files are visited before subdirectories and each group is sorted by name,
//! so a package's own `Kptfile` always comes before the `Kptfile`s of the
//! subpackages nested under it.
//!
//! Any walk error is yielded as an item and should end the consumer's loop;
//! skipping an unreadable directory could silently leave packages out.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};

/// File name that marks a kpt package directory.
pub const MANIFEST_FILE_NAME: &str = "Kptfile";

/// Where a discovered `Kptfile` lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestLocation {
    /// Path of the `Kptfile` itself.
    pub file_path: PathBuf,
    /// Directory containing the `Kptfile`: the package directory.
    pub containing_dir: PathBuf,
    /// `containing_dir` relative to the walk root. Empty for the root itself.
    pub relative_dir: PathBuf,
    /// Directory one level above `containing_dir`.
    pub parent_dir: PathBuf,
}

impl ManifestLocation {
    fn from_entry(root: &Path, entry: &DirEntry) -> Self {
        let file_path = entry.path().to_path_buf();
        let containing_dir = file_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.to_path_buf());
        // walkdir joins every entry onto the root, so the prefix always matches.
        let relative_dir = containing_dir
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let parent_dir = containing_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Self {
            file_path,
            containing_dir,
            relative_dir,
            parent_dir,
        }
    }

    /// Whether this `Kptfile` sits directly in the walk root.
    pub fn is_root(&self) -> bool {
        self.relative_dir.as_os_str().is_empty()
    }
}

/// Lazy iterator over the `Kptfile`s below a root directory.
pub struct ManifestWalker {
    root: PathBuf,
    entries: walkdir::IntoIter,
    failed: bool,
}

impl Iterator for ManifestWalker {
    type Item = Result<ManifestLocation>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        for entry in self.entries.by_ref() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    self.failed = true;
                    return Some(Err(Error::Walk {
                        root: self.root.clone(),
                        source,
                    }));
                }
            };
            if is_manifest(&entry) {
                debug!("found {}", entry.path().display());
                return Some(Ok(ManifestLocation::from_entry(&self.root, &entry)));
            }
        }
        None
    }
}

fn is_manifest(entry: &DirEntry) -> bool {
    entry.file_type().is_file() && entry.file_name() == MANIFEST_FILE_NAME
}

/// Files first, then directories, each sorted by name.
fn files_then_dirs(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// Start walking `root` for `Kptfile`s.
pub fn walk(root: &Path) -> ManifestWalker {
    ManifestWalker {
        root: root.to_path_buf(),
        entries: WalkDir::new(root)
            .follow_links(false)
            .sort_by(files_then_dirs)
            .into_iter(),
        failed: false,
    }
}
