//! # Staging
//!
//! Every destructive step of a recreation runs against a staged copy of the
//! input tree. This module provides the copy collaborator, [`TreeCopier`], its
//! filesystem implementation, [`DirCopier`], and the resolution of the staging
//! directory itself.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Prefix of the temporary directory allocated when no output directory is set.
pub const TEMP_DIR_PREFIX: &str = "kpt-recreate-";

/// Trait for copying a directory tree - allows mocking in tests
pub trait TreeCopier {
    /// Copy everything under `src` into `dst`, overwriting existing files.
    fn copy_tree(&self, src: &Path, dst: &Path) -> Result<()>;
}

/// Copies a tree on the host filesystem.
///
/// Files already present in the destination but absent from the source are
/// left in place. A failed copy is not rolled back.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirCopier;

impl TreeCopier for DirCopier {
    fn copy_tree(&self, src: &Path, dst: &Path) -> Result<()> {
        let metadata = fs::metadata(src).map_err(|e| Error::filesystem("read", src, e))?;
        if !metadata.is_dir() {
            return Err(Error::filesystem(
                "copy",
                src,
                io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
            ));
        }
        fs::create_dir_all(dst).map_err(|e| Error::filesystem("create directory", dst, e))?;

        // A destination nested inside the source must not be copied into itself.
        let skip = fs::canonicalize(dst).ok();
        let entries = WalkDir::new(src).follow_links(false).into_iter();
        let entries = entries.filter_entry(|entry| match &skip {
            Some(skip) if entry.depth() > 0 && entry.file_type().is_dir() => {
                fs::canonicalize(entry.path()).map_or(true, |p| &p != skip)
            }
            _ => true,
        });

        for entry in entries {
            let entry = entry.map_err(|source| Error::Walk {
                root: src.to_path_buf(),
                source,
            })?;
            let Ok(relative) = entry.path().strip_prefix(src) else {
                continue;
            };
            if relative.as_os_str().is_empty() {
                continue;
            }
            let target = dst.join(relative);
            let file_type = entry.file_type();

            if file_type.is_dir() {
                fs::create_dir_all(&target)
                    .map_err(|e| Error::filesystem("create directory", &target, e))?;
            } else if file_type.is_symlink() {
                copy_symlink(entry.path(), &target)?;
            } else {
                fs::copy(entry.path(), &target)
                    .map_err(|e| Error::filesystem("copy file to", &target, e))?;
            }
        }

        debug!("copied {} to {}", src.display(), dst.display());
        Ok(())
    }
}

#[cfg(unix)]
fn copy_symlink(link: &Path, target: &Path) -> Result<()> {
    let points_to = fs::read_link(link).map_err(|e| Error::filesystem("read link", link, e))?;
    if fs::symlink_metadata(target).is_ok() {
        remove_path(target)?;
    }
    std::os::unix::fs::symlink(&points_to, target)
        .map_err(|e| Error::filesystem("create symlink", target, e))
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, target: &Path) -> Result<()> {
    if fs::metadata(link).map(|m| m.is_dir()).unwrap_or(false) {
        return DirCopier.copy_tree(link, target);
    }
    fs::copy(link, target)
        .map(|_| ())
        .map_err(|e| Error::filesystem("copy file to", target, e))
}

#[cfg(unix)]
fn remove_path(path: &Path) -> Result<()> {
    let result = if fs::symlink_metadata(path).map(|m| m.is_dir()).unwrap_or(false) {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| Error::filesystem("remove", path, e))
}

/// Resolve the directory a run stages its copy into.
///
/// An explicit `out_dir` is created if missing and returned as an absolute
/// path. Without one, a fresh temporary directory is allocated; it is kept
/// after the run because it holds the recreated tree.
pub fn prepare_staging_dir(out_dir: Option<&Path>) -> Result<PathBuf> {
    match out_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .map_err(|e| Error::filesystem("create output directory", dir, e))?;
            fs::canonicalize(dir).map_err(|e| Error::filesystem("resolve", dir, e))
        }
        None => {
            let temp = tempfile::Builder::new()
                .prefix(TEMP_DIR_PREFIX)
                .tempdir()
                .map_err(|e| Error::filesystem("create temp dir in", std::env::temp_dir(), e))?;
            let path = temp.keep();
            fs::canonicalize(&path).map_err(|e| Error::filesystem("resolve", &path, e))
        }
    }
}
