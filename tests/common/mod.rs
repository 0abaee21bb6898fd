//! Shared test utilities for integration and E2E tests.
//!
//! Add `mod common;` to a test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_package("a", "https://example.com/a", "/a", "v1");
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
#[allow(unused_imports)]
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    pub use super::kptfile;
    pub use super::TestFixture;
}

/// Render a `Kptfile` with the given upstream block.
pub fn kptfile(repo: &str, directory: &str, commit: &str) -> String {
    format!(
        r#"apiVersion: kpt.dev/v1alpha1
kind: Kptfile
metadata:
  name: pkg
upstream:
  type: git
  git:
    repo: {repo}
    directory: {directory}
    commit: {commit}
"#
    )
}

/// A fake `kpt` that records its arguments to `$FAKE_KPT_LOG`, fails when the
/// destination equals `$FAKE_KPT_FAIL_ON`, and otherwise creates the
/// destination with a `FETCHED` file holding the expression.
#[allow(dead_code)]
const FAKE_KPT: &str = r#"#!/bin/sh
printf '%s\n' "$*" >> "$FAKE_KPT_LOG"
if [ -n "$FAKE_KPT_FAIL_ON" ] && [ "$4" = "$FAKE_KPT_FAIL_ON" ]; then
  echo "fake kpt: cannot fetch $3" >&2
  exit 1
fi
mkdir -p "$4"
printf '%s\n' "$3" > "$4/FETCHED"
echo "fetched $3"
"#;

/// A temporary workspace with an `input/` tree, an `out/` target and a fake
/// `kpt` binary next to them.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty input tree.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("input")
            .create_dir_all()
            .expect("Failed to create input directory");
        Self { temp_dir }
    }

    /// Add a package at `dir` (relative to the input tree) with a `Kptfile`.
    pub fn with_package(self, dir: &str, repo: &str, directory: &str, commit: &str) -> Self {
        self.with_file(&format!("{dir}/Kptfile"), &kptfile(repo, directory, commit))
    }

    /// Add a file with the given path (relative to the input tree) and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child("input")
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn input(&self) -> PathBuf {
        self.temp_dir.path().join("input")
    }

    pub fn out(&self) -> PathBuf {
        self.temp_dir.path().join("out")
    }

    /// Where the fake `kpt` records its invocations.
    pub fn kpt_log(&self) -> PathBuf {
        self.temp_dir.path().join("kpt.log")
    }

    /// Invocations recorded by the fake `kpt`, one argument string per line.
    pub fn kpt_calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.kpt_log())
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Install the fake `kpt` script and return its path.
    #[cfg(unix)]
    pub fn fake_kpt(&self) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.temp_dir.path().join("bin/kpt");
        if !path.exists() {
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, FAKE_KPT).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        path
    }

    /// A `run` command against the input tree, writing to `out/` with the fake `kpt`.
    #[cfg(unix)]
    pub fn run_command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("kpt-recreate");
        cmd.current_dir(self.path())
            .env("FAKE_KPT_LOG", self.kpt_log())
            .env_remove("FAKE_KPT_FAIL_ON")
            .env_remove("KPT_RECREATE_OUT_DIR")
            .env("NO_COLOR", "1")
            .arg("run")
            .arg("--dir")
            .arg(self.input())
            .arg("--out-dir")
            .arg(self.out())
            .arg("--kpt-bin")
            .arg(self.fake_kpt());
        cmd
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("kpt-recreate");
        cmd.current_dir(self.path()).env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
