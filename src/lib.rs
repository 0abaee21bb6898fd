//! # kpt-recreate
//!
//! Recreates the kpt packages in a directory tree. Every `Kptfile` found in
//! the tree declares where its package came from (`upstream.git.repo`,
//! `upstream.git.directory`, `upstream.git.commit`); recreating deletes the
//! package directory and fetches that exact pinned revision again with
//! `kpt pkg get`, so the result is a faithful refetch rather than a copy that
//! may carry local edits.
//!
//! ## Quick Example
//!
//! ```
//! use kpt_recreate::expression::FetchExpression;
//! use kpt_recreate::manifest::UpstreamReference;
//!
//! let upstream = UpstreamReference::from_yaml_str(
//!     r#"
//! upstream:
//!   type: git
//!   git:
//!     repo: https://example.com/repo
//!     directory: /pkg
//!     commit: v1.2.3
//! "#,
//! )
//! .unwrap();
//!
//! let expression = FetchExpression::new(&upstream);
//! assert_eq!(expression.as_str(), "https://example.com/repo.git/pkg@v1.2.3");
//! ```
//!
//! ## Modules
//!
//! - **`manifest`**: typed parsing of a `Kptfile`'s upstream block.
//! - **`expression`**: canonical `<repo>.git/<dir>@<commit>` fetch arguments.
//! - **`discovery`**: a lazy, deterministic walk yielding every `Kptfile`.
//! - **`plan`**: turns a tree into ordered delete-then-fetch requests.
//! - **`staging`**: the working copy every destructive step runs against.
//! - **`runner`**: the command-execution seam.
//! - **`recreate`**: the [`recreate::Recreator`] that drives a full run.
//!
//! Collaborators are passed in explicitly:
//!
//! ```no_run
//! use kpt_recreate::recreate::{FetchTool, RecreateOptions, Recreator};
//! use kpt_recreate::runner::SystemCommandRunner;
//! use kpt_recreate::staging::DirCopier;
//!
//! let recreator = Recreator::new(
//!     Box::new(DirCopier),
//!     Box::new(SystemCommandRunner),
//!     FetchTool::default(),
//! );
//! let outcome = recreator.run(&RecreateOptions::new("config-root"))?;
//! println!("recreated tree in {}", outcome.staged_root.display());
//! # Ok::<(), kpt_recreate::error::Error>(())
//! ```

pub mod discovery;
pub mod error;
pub mod expression;
pub mod manifest;
pub mod output;
pub mod plan;
pub mod recreate;
pub mod runner;
pub mod staging;

#[cfg(test)]
mod expression_proptest;
