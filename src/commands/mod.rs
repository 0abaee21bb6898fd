//! # CLI Command Implementations
//!
//! Each subcommand of `kpt-recreate` lives in its own module with:
//! - an `Args` struct deriving `clap::Args`,
//! - an `execute` function that calls into the `kpt_recreate` library.

pub mod completions;
pub mod plan;
pub mod run;
