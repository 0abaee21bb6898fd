//! External command execution.
//!
//! [`CommandRunner`] is the seam between the recreation logic and the
//! processes it launches. [`SystemCommandRunner`] runs real processes; tests
//! substitute recorders and failing runners.

use std::fmt;
use std::path::PathBuf;
use std::process;

use crate::error::{Error, Result};

/// A command line together with the directory it runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub program: String,
    pub args: Vec<String>,
    pub dir: PathBuf,
}

impl Command {
    pub fn new(program: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            dir: dir.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Trait for running external commands - allows mocking in tests
pub trait CommandRunner {
    /// Run `command` to completion and return its textual output.
    ///
    /// Blocks until the command exits. A command that cannot be started or
    /// exits unsuccessfully is an error.
    fn run(&self, command: &Command) -> Result<String>;
}

/// Runs commands as child processes of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, command: &Command) -> Result<String> {
        let output = process::Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.dir)
            .output()
            .map_err(|e| Error::Command {
                command: command.to_string(),
                message: e.to_string(),
                output: String::new(),
            })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&stderr);
        }

        if !output.status.success() {
            return Err(Error::Command {
                command: command.to_string(),
                message: output.status.to_string(),
                output: text,
            });
        }

        Ok(text)
    }
}
