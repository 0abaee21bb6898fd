//! # Output Configuration
//!
//! Controls how the CLI renders its summaries: whether colors and emoji are
//! used, and how plan entries are formatted.
//!
//! In `auto` mode, colors are disabled when:
//! - `NO_COLOR` is set (any value, including empty)
//! - `CLICOLOR=0` is set
//! - `TERM=dumb` is set
//! - stdout is not a TTY, unless `CLICOLOR_FORCE` is set to a non-zero value

use std::env;

use clap::ValueEnum;
use console::style;

use crate::plan::RecreateRequest;

/// Value of the `--color` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
    /// Detect from the environment and terminal
    #[default]
    Auto,
    /// Always colorize
    Always,
    /// Never colorize
    Never,
}

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    pub fn from_env_and_flag(mode: ColorMode) -> Self {
        let use_color = match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => detect_color_support(),
        };
        Self { use_color }
    }

    /// Make `console` styling follow this configuration.
    pub fn apply(&self) {
        console::set_colors_enabled(self.use_color);
        console::set_colors_enabled_stderr(self.use_color);
    }

    /// `emoji` when colors are enabled, otherwise `plain`.
    pub fn emoji<'a>(&self, emoji: &'a str, plain: &'a str) -> &'a str {
        if self.use_color {
            emoji
        } else {
            plain
        }
    }

    /// One plan line: `destination <- expression`.
    pub fn request_line(&self, request: &RecreateRequest) -> String {
        let destination = request.destination.display().to_string();
        if self.use_color {
            format!(
                "{} <- {}",
                style(destination).bold(),
                style(request.expression.as_str()).cyan()
            )
        } else {
            format!("{} <- {}", destination, request.expression)
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag(ColorMode::Auto)
    }
}

fn detect_color_support() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
        return false;
    }
    if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
        return true;
    }
    if env::var("TERM").is_ok_and(|v| v == "dumb") {
        return false;
    }
    console::Term::stdout().features().colors_supported()
}
