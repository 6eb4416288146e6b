//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::config::default_settings_path;
use crate::render::DisplayMode;
use crate::run::RunOptions;
use clap::Parser;
use std::path::PathBuf;

/// Largest page size Redmine accepts for `limit`.
const MAX_LIMIT: u32 = 100;

/// redmine-bar - your open Redmine issues in the menu bar
///
/// Polls every Redmine instance listed in the settings file for open issues
/// assigned to you and prints a BitBar/xbar/SwiftBar menu grouped by
/// project, tracker and status.
///
/// Examples:
///   redmine-bar
///   redmine-bar --light --timeout 5
///   redmine-bar --config ~/redmine.json
///   redmine-bar --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the settings file
    ///
    /// Defaults to ~/.config/bitbar/multiple-redmine-show-my-task.json
    #[arg(short, long, value_name = "FILE", env = "REDMINE_BAR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Use colors for a light menu bar (default is dark)
    #[arg(long, env = "REDMINE_BAR_LIGHT")]
    pub light: bool,

    /// Per-instance request timeout in seconds
    #[arg(long, default_value = "10", value_name = "SECS")]
    pub timeout: u64,

    /// Maximum number of issues requested from each instance (1-100)
    #[arg(long, default_value = "100", value_name = "COUNT")]
    pub limit: u32,

    /// Enable verbose logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors on stderr
    #[arg(short, long)]
    pub quiet: bool,

    /// Write an example settings file and exit
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout == 0 {
            return Err("Timeout must be at least 1 second".to_string());
        }

        if !(1..=MAX_LIMIT).contains(&self.limit) {
            return Err(format!("Limit must be between 1 and {}", MAX_LIMIT));
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// Stays at WARN by default: the host shows nothing from stderr, but
    /// running the plugin by hand should not be noisy.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }

    /// Filter directive used when `RUST_LOG` is not set.
    pub fn log_directive(&self) -> String {
        self.log_level().as_str().to_lowercase()
    }

    /// Settings path from `--config`, or the default location.
    pub fn settings_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_settings_path)
    }

    pub fn display_mode(&self) -> DisplayMode {
        if self.light {
            DisplayMode::Light
        } else {
            DisplayMode::Dark
        }
    }

    /// Resolve everything the run needs.
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            settings_path: self.settings_path(),
            display: self.display_mode(),
            timeout_seconds: self.timeout,
            limit: self.limit,
        }
    }
}
