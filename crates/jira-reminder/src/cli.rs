//! Command-line interface definition using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Version with git hash and build date, e.g. `0.3.0 (abc1234, 2024-03-08)`.
fn version_string() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const BUILD_DATE: &str = env!("BUILD_DATE");

    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} ({}, {})", VERSION, GIT_HASH, BUILD_DATE))
}

/// Jira Reminder - mails project leads about tickets past their SLA
#[derive(Parser, Debug)]
#[command(name = "jira-reminder")]
#[command(author, version = version_string(), about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv); overrides the document's logger levels
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the project document
    #[arg(short, long, env = "REMINDER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Print reports to stdout instead of mailing them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Skip invalid projects instead of aborting the run
    #[arg(long, global = true)]
    pub keep_going: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Check every project and send reminders (default)
    Run,

    /// Validate the project document without contacting Jira
    Check,
}

impl Cli {
    /// Project document path, with `~` expanded, or the default location.
    pub fn config_path(&self) -> PathBuf {
        match &self.config {
            Some(path) => {
                let raw = path.to_string_lossy();
                PathBuf::from(shellexpand::tilde(&raw).into_owned())
            }
            None => reminder_core::config::projects_file(),
        }
    }

    /// Level forced by `-v`, if any.
    pub fn log_level(&self) -> Option<tracing::Level> {
        match self.verbose {
            0 => None,
            1 => Some(tracing::Level::INFO),
            2 => Some(tracing::Level::DEBUG),
            _ => Some(tracing::Level::TRACE),
        }
    }
}
