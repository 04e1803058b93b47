//! Jira Reminder entry point.

use clap::Parser;

use jira_reminder::cli::Cli;
use jira_reminder::commands;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::execute(&cli) {
        tracing::error!(error = %e, "Run failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
