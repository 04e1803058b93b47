//! Command handlers for CLI subcommands.

use chrono::Utc;
use reminder_core::config;
use reminder_core::{
    load_document, validate_projects, DeliveryError, LogVerbosity, Notifier, RawProjectConfig,
    Report, ReportRenderer, RunSummary, Runner,
};
use reminder_jira::{JiraClient, JiraConfig};
use reminder_mail::{SmtpConfig, SmtpNotifier};
use reminder_models::ProjectConfig;
use tracing::{error, info, warn};

use crate::cli::{Cli, Commands};
use crate::logging;

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Execute the selected command (`run` when none is given).
pub fn execute(cli: &Cli) -> Result<()> {
    config::load_env();

    let path = cli.config_path();
    let raws = match load_document(&path) {
        Ok(raws) => raws,
        Err(e) => {
            // No document means no logger levels; log at the default before bailing.
            init_logging(cli.log_level().unwrap_or(tracing::Level::ERROR));
            error!(path = %path.display(), error = %e, "Cannot parse project document");
            return Err(format!("{}: {}", path.display(), e).into());
        }
    };

    init_logging(
        cli.log_level()
            .unwrap_or_else(|| LogVerbosity::aggregate(&raws).as_level()),
    );
    info!(path = %path.display(), projects = raws.len(), "Loaded project document");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => cmd_run(cli, &raws),
        Commands::Check => cmd_check(&raws),
    }
}

fn init_logging(level: tracing::Level) {
    let log_file = match config::ensure_logs_dir() {
        Ok(()) => Some(config::log_file()),
        Err(e) => {
            eprintln!("Warning: cannot create log directory: {}", e);
            None
        }
    };

    logging::init(level, log_file.as_deref());
}

fn cmd_run(cli: &Cli, raws: &[RawProjectConfig]) -> Result<()> {
    let configs = usable_projects(raws, cli.keep_going)?;
    if configs.is_empty() {
        warn!("No valid projects to check");
        return Ok(());
    }

    let jira = JiraClient::new(JiraConfig::from_env()?);
    let renderer = ReportRenderer::new(jira.config().server_str());
    let now = Utc::now();

    let summary = if cli.dry_run {
        Runner::new(&jira, &StdoutNotifier, &renderer).run(&configs, now)
    } else {
        let notifier = SmtpNotifier::new(SmtpConfig::from_env()?)?;
        Runner::new(&jira, &notifier, &renderer).run(&configs, now)
    };

    print_summary(&summary);

    if !summary.is_success() {
        return Err(format!("{} project(s) could not be checked", summary.failed.len()).into());
    }
    Ok(())
}

fn cmd_check(raws: &[RawProjectConfig]) -> Result<()> {
    let results = validate_projects(raws);
    let mut invalid = 0;

    for result in &results {
        match result {
            Ok(config) => println!(
                "ok    {:<12} {} recipient(s), {:?} comments",
                config.project_id,
                config.recipients.len(),
                config.comment_policy
            ),
            Err(failure) => {
                invalid += 1;
                println!("FAIL  {:<12} {}", failure.project_id, failure.reason);
            }
        }
    }

    if invalid > 0 {
        return Err(format!("{} of {} project(s) invalid", invalid, results.len()).into());
    }
    println!("All {} project(s) valid", results.len());
    Ok(())
}

/// Validate every project up front.
///
/// An invalid project aborts the run unless `keep_going` is set, in which
/// case it is skipped with a warning.
pub fn usable_projects(raws: &[RawProjectConfig], keep_going: bool) -> Result<Vec<ProjectConfig>> {
    let mut configs = Vec::new();
    for result in validate_projects(raws) {
        match result {
            Ok(config) => configs.push(config),
            Err(failure) if keep_going => {
                warn!(project_id = %failure.project_id, reason = %failure.reason, "Skipping invalid project");
            }
            Err(failure) => return Err(failure.into()),
        }
    }
    Ok(configs)
}

fn print_summary(summary: &RunSummary) {
    for outcome in &summary.completed {
        println!(
            "{:<12} scanned {:>4}  flagged {:>4}  {:?}",
            outcome.project_id, outcome.scanned, outcome.flagged, outcome.delivery
        );
    }
    for failure in &summary.failed {
        println!("{:<12} failed: {}", failure.project_id, failure.error);
    }
}

/// Notifier for `--dry-run`: prints what would have been mailed.
pub struct StdoutNotifier;

impl StdoutNotifier {
    /// Text printed for one report.
    pub fn format(project_id: &str, recipients: &[String], report: &Report) -> String {
        format!(
            "== {} -> {} ({} ticket(s)) ==\n{}",
            project_id,
            recipients.join("; "),
            report.len(),
            report.to_text()
        )
    }
}

impl Notifier for StdoutNotifier {
    fn deliver(
        &self,
        project_id: &str,
        recipients: &[String],
        report: &Report,
    ) -> std::result::Result<(), DeliveryError> {
        println!("{}", Self::format(project_id, recipients, report));
        Ok(())
    }
}
