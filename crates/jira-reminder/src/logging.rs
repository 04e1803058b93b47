//! Tracing setup: stderr plus a log file truncated on every run.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `level`. When `log_file` cannot be created, logging
/// continues on stderr only and the failure is reported once.
pub fn init(level: tracing::Level, log_file: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let (file, file_error) = match log_file.map(File::create) {
        Some(Ok(file)) => (Some(file), None),
        Some(Err(e)) => (None, Some(e)),
        None => (None, None),
    };

    let file_layer = file.map(|f| {
        fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(Mutex::new(f))
    });

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .try_init();

    if result.is_err() {
        return;
    }
    if let Some(e) = file_error {
        tracing::warn!(error = %e, "Cannot open log file, logging to stderr only");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_receives_events() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("jira-reminder.log");
        std::fs::write(&path, "stale line from last run\n").unwrap();

        init(tracing::Level::INFO, Some(&path));
        tracing::info!(project_id = "10231", "Total tickets received");
        tracing::debug!("below the level");

        let contents = std::fs::read_to_string(&path).unwrap();
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(contents.contains("Total tickets received"));
            assert!(contents.contains("project_id=\"10231\""));
            assert!(!contents.contains("below the level"));
        }
        assert!(!contents.contains("stale line"));
        assert!(!contents.contains('\u{1b}'));
    }
}
