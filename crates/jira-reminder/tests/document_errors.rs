//! A project document that cannot be parsed is still reported in the log file.
//!
//! Runs in its own test binary: it installs the global subscriber and points
//! the process environment at a scratch state directory.

use clap::Parser;
use jira_reminder::cli::Cli;
use jira_reminder::commands;

#[test]
fn test_unparseable_document_is_logged() {
    let temp_dir = tempfile::tempdir().unwrap();
    let log_dir = temp_dir.path().join("logs");
    std::env::set_var("REMINDER_STATE_DIR", temp_dir.path());
    std::env::set_var("REMINDER_LOG_DIR", &log_dir);

    let document = temp_dir.path().join("projects.xml");
    std::fs::write(&document, "<projects><project><ID>1</Critical></project>").unwrap();

    let cli = Cli::parse_from([
        "jira-reminder",
        "check",
        "-c",
        document.to_str().unwrap(),
    ]);
    let err = commands::execute(&cli).unwrap_err();
    assert!(err.to_string().contains("cannot parse project document"));

    let log = std::fs::read_to_string(log_dir.join("jira-reminder.log")).unwrap();
    if std::env::var_os("RUST_LOG").is_none() {
        assert!(log.contains("Cannot parse project document"));
        assert!(log.contains("projects.xml"));
    }
}
