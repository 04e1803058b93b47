//! Jira Reminder binary library.
//!
//! Command-line parsing, logging bootstrap and the command handlers that wire
//! the tracker client and mailer into the reminder core.

pub mod cli;
pub mod commands;
pub mod logging;
