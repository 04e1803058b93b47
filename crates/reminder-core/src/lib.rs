//! Reminder Core - SLA evaluation for the Jira reminder tool.
//!
//! This crate decides which open tickets have gone too long without a
//! qualifying update and turns them into a report:
//!
//! - **document**: Load the XML project document into raw settings
//! - **validator**: Turn raw settings into a `ProjectConfig` or a rejection
//! - **activity**: Find the last comment that resets the SLA clock
//! - **deadline**: Weekend-aware deadline arithmetic and priority routing
//! - **triage**: Evaluate a project's ticket stream
//! - **report**: Render flagged tickets as table rows
//! - **tracker** / **notify**: Seams for the tracker and mail collaborators
//! - **run**: The per-run loop tying everything together

pub mod activity;
pub mod config;
pub mod deadline;
pub mod document;
pub mod error;
pub mod notify;
pub mod report;
pub mod run;
pub mod timestamp;
pub mod tracker;
pub mod triage;
pub mod validator;

// Re-export commonly used items for convenience
pub use activity::{resolve_activity, Activity};
pub use deadline::{due_date, is_overdue, route, Route};
pub use document::{load_document, parse_document, LogVerbosity, RawProjectConfig};
pub use error::{
    ConfigError, DeliveryError, RejectionReason, TimestampError, TrackerError, TriageError,
    ValidationFailure,
};
pub use notify::{deliver_report, Delivery, Notifier, SUBJECT};
pub use report::{Report, ReportRenderer, ReportRow};
pub use run::{ProjectFailure, ProjectOutcome, RunSummary, Runner};
pub use timestamp::{display_date, parse_tracker_timestamp};
pub use tracker::{open_tickets_jql, OpenTickets, TicketPage, Tracker, VisibilityLookup};
pub use triage::{TicketTriager, Triage, TriageOutcome};
pub use validator::{validate, validate_projects};
