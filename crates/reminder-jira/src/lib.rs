//! Reminder Jira - blocking Jira Cloud client.
//!
//! Implements the `Tracker` and `VisibilityLookup` seams from
//! `reminder-core` over the Jira REST API using basic auth with an API token.

pub mod client;
pub mod config;
pub mod wire;

pub use client::JiraClient;
pub use config::JiraConfig;
