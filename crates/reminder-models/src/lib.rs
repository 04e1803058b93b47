//! Core data models for the Jira reminder tool.
//!
//! This crate provides the plain data types shared by every other crate:
//! validated project settings, the read-only ticket view supplied by the
//! tracker, and the flagged-ticket records that end up in a report.

pub mod flagged;
pub mod priority;
pub mod project;
pub mod ticket;

// Re-export main types
pub use flagged::{FlaggedTicket, NOT_COMMENTED_YET};
pub use priority::PriorityClass;
pub use project::{CommentPolicy, ProjectConfig, Threshold, Thresholds};
pub use ticket::{Comment, Ticket, Visibility, MORE_INFORMATION_STATUS, UNASSIGNED};
