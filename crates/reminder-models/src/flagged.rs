//! Flagged-ticket records produced by triage.

use serde::{Deserialize, Serialize};

/// Last-activity text for tickets without a qualifying comment.
pub const NOT_COMMENTED_YET: &str = "Not Commented Yet";

/// An overdue ticket, normalized for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlaggedTicket {
    /// Issue key.
    pub key: String,

    /// Tracker priority name, or `More Information` for tickets routed by status.
    pub priority: String,

    /// Assignee display name, or `Unassigned`.
    pub assignee: String,

    /// Workflow status name.
    pub status: String,

    /// Date of the last qualifying comment (`D-M-YYYY`), or `Not Commented Yet`.
    pub last_activity: String,
}
