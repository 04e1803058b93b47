//! Read-only ticket view supplied by the tracker.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Status of tickets waiting on the reporter.
pub const MORE_INFORMATION_STATUS: &str = "More Information";

/// Assignee shown for tickets nobody owns.
pub const UNASSIGNED: &str = "Unassigned";

/// Who can see a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Visible to the customer.
    Public,
    /// Visible to agents only.
    Internal,
}

impl Visibility {
    /// Maps the tracker's `jsdPublic` flag.
    pub fn from_public_flag(public: bool) -> Self {
        if public {
            Visibility::Public
        } else {
            Visibility::Internal
        }
    }
}

/// A comment on a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Tracker comment id.
    pub id: String,

    /// When the comment was written, in the tracker's offset.
    pub created: DateTime<FixedOffset>,

    /// Visibility, when the tracker sent it along with the comment.
    /// `None` means it has to be looked up separately.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

impl Comment {
    /// Creates a comment whose visibility is not known yet.
    pub fn new(id: impl Into<String>, created: DateTime<FixedOffset>) -> Self {
        Self {
            id: id.into(),
            created,
            visibility: None,
        }
    }

    /// Sets the known visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }
}

/// An open ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Issue key (e.g. `SUP-42`).
    pub key: String,

    /// Priority name as the tracker reports it (e.g. `1 - Critical`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    /// Workflow status name.
    pub status: String,

    /// Display name of the assignee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    /// When the ticket was created.
    pub created: DateTime<FixedOffset>,

    /// Comments, oldest first.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Ticket {
    /// Creates a ticket with no priority, assignee or comments.
    pub fn new(
        key: impl Into<String>,
        status: impl Into<String>,
        created: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            key: key.into(),
            priority: None,
            status: status.into(),
            assignee: None,
            created,
            comments: Vec::new(),
        }
    }

    /// Sets the priority name.
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the assignee display name.
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Appends a comment (comments must be added oldest first).
    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comments.push(comment);
        self
    }

    /// Returns true if the ticket is waiting on the reporter.
    pub fn is_awaiting_information(&self) -> bool {
        self.status == MORE_INFORMATION_STATUS
    }

    /// Assignee display name, or `Unassigned`.
    pub fn assignee_or_unassigned(&self) -> &str {
        self.assignee.as_deref().unwrap_or(UNASSIGNED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn created() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-03-04T09:00:00-08:00").unwrap()
    }

    #[test]
    fn test_ticket_defaults() {
        let ticket = Ticket::new("SUP-1", "Open", created());

        assert_eq!(ticket.key, "SUP-1");
        assert!(ticket.priority.is_none());
        assert!(ticket.comments.is_empty());
        assert_eq!(ticket.assignee_or_unassigned(), "Unassigned");
        assert!(!ticket.is_awaiting_information());
    }

    #[test]
    fn test_ticket_builders() {
        let ticket = Ticket::new("SUP-2", MORE_INFORMATION_STATUS, created())
            .with_priority("2 - Severe")
            .with_assignee("Dana Reyes")
            .with_comment(Comment::new("10001", created()).with_visibility(Visibility::Public));

        assert_eq!(ticket.priority.as_deref(), Some("2 - Severe"));
        assert_eq!(ticket.assignee_or_unassigned(), "Dana Reyes");
        assert!(ticket.is_awaiting_information());
        assert_eq!(ticket.comments[0].visibility, Some(Visibility::Public));
    }

    #[test]
    fn test_visibility_from_public_flag() {
        assert_eq!(Visibility::from_public_flag(true), Visibility::Public);
        assert_eq!(Visibility::from_public_flag(false), Visibility::Internal);
    }

    #[test]
    fn test_ticket_serialization_roundtrip() {
        let ticket = Ticket::new("SUP-3", "In Progress", created())
            .with_priority("3 - Moderate")
            .with_comment(Comment::new("7", created()));

        let json = serde_json::to_string(&ticket).unwrap();
        let deserialized: Ticket = serde_json::from_str(&json).unwrap();

        assert_eq!(ticket, deserialized);
    }
}
