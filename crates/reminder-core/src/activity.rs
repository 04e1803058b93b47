//! Resolution of a ticket's last qualifying activity.

use chrono::{DateTime, FixedOffset, Utc};
use reminder_models::{Comment, CommentPolicy, Ticket, Visibility, NOT_COMMENTED_YET};
use tracing::trace;

use crate::error::TrackerError;
use crate::timestamp::display_date;
use crate::tracker::VisibilityLookup;

/// When the SLA clock was last reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activity {
    /// Timestamp of the qualifying comment, or the ticket's creation.
    pub at: DateTime<FixedOffset>,
    /// False when no comment qualified and `at` is the creation time.
    pub has_comment: bool,
}

impl Activity {
    /// The activity timestamp in UTC.
    pub fn at_utc(&self) -> DateTime<Utc> {
        self.at.with_timezone(&Utc)
    }

    /// Report text: the comment date, or `Not Commented Yet`.
    pub fn display(&self) -> String {
        if self.has_comment {
            display_date(&self.at)
        } else {
            NOT_COMMENTED_YET.to_string()
        }
    }
}

/// Find the newest comment that counts under `policy`.
///
/// Comments are scanned newest first. Visibility already supplied with a
/// comment is used directly; otherwise `lookup` is asked, one call per
/// comment scanned. Falls back to the creation time when nothing qualifies.
///
/// # Errors
/// Propagates the first failed visibility lookup.
pub fn resolve_activity<V: VisibilityLookup + ?Sized>(
    ticket: &Ticket,
    policy: CommentPolicy,
    lookup: &V,
) -> Result<Activity, TrackerError> {
    for comment in ticket.comments.iter().rev() {
        let qualifies = match policy {
            CommentPolicy::Any => true,
            CommentPolicy::Internal => {
                visibility(ticket, comment, lookup)? == Visibility::Internal
            }
            CommentPolicy::External => visibility(ticket, comment, lookup)? == Visibility::Public,
        };

        if qualifies {
            trace!(key = %ticket.key, comment_id = %comment.id, "Qualifying comment found");
            return Ok(Activity {
                at: comment.created,
                has_comment: true,
            });
        }
    }

    Ok(Activity {
        at: ticket.created,
        has_comment: false,
    })
}

fn visibility<V: VisibilityLookup + ?Sized>(
    ticket: &Ticket,
    comment: &Comment,
    lookup: &V,
) -> Result<Visibility, TrackerError> {
    match comment.visibility {
        Some(known) => Ok(known),
        None => lookup.comment_visibility(&ticket.key, &comment.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::fake::FakeTracker;
    use crate::timestamp::parse_tracker_timestamp;

    fn at(value: &str) -> DateTime<FixedOffset> {
        parse_tracker_timestamp(value).unwrap()
    }

    const T0: &str = "2024-03-01T08:00:00.000-0800";
    const T1: &str = "2024-03-02T08:00:00.000-0800";
    const T2: &str = "2024-03-03T08:00:00.000-0800";
    const T3: &str = "2024-03-04T08:00:00.000-0800";

    /// Comments public@T1, internal@T2, public@T3 (oldest first).
    fn mixed_ticket() -> Ticket {
        Ticket::new("SUP-7", "Open", at(T0))
            .with_comment(Comment::new("1", at(T1)).with_visibility(Visibility::Public))
            .with_comment(Comment::new("2", at(T2)).with_visibility(Visibility::Internal))
            .with_comment(Comment::new("3", at(T3)).with_visibility(Visibility::Public))
    }

    #[test]
    fn test_internal_policy_picks_newest_internal() {
        let activity =
            resolve_activity(&mixed_ticket(), CommentPolicy::Internal, &FakeTracker::default())
                .unwrap();
        assert_eq!(activity.at, at(T2));
        assert!(activity.has_comment);
    }

    #[test]
    fn test_external_policy_picks_newest_public() {
        let activity =
            resolve_activity(&mixed_ticket(), CommentPolicy::External, &FakeTracker::default())
                .unwrap();
        assert_eq!(activity.at, at(T3));
    }

    #[test]
    fn test_any_policy_picks_newest() {
        let activity =
            resolve_activity(&mixed_ticket(), CommentPolicy::Any, &FakeTracker::default()).unwrap();
        assert_eq!(activity.at, at(T3));
        assert!(activity.has_comment);
    }

    #[test]
    fn test_no_qualifying_comment_falls_back_to_creation() {
        let ticket = Ticket::new("SUP-8", "Open", at(T0))
            .with_comment(Comment::new("1", at(T1)).with_visibility(Visibility::Internal))
            .with_comment(Comment::new("2", at(T2)).with_visibility(Visibility::Internal));

        let activity =
            resolve_activity(&ticket, CommentPolicy::External, &FakeTracker::default()).unwrap();
        assert_eq!(activity.at, at(T0));
        assert!(!activity.has_comment);
        assert_eq!(activity.display(), "Not Commented Yet");
    }

    #[test]
    fn test_no_comments_uses_creation() {
        let ticket = Ticket::new("SUP-9", "Open", at(T0));
        for policy in [CommentPolicy::Any, CommentPolicy::Internal, CommentPolicy::External] {
            let activity = resolve_activity(&ticket, policy, &FakeTracker::default()).unwrap();
            assert_eq!(activity.at, at(T0));
            assert!(!activity.has_comment);
        }
    }

    #[test]
    fn test_unknown_visibility_is_looked_up_newest_first() {
        let ticket = Ticket::new("SUP-10", "Open", at(T0))
            .with_comment(Comment::new("1", at(T1)))
            .with_comment(Comment::new("2", at(T2)))
            .with_comment(Comment::new("3", at(T3)));

        let mut tracker = FakeTracker::default();
        tracker.visibility.insert("1".to_string(), Visibility::Internal);
        tracker.visibility.insert("2".to_string(), Visibility::Internal);
        tracker.visibility.insert("3".to_string(), Visibility::Public);

        let activity = resolve_activity(&ticket, CommentPolicy::Internal, &tracker).unwrap();
        assert_eq!(activity.at, at(T2));
        // Stops at the first match: comments 3 and 2.
        assert_eq!(tracker.visibility_lookups.get(), 2);
    }

    #[test]
    fn test_any_policy_needs_no_lookup() {
        let ticket = Ticket::new("SUP-11", "Open", at(T0)).with_comment(Comment::new("1", at(T1)));
        let tracker = FakeTracker::default();

        resolve_activity(&ticket, CommentPolicy::Any, &tracker).unwrap();
        assert_eq!(tracker.visibility_lookups.get(), 0);
    }

    #[test]
    fn test_lookup_failure_propagates() {
        let ticket = Ticket::new("SUP-12", "Open", at(T0)).with_comment(Comment::new("404", at(T1)));

        let result = resolve_activity(&ticket, CommentPolicy::External, &FakeTracker::default());
        assert!(matches!(result, Err(TrackerError::Status { status: 404, .. })));
    }

    #[test]
    fn test_display_of_commented_activity() {
        let activity = Activity {
            at: at("2024-03-04T08:00:00.000-0800"),
            has_comment: true,
        };
        assert_eq!(activity.display(), "4-3-2024");
    }
}
