//! SLA deadline arithmetic.
//!
//! A ticket is due `days` calendar days after its last qualifying activity.
//! Deadlines landing on a weekend move to the following Monday. A ticket is
//! overdue once the current time is strictly past the deadline.

use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use reminder_models::{PriorityClass, ProjectConfig, Threshold, Thresholds, Ticket};
use tracing::warn;

/// Deadline for an activity timestamp and a day count, weekend-adjusted.
pub fn due_date(activity: DateTime<Utc>, days: u8) -> DateTime<Utc> {
    let deadline = activity + Duration::days(i64::from(days));
    match deadline.weekday() {
        Weekday::Sat => deadline + Duration::days(2),
        Weekday::Sun => deadline + Duration::days(1),
        _ => deadline,
    }
}

/// Whether activity at `activity` is overdue for `class` as of `now`.
///
/// Disabled classes are never overdue.
pub fn is_overdue(
    activity: DateTime<Utc>,
    class: PriorityClass,
    config: &ProjectConfig,
    now: DateTime<Utc>,
) -> bool {
    match config.thresholds.get(class) {
        Threshold::Disabled => false,
        Threshold::Days(days) => now > due_date(activity, days),
    }
}

/// Which threshold a ticket is measured against, and how it is labelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub class: PriorityClass,
    /// Verbatim tracker priority, or `More Information`.
    pub label: String,
}

/// Route a ticket to a priority class.
///
/// Tickets in the `More Information` status use that class when it is
/// enabled and are never flagged otherwise. Other tickets use their
/// priority; an unrecognised priority cannot be routed.
pub fn route(ticket: &Ticket, thresholds: &Thresholds) -> Option<Route> {
    if ticket.is_awaiting_information() {
        if thresholds.more_information.is_disabled() {
            return None;
        }
        return Some(Route {
            class: PriorityClass::MoreInformation,
            label: PriorityClass::MoreInformation.label().to_string(),
        });
    }

    let Some(name) = ticket.priority.as_deref() else {
        warn!(key = %ticket.key, "Ticket has no priority, skipping");
        return None;
    };

    match PriorityClass::from_tracker_name(name) {
        Some(class) => Some(Route {
            class,
            label: name.to_string(),
        }),
        None => {
            warn!(key = %ticket.key, priority = %name, "Unknown priority, skipping");
            None
        }
    }
}
