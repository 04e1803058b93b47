//! Per-project ticket triage.

use chrono::{DateTime, Utc};
use reminder_models::{FlaggedTicket, ProjectConfig, Ticket};
use tracing::debug;

use crate::activity::resolve_activity;
use crate::deadline::{is_overdue, route};
use crate::error::{Result, TrackerError, TriageError};
use crate::tracker::VisibilityLookup;

/// Decides which of a project's tickets are overdue.
pub struct TicketTriager<'a, V: VisibilityLookup + ?Sized> {
    config: &'a ProjectConfig,
    lookup: &'a V,
    now: DateTime<Utc>,
}

impl<'a, V: VisibilityLookup + ?Sized> TicketTriager<'a, V> {
    /// Creates a triager evaluating against `now`.
    pub fn new(config: &'a ProjectConfig, lookup: &'a V, now: DateTime<Utc>) -> Self {
        Self {
            config,
            lookup,
            now,
        }
    }

    /// Evaluate one ticket, returning a record when it is overdue.
    ///
    /// Tickets that cannot be routed, or whose class is disabled, are
    /// skipped before any comment visibility is looked up.
    pub fn evaluate(&self, ticket: &Ticket) -> Result<Option<FlaggedTicket>> {
        let Some(route) = route(ticket, &self.config.thresholds) else {
            return Ok(None);
        };
        if self.config.thresholds.get(route.class).is_disabled() {
            return Ok(None);
        }

        let activity = resolve_activity(ticket, self.config.comment_policy, self.lookup)?;
        if !is_overdue(activity.at_utc(), route.class, self.config, self.now) {
            return Ok(None);
        }

        debug!(key = %ticket.key, class = %route.class, "Ticket is overdue");
        Ok(Some(FlaggedTicket {
            key: ticket.key.clone(),
            priority: route.label,
            assignee: ticket.assignee_or_unassigned().to_string(),
            status: ticket.status.clone(),
            last_activity: activity.display(),
        }))
    }

    /// Lazily triage a ticket stream.
    pub fn triage<I>(&self, tickets: I) -> Triage<'_, 'a, V, I::IntoIter>
    where
        I: IntoIterator<Item = std::result::Result<Ticket, TrackerError>>,
    {
        Triage {
            triager: self,
            tickets: tickets.into_iter(),
            scanned: 0,
            failed: false,
        }
    }
}

/// Tickets gathered for one project.
#[derive(Debug, Clone, Default)]
pub struct TriageOutcome {
    /// Overdue tickets, in stream order.
    pub flagged: Vec<FlaggedTicket>,
    /// Tickets received from the stream.
    pub scanned: usize,
}

/// Single-pass iterator of flagged tickets.
///
/// Yields at most one error, after which it ends.
pub struct Triage<'t, 'a, V: VisibilityLookup + ?Sized, I> {
    triager: &'t TicketTriager<'a, V>,
    tickets: I,
    scanned: usize,
    failed: bool,
}

impl<V, I> Triage<'_, '_, V, I>
where
    V: VisibilityLookup + ?Sized,
    I: Iterator<Item = std::result::Result<Ticket, TrackerError>>,
{
    /// Tickets received so far.
    pub fn scanned(&self) -> usize {
        self.scanned
    }

    /// Drain the stream. Any error discards everything gathered so far.
    pub fn finish(mut self) -> Result<TriageOutcome> {
        let mut flagged = Vec::new();
        for item in self.by_ref() {
            flagged.push(item?);
        }
        Ok(TriageOutcome {
            flagged,
            scanned: self.scanned,
        })
    }
}

impl<V, I> Iterator for Triage<'_, '_, V, I>
where
    V: VisibilityLookup + ?Sized,
    I: Iterator<Item = std::result::Result<Ticket, TrackerError>>,
{
    type Item = Result<FlaggedTicket>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let ticket = match self.tickets.next()? {
                Ok(ticket) => ticket,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(TriageError::from(e)));
                }
            };
            self.scanned += 1;

            match self.triager.evaluate(&ticket) {
                Ok(Some(flagged)) => return Some(Ok(flagged)),
                Ok(None) => continue,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
