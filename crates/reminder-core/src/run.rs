//! The per-run loop over validated projects.

use chrono::{DateTime, Utc};
use reminder_models::ProjectConfig;
use tracing::{error, info, info_span};

use crate::error::TriageError;
use crate::notify::{deliver_report, Delivery, Notifier};
use crate::report::ReportRenderer;
use crate::tracker::{OpenTickets, Tracker, DEFAULT_PAGE_SIZE};
use crate::triage::TicketTriager;

/// Result of processing one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOutcome {
    pub project_id: String,
    /// Open tickets received from the tracker.
    pub scanned: usize,
    /// Tickets found overdue.
    pub flagged: usize,
    pub delivery: Delivery,
}

/// A project whose scan was aborted.
#[derive(Debug)]
pub struct ProjectFailure {
    pub project_id: String,
    pub error: TriageError,
}

/// Everything that happened in one run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub completed: Vec<ProjectOutcome>,
    pub failed: Vec<ProjectFailure>,
}

impl RunSummary {
    /// True when every project was scanned to the end.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Scans projects against a tracker and hands reports to a notifier.
pub struct Runner<'a, T: Tracker + ?Sized, N: Notifier + ?Sized> {
    tracker: &'a T,
    notifier: &'a N,
    renderer: &'a ReportRenderer,
    page_size: usize,
}

impl<'a, T: Tracker + ?Sized, N: Notifier + ?Sized> Runner<'a, T, N> {
    pub fn new(tracker: &'a T, notifier: &'a N, renderer: &'a ReportRenderer) -> Self {
        Self {
            tracker,
            notifier,
            renderer,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Sets the search page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Scan one project and deliver its report.
    ///
    /// # Errors
    /// Returns the tracker failure that aborted the scan; nothing is
    /// delivered in that case.
    pub fn run_project(
        &self,
        config: &ProjectConfig,
        now: DateTime<Utc>,
    ) -> Result<ProjectOutcome, TriageError> {
        let span = info_span!("project", id = %config.project_id);
        let _guard = span.enter();

        let tickets = OpenTickets::new(self.tracker, &config.project_id).with_page_size(self.page_size);
        info!(jql = %tickets.jql(), "Retrieving open tickets");

        let outcome = TicketTriager::new(config, self.tracker, now)
            .triage(tickets)
            .finish()?;
        info!(count = outcome.scanned, "Total tickets received");

        let report = self.renderer.render(&outcome.flagged);
        info!(count = report.len(), "Total issues needing attention");

        let delivery = deliver_report(self.notifier, config, &report);

        Ok(ProjectOutcome {
            project_id: config.project_id.clone(),
            scanned: outcome.scanned,
            flagged: report.len(),
            delivery,
        })
    }

    /// Scan every project in order. A failed project is logged and the run
    /// moves on to the next one.
    pub fn run(&self, configs: &[ProjectConfig], now: DateTime<Utc>) -> RunSummary {
        let mut summary = RunSummary::default();

        for config in configs {
            match self.run_project(config, now) {
                Ok(outcome) => summary.completed.push(outcome),
                Err(e) => {
                    error!(project_id = %config.project_id, error = %e, "Cannot retrieve issues");
                    summary.failed.push(ProjectFailure {
                        project_id: config.project_id.clone(),
                        error: e,
                    });
                }
            }
        }

        summary
    }
}
