//! The notification seam.

use reminder_models::ProjectConfig;
use tracing::{error, info};

use crate::error::DeliveryError;
use crate::report::Report;

/// Subject line of every reminder.
pub const SUBJECT: &str = "Jira Reminder Tool";

/// Delivers a rendered report to a project's recipients.
pub trait Notifier {
    /// Send `report` to `recipients`. Only called with non-empty reports.
    fn deliver(
        &self,
        project_id: &str,
        recipients: &[String],
        report: &Report,
    ) -> Result<(), DeliveryError>;
}

/// What happened to a project's report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Nothing was overdue, so nothing was sent.
    Skipped,
    Sent,
    /// Sending failed; the failure was logged.
    Failed,
}

/// Deliver a report unless it is empty. Failures are logged and swallowed.
pub fn deliver_report<N: Notifier + ?Sized>(
    notifier: &N,
    config: &ProjectConfig,
    report: &Report,
) -> Delivery {
    if report.is_empty() {
        info!("No tickets need attention");
        return Delivery::Skipped;
    }

    match notifier.deliver(&config.project_id, &config.recipients, report) {
        Ok(()) => {
            info!(recipients = config.recipients.len(), "Reminder sent");
            Delivery::Sent
        }
        Err(e) => {
            error!(error = %e, "Could not send reminder");
            Delivery::Failed
        }
    }
}

#[cfg(test)]
pub(crate) mod recording {
    //! Notifier that remembers what it was asked to send.

    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    pub struct RecordingNotifier {
        pub sent: RefCell<Vec<(String, Vec<String>, usize)>>,
        pub fail: bool,
    }

    impl Notifier for RecordingNotifier {
        fn deliver(
            &self,
            project_id: &str,
            recipients: &[String],
            report: &Report,
        ) -> Result<(), DeliveryError> {
            if self.fail {
                return Err(DeliveryError::Transport("connection refused".to_string()));
            }
            self.sent
                .borrow_mut()
                .push((project_id.to_string(), recipients.to_vec(), report.len()));
            Ok(())
        }
    }
}
