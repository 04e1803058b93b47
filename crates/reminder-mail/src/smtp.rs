//! Sends reports through an SMTP relay.

use lettre::message::{header::ContentType, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use reminder_core::{DeliveryError, Notifier, Report, SUBJECT};
use tracing::{debug, info};

use crate::config::SmtpConfig;
use crate::template::render_page;

/// `Notifier` backed by a blocking STARTTLS SMTP transport.
pub struct SmtpNotifier {
    config: SmtpConfig,
    transport: SmtpTransport,
}

impl SmtpNotifier {
    /// Builds the transport. No connection is made until the first send.
    pub fn new(config: SmtpConfig) -> Result<Self, DeliveryError> {
        let mut builder = SmtpTransport::starttls_relay(&config.host)
            .map_err(|e| DeliveryError::Transport(format!("Failed to create SMTP transport: {}", e)))?
            .port(config.port);

        if let Some((username, password)) = &config.credentials {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            config,
        })
    }
}

impl Notifier for SmtpNotifier {
    fn deliver(
        &self,
        project_id: &str,
        recipients: &[String],
        report: &Report,
    ) -> Result<(), DeliveryError> {
        let message = build_message(&self.config.from, project_id, recipients, report)?;

        debug!(host = %self.config.host, port = self.config.port, "Connecting to SMTP relay");
        self.transport
            .send(&message)
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        info!(
            to = %recipients.join(";"),
            subject = SUBJECT,
            rows = report.len(),
            "Email sent successfully"
        );
        Ok(())
    }
}

/// Assembles the reminder: one `To` per recipient, plain text plus HTML.
pub fn build_message(
    from: &str,
    project_id: &str,
    recipients: &[String],
    report: &Report,
) -> Result<Message, DeliveryError> {
    let mut builder = Message::builder().from(parse_mailbox(from)?).subject(SUBJECT);
    for recipient in recipients {
        builder = builder.to(parse_mailbox(recipient)?);
    }

    builder
        .multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(report.to_text()),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(render_page(project_id, report)),
                ),
        )
        .map_err(|e| DeliveryError::Build(e.to_string()))
}

fn parse_mailbox(address: &str) -> Result<Mailbox, DeliveryError> {
    address.parse().map_err(|e: lettre::address::AddressError| DeliveryError::Address {
        address: address.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use reminder_core::ReportRenderer;
    use reminder_models::FlaggedTicket;

    fn report() -> Report {
        let flagged = FlaggedTicket {
            key: "SUP-8".into(),
            priority: "1 - Critical".into(),
            assignee: "Grace Hopper".into(),
            status: "In Progress".into(),
            last_activity: reminder_core::display_date(
                &Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap().fixed_offset(),
            ),
        };
        ReportRenderer::new("https://example.atlassian.net").render(&[flagged])
    }

    fn recipients() -> Vec<String> {
        vec!["lead@example.com".to_string(), "ops@example.com".to_string()]
    }

    #[test]
    fn test_message_headers() {
        let message =
            build_message("Jira Bot <bot@example.com>", "10231", &recipients(), &report()).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("Subject: Jira Reminder Tool"));
        assert!(raw.contains("lead@example.com"));
        assert!(raw.contains("ops@example.com"));
        assert!(raw.contains("bot@example.com"));
        assert!(raw.contains("multipart/alternative"));
    }

    #[test]
    fn test_message_envelope_has_every_recipient() {
        let message = build_message("bot@example.com", "10231", &recipients(), &report()).unwrap();
        let to: Vec<String> = message.envelope().to().iter().map(|a| a.to_string()).collect();
        assert_eq!(to, recipients());
    }

    #[test]
    fn test_bad_recipient_is_address_error() {
        let err = build_message(
            "bot@example.com",
            "10231",
            &["not an address".to_string()],
            &report(),
        )
        .unwrap_err();
        assert!(matches!(err, DeliveryError::Address { ref address, .. } if address == "not an address"));
    }

    #[test]
    fn test_bad_sender_is_address_error() {
        let err = build_message("nobody", "10231", &recipients(), &report()).unwrap_err();
        assert!(matches!(err, DeliveryError::Address { .. }));
    }

    #[test]
    fn test_notifier_builds_without_connecting() {
        let config = SmtpConfig {
            host: "smtp.example.com".into(),
            port: 2525,
            credentials: None,
            from: "bot@example.com".into(),
        };
        assert!(SmtpNotifier::new(config).is_ok());
    }
}
