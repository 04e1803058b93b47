//! SMTP settings.

use reminder_core::config::require_env;
use reminder_core::ConfigError;

pub const SMTP_HOST_ENV: &str = "SMTP_HOST";
pub const SMTP_PORT_ENV: &str = "SMTP_PORT";
pub const SMTP_USERNAME_ENV: &str = "SMTP_USERNAME";
pub const SMTP_PASSWORD_ENV: &str = "SMTP_PASSWORD";
pub const MAIL_FROM_ENV: &str = "MAIL_FROM";

/// Submission port used when `SMTP_PORT` is unset.
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Where and as whom reminders are sent.
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// Username and password; relays that accept anonymous submission leave this empty.
    pub credentials: Option<(String, String)>,
    /// Sender mailbox, e.g. `Jira Reminder <jira@example.com>`.
    pub from: String,
}

impl SmtpConfig {
    /// Reads the `SMTP_*` and `MAIL_FROM` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = require_env(SMTP_HOST_ENV)?;
        let from = require_env(MAIL_FROM_ENV)?;
        let port = parse_port(std::env::var(SMTP_PORT_ENV).ok().as_deref())?;

        let credentials = match require_env(SMTP_USERNAME_ENV) {
            Ok(username) => Some((username, require_env(SMTP_PASSWORD_ENV)?)),
            Err(_) => None,
        };

        Ok(Self {
            host,
            port,
            credentials,
            from,
        })
    }
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.credentials.as_ref().map(|(u, _)| u))
            .field("from", &self.from)
            .finish()
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(DEFAULT_SMTP_PORT),
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidEnv {
            name: SMTP_PORT_ENV,
            message: format!("'{}' is not a port number", value),
        }),
    }
}
