//! Jira connection settings.

use reminder_core::config::require_env;
use reminder_core::ConfigError;
use url::Url;

/// Jira site base URL, e.g. `https://example.atlassian.net`.
pub const JIRA_SERVER_ENV: &str = "JIRA_SERVER";

/// Account email used for basic auth.
pub const JIRA_EMAIL_ENV: &str = "JIRA_EMAIL";

/// API token used for basic auth.
pub const JIRA_API_TOKEN_ENV: &str = "JIRA_API_TOKEN";

/// Connection settings for a Jira site.
#[derive(Clone)]
pub struct JiraConfig {
    /// Site base URL, always ending in `/`.
    pub server: Url,
    pub email: String,
    pub api_token: String,
}

impl JiraConfig {
    /// Builds a config, normalising the server URL.
    pub fn new(
        server: &str,
        email: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            server: parse_server(server)?,
            email: email.into(),
            api_token: api_token.into(),
        })
    }

    /// Reads `JIRA_SERVER`, `JIRA_EMAIL` and `JIRA_API_TOKEN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let server = require_env(JIRA_SERVER_ENV)?;
        let email = require_env(JIRA_EMAIL_ENV)?;
        let api_token = require_env(JIRA_API_TOKEN_ENV)?;
        Self::new(&server, email, api_token)
    }

    /// Server URL without the trailing slash, as used in browse links.
    pub fn server_str(&self) -> &str {
        self.server.as_str().trim_end_matches('/')
    }
}

impl std::fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraConfig")
            .field("server", &self.server.as_str())
            .field("email", &self.email)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

fn parse_server(server: &str) -> Result<Url, ConfigError> {
    let mut normalised = server.trim().to_string();
    if !normalised.ends_with('/') {
        normalised.push('/');
    }

    let url = Url::parse(&normalised).map_err(|e| ConfigError::InvalidEnv {
        name: JIRA_SERVER_ENV,
        message: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEnv {
            name: JIRA_SERVER_ENV,
            message: format!("unsupported scheme '{}'", other),
        }),
    }
}
