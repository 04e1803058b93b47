//! Blocking Jira REST client.

use reminder_core::{TicketPage, Tracker, TrackerError, VisibilityLookup};
use reminder_models::{Comment, Visibility};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::config::JiraConfig;
use crate::wire::{CommentDto, CommentsResponse, SearchResponse};

/// Fields requested from the search endpoint.
pub const SEARCH_FIELDS: &str = "priority,status,assignee,created";

/// Cursor-paged JQL search.
pub const SEARCH_PATH: &str = "rest/api/3/search/jql";

/// Page size used when listing comments.
const COMMENT_PAGE_SIZE: usize = 100;

/// Jira client over `reqwest::blocking`.
///
/// Each call is a single request; failures are reported, never retried.
pub struct JiraClient {
    client: reqwest::blocking::Client,
    config: JiraConfig,
}

impl JiraClient {
    /// Creates a client for the given site.
    pub fn new(config: JiraConfig) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            config,
        }
    }

    /// Site settings this client talks to.
    pub fn config(&self) -> &JiraConfig {
        &self.config
    }

    /// Resolves an API path against the site URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, TrackerError> {
        self.config
            .server
            .join(path)
            .map_err(|e| TrackerError::Request(format!("invalid endpoint {}: {}", path, e)))
    }

    fn get_json<R: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<R, TrackerError> {
        trace!(url = %url, "GET");

        let response = self
            .client
            .get(url)
            .basic_auth(&self.config.email, Some(&self.config.api_token))
            .header("Accept", "application/json")
            .query(query)
            .send()
            .map_err(|e| TrackerError::Request(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(TrackerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .map_err(|e| TrackerError::Decode(format!("Failed to parse response: {}", e)))
    }
}

/// Query string for one search page.
fn search_query(
    jql: &str,
    page_token: Option<&str>,
    max_results: usize,
) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("jql", jql.to_string()),
        ("maxResults", max_results.to_string()),
        ("fields", SEARCH_FIELDS.to_string()),
    ];
    if let Some(token) = page_token {
        query.push(("nextPageToken", token.to_string()));
    }
    query
}

impl VisibilityLookup for JiraClient {
    fn comment_visibility(
        &self,
        issue_key: &str,
        comment_id: &str,
    ) -> Result<Visibility, TrackerError> {
        let url = self.endpoint(&format!(
            "rest/api/3/issue/{}/comment/{}",
            issue_key, comment_id
        ))?;
        let comment: CommentDto = self.get_json(url, &[])?;

        // Service desk omits the flag on plain Jira projects; treat as public.
        let visibility = comment.visibility().unwrap_or(Visibility::Public);
        debug!(issue = issue_key, comment = comment_id, ?visibility, "Looked up comment visibility");
        Ok(visibility)
    }
}

impl Tracker for JiraClient {
    fn search(
        &self,
        jql: &str,
        page_token: Option<&str>,
        max_results: usize,
    ) -> Result<TicketPage, TrackerError> {
        let url = self.endpoint(SEARCH_PATH)?;
        let query = search_query(jql, page_token, max_results);

        let response: SearchResponse = self.get_json(url, &query)?;
        debug!(
            received = response.issues.len(),
            is_last = ?response.is_last,
            "Search page received"
        );
        response.into_page()
    }

    fn comments(&self, issue_key: &str) -> Result<Vec<Comment>, TrackerError> {
        let url = self.endpoint(&format!("rest/api/2/issue/{}/comment", issue_key))?;
        let mut comments = Vec::new();

        loop {
            let query = [
                ("startAt", comments.len().to_string()),
                ("maxResults", COMMENT_PAGE_SIZE.to_string()),
                ("orderBy", "created".to_string()),
                ("expand", "properties".to_string()),
            ];
            let page: CommentsResponse = self.get_json(url.clone(), &query)?;
            let received = page.comments.len();

            for dto in page.comments {
                comments.push(dto.into_comment()?);
            }

            if received == 0 || comments.len() >= page.total {
                break;
            }
        }

        comments.sort_by_key(|c| c.created);
        debug!(issue = issue_key, count = comments.len(), "Comments fetched");
        Ok(comments)
    }
}
