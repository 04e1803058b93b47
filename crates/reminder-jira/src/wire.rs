//! Jira REST response shapes and their conversion into domain types.

use reminder_core::{parse_tracker_timestamp, TicketPage, TrackerError};
use reminder_models::{Comment, Ticket, Visibility};
use serde::Deserialize;

/// Property Jira Service Management uses to mark internal comments.
pub const PUBLIC_COMMENT_PROPERTY: &str = "sd.public.comment";

/// `GET rest/api/3/search/jql`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub issues: Vec<IssueDto>,
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub is_last: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct IssueDto {
    pub key: String,
    pub fields: IssueFields,
}

#[derive(Debug, Deserialize)]
pub struct IssueFields {
    pub priority: Option<Named>,
    pub status: Option<Named>,
    pub assignee: Option<User>,
    pub created: String,
}

#[derive(Debug, Deserialize)]
pub struct Named {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub display_name: Option<String>,
}

/// `GET rest/api/2/issue/{key}/comment`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsResponse {
    #[serde(default)]
    pub start_at: usize,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub comments: Vec<CommentDto>,
}

/// A comment, from either the list or the single-comment endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: String,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub jsd_public: Option<bool>,
    #[serde(default)]
    pub properties: Vec<PropertyDto>,
}

#[derive(Debug, Deserialize)]
pub struct PropertyDto {
    pub key: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl SearchResponse {
    /// Converts the page into domain tickets (comments are fetched separately).
    ///
    /// `isLast: true` wins over a stray cursor.
    pub fn into_page(self) -> Result<TicketPage, TrackerError> {
        let next_page_token = match self.is_last {
            Some(true) => None,
            _ => self.next_page_token.filter(|t| !t.is_empty()),
        };
        let tickets = self
            .issues
            .into_iter()
            .map(IssueDto::into_ticket)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TicketPage {
            tickets,
            next_page_token,
        })
    }
}

impl IssueDto {
    pub fn into_ticket(self) -> Result<Ticket, TrackerError> {
        let created = parse_tracker_timestamp(&self.fields.created)?;
        let status = self.fields.status.map(|s| s.name).unwrap_or_default();

        let mut ticket = Ticket::new(self.key, status, created);
        ticket.priority = self.fields.priority.map(|p| p.name);
        ticket.assignee = self.fields.assignee.and_then(|a| a.display_name);
        Ok(ticket)
    }
}

impl CommentDto {
    /// Visibility carried in the payload, if any.
    ///
    /// `jsdPublic` wins; otherwise the service-desk property's `internal`
    /// flag is consulted.
    pub fn visibility(&self) -> Option<Visibility> {
        if let Some(public) = self.jsd_public {
            return Some(Visibility::from_public_flag(public));
        }
        self.properties
            .iter()
            .find(|p| p.key == PUBLIC_COMMENT_PROPERTY)
            .and_then(|p| p.value.get("internal"))
            .and_then(serde_json::Value::as_bool)
            .map(|internal| Visibility::from_public_flag(!internal))
    }

    pub fn into_comment(self) -> Result<Comment, TrackerError> {
        let raw = self
            .created
            .as_deref()
            .ok_or_else(|| TrackerError::Decode(format!("comment {} has no created date", self.id)))?;
        let created = parse_tracker_timestamp(raw)?;
        let visibility = self.visibility();

        let mut comment = Comment::new(self.id, created);
        comment.visibility = visibility;
        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH: &str = r#"{
        "nextPageToken": "CAEaAggD",
        "isLast": false,
        "issues": [
            {
                "key": "SUP-1",
                "fields": {
                    "priority": {"name": "1 - Critical"},
                    "status": {"name": "Waiting for Support"},
                    "assignee": {"displayName": "Ada Lovelace"},
                    "created": "2024-03-04T09:15:00.000+0100"
                }
            },
            {
                "key": "SUP-2",
                "fields": {
                    "priority": null,
                    "status": {"name": "More Information"},
                    "assignee": null,
                    "created": "2024-03-05T10:00:00.000+0000"
                }
            }
        ]
    }"#;

    #[test]
    fn test_search_decodes_into_tickets() {
        let response: SearchResponse = serde_json::from_str(SEARCH).unwrap();
        let page = response.into_page().unwrap();

        assert_eq!(page.next_page_token.as_deref(), Some("CAEaAggD"));
        assert_eq!(page.tickets.len(), 2);

        let first = &page.tickets[0];
        assert_eq!(first.key, "SUP-1");
        assert_eq!(first.priority.as_deref(), Some("1 - Critical"));
        assert_eq!(first.assignee.as_deref(), Some("Ada Lovelace"));
        assert_eq!(first.created.offset().local_minus_utc(), 3600);

        let second = &page.tickets[1];
        assert!(second.priority.is_none());
        assert!(second.assignee.is_none());
        assert!(second.is_awaiting_information());
    }

    #[test]
    fn test_last_page_has_no_cursor() {
        let json = r#"{"issues": [], "nextPageToken": "CAEaAggD", "isLast": true}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert!(response.into_page().unwrap().next_page_token.is_none());

        let json = r#"{"issues": []}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert!(response.into_page().unwrap().next_page_token.is_none());
    }

    #[test]
    fn test_bad_created_date_is_an_error() {
        let json = r#"{"key":"SUP-9","fields":{"status":{"name":"Open"},"created":"yesterday"}}"#;
        let issue: IssueDto = serde_json::from_str(json).unwrap();
        assert!(matches!(
            issue.into_ticket(),
            Err(TrackerError::Timestamp(_))
        ));
    }

    #[test]
    fn test_comment_visibility_from_jsd_public() {
        let json = r#"{"id":"10","created":"2024-03-04T09:15:00.000+0000","jsdPublic":false}"#;
        let comment: CommentDto = serde_json::from_str(json).unwrap();
        let comment = comment.into_comment().unwrap();
        assert_eq!(comment.visibility, Some(Visibility::Internal));
    }

    #[test]
    fn test_comment_visibility_from_property() {
        let json = r#"{
            "id": "11",
            "created": "2024-03-04T09:15:00.000+0000",
            "properties": [{"key": "sd.public.comment", "value": {"internal": true}}]
        }"#;
        let comment: CommentDto = serde_json::from_str(json).unwrap();
        assert_eq!(comment.visibility(), Some(Visibility::Internal));

        let json = r#"{"id":"12","created":"2024-03-04T09:15:00.000+0000","properties":[]}"#;
        let comment: CommentDto = serde_json::from_str(json).unwrap();
        assert_eq!(comment.visibility(), None);
    }

    #[test]
    fn test_single_comment_without_created_still_decodes() {
        let comment: CommentDto = serde_json::from_str(r#"{"id":"13","jsdPublic":true}"#).unwrap();
        assert_eq!(comment.visibility(), Some(Visibility::Public));
        assert!(matches!(comment.into_comment(), Err(TrackerError::Decode(_))));
    }
}
