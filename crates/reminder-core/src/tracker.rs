//! The tracker seam and paginated open-ticket stream.
//!
//! Implementations only move data; the open-ticket filter and pagination
//! policy live here so every transport behaves the same.

use std::collections::VecDeque;

use reminder_models::{Comment, Ticket, Visibility};
use tracing::debug;

use crate::error::TrackerError;

/// Statuses that count as closed.
pub const CLOSED_STATUSES: [&str; 4] = ["Closed", "Close", "Complete", "Completed"];

/// Default page size for issue searches.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Query selecting a project's open tickets, highest priority first.
pub fn open_tickets_jql(project_id: &str) -> String {
    format!(
        "project = {} AND status not in ({}) ORDER BY priority DESC",
        project_id,
        CLOSED_STATUSES.join(",")
    )
}

/// One page of search results.
#[derive(Debug, Clone, Default)]
pub struct TicketPage {
    /// Tickets on this page, without comments.
    pub tickets: Vec<Ticket>,
    /// Cursor for the following page; `None` on the last page.
    pub next_page_token: Option<String>,
}

/// Looks up the visibility of a single comment.
pub trait VisibilityLookup {
    /// Returns whether the comment is public or internal.
    fn comment_visibility(
        &self,
        issue_key: &str,
        comment_id: &str,
    ) -> Result<Visibility, TrackerError>;
}

/// Read access to an issue tracker.
///
/// Calls block until the tracker answers. Failures are returned as-is;
/// retries are not attempted.
pub trait Tracker: VisibilityLookup {
    /// Runs `jql`, returning at most `max_results` tickets.
    ///
    /// `page_token` is `None` for the first page, then the
    /// `next_page_token` of the previous page.
    fn search(
        &self,
        jql: &str,
        page_token: Option<&str>,
        max_results: usize,
    ) -> Result<TicketPage, TrackerError>;

    /// Returns an issue's comments, oldest first.
    ///
    /// Visibility should be filled in when the tracker includes it, so the
    /// resolver can skip per-comment lookups.
    fn comments(&self, issue_key: &str) -> Result<Vec<Comment>, TrackerError>;
}

/// Single-pass stream of a project's open tickets with their comments.
///
/// Pages are fetched on demand. The first error is yielded once and ends
/// the stream.
pub struct OpenTickets<'a, T: Tracker + ?Sized> {
    tracker: &'a T,
    jql: String,
    page_size: usize,
    next_page_token: Option<String>,
    pages: usize,
    buffer: VecDeque<Ticket>,
    done: bool,
}

impl<'a, T: Tracker + ?Sized> OpenTickets<'a, T> {
    /// Creates a stream for a project.
    pub fn new(tracker: &'a T, project_id: &str) -> Self {
        Self {
            tracker,
            jql: open_tickets_jql(project_id),
            page_size: DEFAULT_PAGE_SIZE,
            next_page_token: None,
            pages: 0,
            buffer: VecDeque::new(),
            done: false,
        }
    }

    /// Sets the page size (minimum 1).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// The query being paged through.
    pub fn jql(&self) -> &str {
        &self.jql
    }

    fn fetch_page(&mut self) -> Result<(), TrackerError> {
        let page = self.tracker.search(
            &self.jql,
            self.next_page_token.as_deref(),
            self.page_size,
        )?;
        self.pages += 1;
        debug!(
            page = self.pages,
            received = page.tickets.len(),
            last = page.next_page_token.is_none(),
            "Fetched ticket page"
        );

        // An empty page ends the stream even if the tracker hands out another cursor.
        if page.tickets.is_empty() || page.next_page_token.is_none() {
            self.done = true;
        }
        self.next_page_token = page.next_page_token;
        self.buffer.extend(page.tickets);
        Ok(())
    }
}

impl<T: Tracker + ?Sized> Iterator for OpenTickets<'_, T> {
    type Item = Result<Ticket, TrackerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buffer.is_empty() {
            if self.done {
                return None;
            }
            if let Err(e) = self.fetch_page() {
                self.done = true;
                return Some(Err(e));
            }
        }

        let mut ticket = self.buffer.pop_front()?;
        match self.tracker.comments(&ticket.key) {
            Ok(comments) => {
                ticket.comments = comments;
                Some(Ok(ticket))
            }
            Err(e) => {
                self.done = true;
                self.buffer.clear();
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory tracker for tests.

    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    use super::*;

    #[derive(Default)]
    pub struct FakeTracker {
        pub tickets: Vec<Ticket>,
        pub comments: HashMap<String, Vec<Comment>>,
        pub visibility: HashMap<String, Visibility>,
        /// Fail the search for the page starting at this offset.
        pub fail_search_at: Option<usize>,
        /// Keep handing out a cursor, even on empty pages.
        pub endless_cursor: bool,
        pub fail_comments_for: Option<String>,
        pub searches: RefCell<Vec<(Option<String>, usize)>>,
        pub visibility_lookups: Cell<usize>,
    }

    impl VisibilityLookup for FakeTracker {
        fn comment_visibility(
            &self,
            _issue_key: &str,
            comment_id: &str,
        ) -> Result<Visibility, TrackerError> {
            self.visibility_lookups.set(self.visibility_lookups.get() + 1);
            self.visibility
                .get(comment_id)
                .copied()
                .ok_or_else(|| TrackerError::Status {
                    status: 404,
                    body: format!("comment {comment_id} not found"),
                })
        }
    }

    impl Tracker for FakeTracker {
        fn search(
            &self,
            _jql: &str,
            page_token: Option<&str>,
            max_results: usize,
        ) -> Result<TicketPage, TrackerError> {
            self.searches
                .borrow_mut()
                .push((page_token.map(str::to_string), max_results));

            // Cursors are plain offsets here.
            let start_at = match page_token {
                None => 0,
                Some(token) => token
                    .parse::<usize>()
                    .map_err(|_| TrackerError::Status {
                        status: 400,
                        body: format!("bad page token {token}"),
                    })?,
            };
            if self.fail_search_at == Some(start_at) {
                return Err(TrackerError::Request("connection reset".to_string()));
            }

            let tickets: Vec<Ticket> = self
                .tickets
                .iter()
                .skip(start_at)
                .take(max_results)
                .cloned()
                .collect();
            let end = start_at + tickets.len();
            let next_page_token =
                (end < self.tickets.len() || self.endless_cursor).then(|| end.to_string());
            Ok(TicketPage {
                tickets,
                next_page_token,
            })
        }

        fn comments(&self, issue_key: &str) -> Result<Vec<Comment>, TrackerError> {
            if self.fail_comments_for.as_deref() == Some(issue_key) {
                return Err(TrackerError::Status {
                    status: 500,
                    body: "internal error".to_string(),
                });
            }
            Ok(self.comments.get(issue_key).cloned().unwrap_or_default())
        }
    }
}
