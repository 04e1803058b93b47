//! Rendering of flagged tickets into a report.

use reminder_models::FlaggedTicket;

/// Column headings, in row order.
pub const COLUMNS: [&str; 5] = ["Ticket", "Priority", "Assignee", "Status", "Last Comment"];

/// One report row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub key: String,
    /// Browse URL for the ticket.
    pub link: String,
    pub priority: String,
    pub assignee: String,
    pub status: String,
    pub last_activity: String,
}

impl ReportRow {
    fn cells(&self) -> [&str; 5] {
        [
            self.key.as_str(),
            self.priority.as_str(),
            self.assignee.as_str(),
            self.status.as_str(),
            self.last_activity.as_str(),
        ]
    }
}

/// Rendered report for one project. An empty report must not be sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    rows: Vec<ReportRow>,
}

impl Report {
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// HTML table rows (`<tr>` elements only), one per ticket.
    pub fn to_html_rows(&self) -> String {
        let mut html = String::new();
        for row in &self.rows {
            html.push_str(&format!(
                "<tr><td><a href=\"{}\">{}</a></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&row.link),
                escape_html(&row.key),
                escape_html(&row.priority),
                escape_html(&row.assignee),
                escape_html(&row.status),
                escape_html(&row.last_activity),
            ));
        }
        html
    }

    /// Plain-text table with a heading row; empty for an empty report.
    pub fn to_text(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        let mut widths = COLUMNS.map(str::len);
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row.cells()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut text = format_line(&COLUMNS, &widths);
        for row in &self.rows {
            text.push_str(&format_line(&row.cells(), &widths));
        }
        for row in &self.rows {
            text.push_str(&format!("\n{}: {}", row.key, row.link));
        }
        text.push('\n');
        text
    }
}

fn format_line(cells: &[&str; 5], widths: &[usize; 5]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    format!("{}\n", padded.join("  ").trim_end())
}

/// Turns flagged tickets into a report linking back to the tracker.
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    browse_base: String,
}

impl ReportRenderer {
    /// Creates a renderer for tickets hosted at `server`.
    pub fn new(server: &str) -> Self {
        Self {
            browse_base: format!("{}/browse", server.trim_end_matches('/')),
        }
    }

    /// Browse URL for an issue key.
    pub fn link(&self, key: &str) -> String {
        format!("{}/{}", self.browse_base, key)
    }

    /// One row per flagged ticket, in input order.
    pub fn render(&self, flagged: &[FlaggedTicket]) -> Report {
        let rows = flagged
            .iter()
            .map(|ticket| ReportRow {
                key: ticket.key.clone(),
                link: self.link(&ticket.key),
                priority: ticket.priority.clone(),
                assignee: ticket.assignee.clone(),
                status: ticket.status.clone(),
                last_activity: ticket.last_activity.clone(),
            })
            .collect();
        Report { rows }
    }
}

/// Escape text for HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flagged(key: &str, assignee: &str) -> FlaggedTicket {
        FlaggedTicket {
            key: key.to_string(),
            priority: "1 - Critical".to_string(),
            assignee: assignee.to_string(),
            status: "Open".to_string(),
            last_activity: "4-3-2024".to_string(),
        }
    }

    #[test]
    fn test_render_empty_report() {
        let report = ReportRenderer::new("https://example.atlassian.net").render(&[]);

        assert!(report.is_empty());
        assert_eq!(report.to_html_rows(), "");
        assert_eq!(report.to_text(), "");
    }

    #[test]
    fn test_render_links_to_browse_page() {
        let renderer = ReportRenderer::new("https://example.atlassian.net/");
        let report = renderer.render(&[flagged("SUP-1", "Dana Reyes")]);

        assert_eq!(report.len(), 1);
        assert_eq!(report.rows()[0].link, "https://example.atlassian.net/browse/SUP-1");
    }

    #[test]
    fn test_html_rows() {
        let renderer = ReportRenderer::new("https://example.atlassian.net");
        let report = renderer.render(&[flagged("SUP-1", "Dana Reyes"), flagged("SUP-2", "Unassigned")]);

        let html = report.to_html_rows();
        assert_eq!(html.matches("<tr>").count(), 2);
        assert!(html.starts_with(
            "<tr><td><a href=\"https://example.atlassian.net/browse/SUP-1\">SUP-1</a></td>\
             <td>1 - Critical</td><td>Dana Reyes</td><td>Open</td><td>4-3-2024</td></tr>"
        ));
    }

    #[test]
    fn test_html_rows_are_escaped() {
        let renderer = ReportRenderer::new("https://example.atlassian.net");
        let report = renderer.render(&[flagged("SUP-1", "<script>O'Neil & co</script>")]);

        let html = report.to_html_rows();
        assert!(html.contains("&lt;script&gt;O&#39;Neil &amp; co&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_text_table_alignment() {
        let renderer = ReportRenderer::new("https://example.atlassian.net");
        let report = renderer.render(&[flagged("SUP-1", "Dana Reyes")]);

        let text = report.to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("Ticket  Priority      Assignee"));
        assert!(lines[1].starts_with("SUP-1   1 - Critical  Dana Reyes"));
        assert!(text.contains("SUP-1: https://example.atlassian.net/browse/SUP-1"));
    }
}
