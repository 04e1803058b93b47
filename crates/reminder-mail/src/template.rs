//! HTML page wrapped around the report rows.

use reminder_core::report::{escape_html, COLUMNS};
use reminder_core::Report;

const STYLE: &str = "\
body { font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; color: #1f2937; }
table { border-collapse: collapse; }
th, td { border: 1px solid #d1d5db; padding: 6px 10px; text-align: left; }
th { background: #f3f4f6; }";

/// Renders the full HTML body for a project's reminder.
pub fn render_page(project_id: &str, report: &Report) -> String {
    let header: String = COLUMNS
        .iter()
        .map(|c| format!("<th>{}</th>", escape_html(c)))
        .collect();

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n{style}\n</style>\n</head>\n<body>\n\
<p>The following tickets in project {project} have not been updated within their SLA.</p>\n\
<table>\n<tr>{header}</tr>\n{rows}</table>\n</body>\n</html>\n",
        style = STYLE,
        project = escape_html(project_id),
        header = header,
        rows = report.to_html_rows(),
    )
}
