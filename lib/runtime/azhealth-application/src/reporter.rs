use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use azhealth_domain::Report;

const TITLE: &str = "Azure Resource Health Report";

const STYLE: &str = "body{font-family:Segoe UI,system-ui,Arial,sans-serif;margin:24px;color:#1f2937}\
h1{font-size:22px;margin-bottom:4px}\
h2{font-size:17px;margin-top:28px}\
.sub{color:#6b7280;font-size:13px}\
.notice{background:#fef3c7;border:1px solid #f59e0b;padding:8px 12px;border-radius:6px;margin-top:12px}\
table{border-collapse:collapse;width:100%;margin-top:8px}\
th,td{border:1px solid #e5e7eb;padding:8px;text-align:left;vertical-align:top}\
th{background:#f3f4f6}\
.high{color:#b91c1c;font-weight:600}\
.medium{color:#b45309;font-weight:600}\
.low{color:#1d4ed8}";

/// Builds the complete HTML document in memory.
pub fn render_html(report: &Report) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{TITLE}</title>");
    let _ = writeln!(html, "<style>{STYLE}</style>");
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<h1>{TITLE}</h1>");
    let _ = writeln!(
        html,
        "<div class=\"sub\">Generated: {}</div>",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if report.partial {
        html.push_str(
            "<div class=\"notice\">Partial report: collection was interrupted before every resource was visited.</div>\n",
        );
    }

    html.push_str("<h2>Resource Health</h2>\n<table>\n");
    html.push_str("<tr><th>Name</th><th>Type</th><th>State</th><th>Location</th></tr>\n");
    for record in &report.health_records {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&record.resource_name),
            escape_html(&record.resource_type),
            record.availability_state,
            escape_html(&record.location),
        );
    }
    html.push_str("</table>\n");

    html.push_str("<h2>Detected Issues</h2>\n<table>\n");
    html.push_str(
        "<tr><th>Name</th><th>Issue Type</th><th>Severity</th><th>Description</th><th>Recommended Action</th></tr>\n",
    );
    for issue in &report.issues {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td class=\"{}\">{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&issue.resource_name),
            issue.issue_type,
            issue.severity.css_class(),
            issue.severity,
            escape_html(&issue.description),
            escape_html(&issue.recommended_action),
        );
    }
    html.push_str("</table>\n</body>\n</html>\n");
    html
}

/// Renders `report` and replaces whatever is at `path`.
pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    let html = render_html(report);
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create report directory {}", parent.display()))?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
