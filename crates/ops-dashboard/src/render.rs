//! HTML rendering of the data table
//!
//! `TableModel` describes what the table shows; the browser app draws it with
//! its own views, the CLI turns it into markup and wraps it in a standalone
//! page.

use std::fmt::Write;

use crate::constants;
use crate::dataset::{Column, ColumnRole, Row};

/// Markup for `<thead>` and `<tbody>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableHtml {
    pub head: String,
    pub body: String,
}

/// Badge style for the status column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Normal,
    Warning,
    Error,
}

impl StatusClass {
    /// Unknown labels fall back to `Normal`
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        let is = |labels: &[&str]| labels.iter().any(|l| l.eq_ignore_ascii_case(label));

        if is(constants::NORMAL_STATUS_LABELS) {
            StatusClass::Normal
        } else if is(constants::WARNING_STATUS_LABELS) {
            StatusClass::Warning
        } else if is(constants::ERROR_STATUS_LABELS) {
            StatusClass::Error
        } else {
            StatusClass::Normal
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            StatusClass::Normal => "status-normal",
            StatusClass::Warning => "status-warning",
            StatusClass::Error => "status-error",
        }
    }
}

/// Display label for a category id; unknown ids pass through
pub fn category_label(id: &str) -> &str {
    constants::CATEGORY_LABELS
        .iter()
        .find(|(known, _)| *known == id)
        .map(|(_, label)| *label)
        .unwrap_or(id)
}

/// A body cell: display text and, for the status column, its badge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub status: Option<StatusClass>,
}

impl Cell {
    /// Apply the per-role display override to a raw value
    pub fn new(column: &Column, value: &str) -> Self {
        match column.role {
            ColumnRole::Status => Self {
                text: value.to_string(),
                status: Some(StatusClass::from_label(value)),
            },
            ColumnRole::Category => Self {
                text: category_label(value).to_string(),
                status: None,
            },
            ColumnRole::Date | ColumnRole::Plain => Self {
                text: value.to_string(),
                status: None,
            },
        }
    }

    fn to_html(&self) -> String {
        match self.status {
            Some(status) => format!(
                "<td><span class=\"{}\">{}</span></td>",
                status.css_class(),
                escape_html(&self.text)
            ),
            None => format!("<td>{}</td>", escape_html(&self.text)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    Rows(Vec<Vec<Cell>>),
    /// A single row with one cell spanning `span` columns
    Placeholder { message: String, span: usize },
}

/// What the table shows, independent of how it is drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableModel {
    /// Header names; empty when no header row is shown
    pub head: Vec<String>,
    pub body: TableBody,
}

impl TableModel {
    /// Table showing only a message row (loading, load failure)
    pub fn message(message: &str, span: usize) -> Self {
        Self {
            head: Vec::new(),
            body: TableBody::Placeholder {
                message: message.to_string(),
                span: span.max(1),
            },
        }
    }

    /// Build the model for the visible columns of the given rows.
    ///
    /// No visible columns and no rows each get their own placeholder; the
    /// no-rows placeholder spans every visible column.
    pub fn build<'a, I>(visible: &[&Column], rows: I) -> Self
    where
        I: IntoIterator<Item = &'a Row>,
    {
        if visible.is_empty() {
            return Self::message(constants::MSG_NO_COLUMNS, 1);
        }

        let head = visible.iter().map(|c| c.name.clone()).collect();
        let rows: Vec<Vec<Cell>> = rows
            .into_iter()
            .map(|row| visible.iter().map(|c| Cell::new(c, row.get(c))).collect())
            .collect();

        let body = if rows.is_empty() {
            TableBody::Placeholder {
                message: constants::MSG_NO_MATCHING_ROWS.to_string(),
                span: visible.len(),
            }
        } else {
            TableBody::Rows(rows)
        };

        Self { head, body }
    }

    pub fn to_html(&self) -> TableHtml {
        let mut head = String::new();
        if !self.head.is_empty() {
            head.push_str("<tr>");
            for name in &self.head {
                let _ = write!(head, "<th>{}</th>", escape_html(name));
            }
            head.push_str("</tr>");
        }

        let body = match &self.body {
            TableBody::Placeholder { message, span } => format!(
                "<tr><td colspan=\"{}\" class=\"placeholder\">{}</td></tr>",
                span,
                escape_html(message)
            ),
            TableBody::Rows(rows) => rows
                .iter()
                .map(|row| format!("<tr>{}</tr>", row.iter().map(Cell::to_html).collect::<String>()))
                .collect(),
        };

        TableHtml { head, body }
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const PAGE_STYLE: &str = "body{margin:0;font-family:system-ui,-apple-system,'Segoe UI',sans-serif;color:#1f2933;background:#f7f9fb}\
main{max-width:1200px;margin:0 auto;padding:24px}\
h1{font-size:20px;margin:0 0 4px}\
.summary{color:#616e7c;font-size:13px;margin-bottom:16px}\
.data-table{width:100%;border-collapse:collapse;background:#fff}\
.data-table th,.data-table td{padding:8px 10px;border-bottom:1px solid #e4e7eb;text-align:left}\
.data-table th{background:#f0f4f8;font-weight:600}\
.placeholder{color:#7b8794;text-align:center}\
.status-normal,.status-warning,.status-error{display:inline-block;padding:2px 8px;border-radius:999px;font-size:12px}\
.status-normal{background:#e3f9e5;color:#0e5814}\
.status-warning{background:#fffbea;color:#8d2b0b}\
.status-error{background:#ffe3e3;color:#780a0a}";

/// Standalone HTML document around a rendered table
pub fn render_page(title: &str, summary: &str, table: &TableHtml) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{title}</title><style>{PAGE_STYLE}</style></head>\
         <body><main><h1>{title}</h1><div class=\"summary\">{summary}</div>\
         <table class=\"data-table\"><thead>{head}</thead>\
         <tbody data-jshook=\"table-body\">{body}</tbody></table></main></body></html>\n",
        title = escape_html(title),
        summary = escape_html(summary),
        head = table.head,
        body = table.body,
    )
}
