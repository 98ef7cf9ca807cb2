//! Display models and HTML rendering for the todo list.
//!
//! Every piece of server-supplied text goes through [`escape_html`] before
//! it is spliced into markup. Timestamps are formatted for display only and
//! never parsed back.

use chrono::{DateTime, NaiveDateTime};

use crate::types::Todo;

pub const EMPTY_MESSAGE: &str = "No todos yet. Create your first one!";
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load todos";

/// What the list area currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Empty,
    Items(Vec<Todo>),
    Failed,
}

impl ListView {
    pub fn from_todos(todos: Vec<Todo>) -> Self {
        if todos.is_empty() {
            ListView::Empty
        } else {
            ListView::Items(todos)
        }
    }
}

/// Backend status indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendStatus {
    Online(String),
    Offline,
}

impl BackendStatus {
    pub fn label(&self) -> &str {
        match self {
            BackendStatus::Online(status) => status,
            BackendStatus::Offline => "OFFLINE",
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, BackendStatus::Online(_))
    }
}

pub fn render_list_html(view: &ListView) -> String {
    match view {
        ListView::Empty => format!(r#"<div class="empty-state">{EMPTY_MESSAGE}</div>"#),
        ListView::Failed => format!(r#"<div class="loading">{LOAD_ERROR_MESSAGE}</div>"#),
        ListView::Items(todos) => todos.iter().map(render_item).collect(),
    }
}

fn render_item(todo: &Todo) -> String {
    let (item_class, checked) = if todo.completed {
        ("todo-item completed", " checked")
    } else {
        ("todo-item", "")
    };
    let description = match todo.description.as_deref() {
        Some(text) if !text.is_empty() => {
            format!(r#"<div class="todo-description">{}</div>"#, escape_html(text))
        }
        _ => String::new(),
    };

    format!(
        concat!(
            r#"<div class="{item_class}" data-id="{id}">"#,
            r#"<input type="checkbox" class="todo-checkbox" data-id="{id}"{checked} />"#,
            r#"<div class="todo-content">"#,
            r#"<div class="todo-title">{title}</div>"#,
            "{description}",
            r#"<div class="todo-meta">Created: {created} | Updated: {updated}</div>"#,
            "</div>",
            r#"<div class="todo-actions"><button class="delete-btn" data-id="{id}">Delete</button></div>"#,
            "</div>",
        ),
        item_class = item_class,
        id = todo.id,
        checked = checked,
        title = escape_html(&todo.title),
        description = description,
        created = escape_html(&display_timestamp(todo.created_at.as_deref())),
        updated = escape_html(&display_timestamp(todo.updated_at.as_deref())),
    )
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Format a wire timestamp as `dd.mm.yyyy, HH:MM`.
///
/// Accepts ISO-8601 local date-times (seconds and fraction optional) and
/// RFC 3339. Anything else comes back unchanged.
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%d.%m.%Y, %H:%M";

    if let Ok(local) = raw.parse::<NaiveDateTime>() {
        return local.format(DISPLAY).to_string();
    }
    if let Ok(local) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return local.format(DISPLAY).to_string();
    }
    if let Ok(zoned) = DateTime::parse_from_rfc3339(raw) {
        return zoned.naive_local().format(DISPLAY).to_string();
    }
    raw.to_string()
}

fn display_timestamp(raw: Option<&str>) -> String {
    raw.map(format_timestamp).unwrap_or_else(|| "-".to_string())
}
