//! User-facing operations of the todo client.
//!
//! # Design
//! `TodoApp` sequences one user action at a time: build a request, hand it to
//! the host's `Transport`, parse the response, then push the outcome to the
//! host's `Ui`. Failures stop at this layer. Each one becomes a UI signal
//! (inline message, status indicator or alert) plus a `log` record, and no
//! operation returns an error. There are no retries and no timeouts.

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{NewTodo, Stats, Todo};
use crate::view::{BackendStatus, ListView};

pub const TITLE_REQUIRED: &str = "Please enter a title!";
pub const CREATE_FAILED: &str = "Failed to add the todo!";
pub const TOGGLE_FAILED: &str = "Failed to update the todo!";
pub const DELETE_FAILED: &str = "Failed to delete the todo!";
pub const RESET_FAILED: &str = "Failed to reset the statistics!";
pub const DELETE_PROMPT: &str = "Do you really want to delete this todo?";
pub const RESET_PROMPT: &str = "Do you really want to reset the statistics?";

/// Presentation surface supplied by the host.
pub trait Ui {
    fn show_todos(&mut self, view: &ListView);
    fn show_stats(&mut self, stats: &Stats);
    fn show_status(&mut self, status: &BackendStatus);
    fn alert(&mut self, message: &str);
    /// Ask the user to confirm a destructive action.
    fn confirm(&mut self, prompt: &str) -> bool;
    /// Empty the title/description inputs after a successful create.
    fn clear_inputs(&mut self);
}

pub struct TodoApp<T, U> {
    client: TodoClient,
    transport: T,
    ui: U,
}

impl<T: Transport, U: Ui> TodoApp<T, U> {
    pub fn new(client: TodoClient, transport: T, ui: U) -> Self {
        Self { client, transport, ui }
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_parts(self) -> (T, U) {
        (self.transport, self.ui)
    }

    /// Initial page load: list, stats, then backend health.
    pub fn start(&mut self) {
        self.load_todos();
        self.load_stats();
        self.check_health();
    }

    pub fn load_todos(&mut self) {
        let request = self.client.build_list_todos();
        self.show_list(request, TodoClient::parse_list_todos);
    }

    pub fn load_completed(&mut self) {
        let request = self.client.build_list_completed();
        self.show_list(request, TodoClient::parse_list_completed);
    }

    /// Failures keep the previous numbers on screen.
    pub fn load_stats(&mut self) {
        let request = self.client.build_stats();
        match self.call(request, TodoClient::parse_stats) {
            Ok(stats) => self.ui.show_stats(&stats),
            Err(e) => log::error!("loading stats failed: {e}"),
        }
    }

    pub fn check_health(&mut self) {
        let request = self.client.build_health();
        let status = match self.call(request, TodoClient::parse_health) {
            Ok(health) => BackendStatus::Online(health.status),
            Err(e) => {
                log::warn!("health check failed: {e}");
                BackendStatus::Offline
            }
        };
        self.ui.show_status(&status);
    }

    pub fn add_todo(&mut self, title: &str, description: &str) {
        let input = match NewTodo::new(title, description) {
            Ok(input) => input,
            Err(_) => {
                self.ui.alert(TITLE_REQUIRED);
                return;
            }
        };

        let created = self
            .client
            .build_create_todo(&input)
            .and_then(|request| self.call(request, TodoClient::parse_create_todo));
        match created {
            Ok(todo) => {
                log::info!("created todo {}", todo.id);
                self.ui.clear_inputs();
                self.refresh();
            }
            Err(e) => {
                log::error!("adding todo failed: {e}");
                self.ui.alert(CREATE_FAILED);
            }
        }
    }

    /// Read-modify-write: GET the todo, PUT it back with `completed` flipped.
    ///
    /// Not atomic. A change made by someone else between the two calls is
    /// overwritten.
    pub fn toggle_todo(&mut self, id: i64) {
        match self.try_toggle(id) {
            Ok(todo) => {
                log::info!("todo {} completed={}", todo.id, todo.completed);
                self.refresh();
            }
            Err(e) => {
                log::error!("toggling todo {id} failed: {e}");
                self.ui.alert(TOGGLE_FAILED);
            }
        }
    }

    pub fn delete_todo(&mut self, id: i64) {
        if !self.ui.confirm(DELETE_PROMPT) {
            return;
        }
        let request = self.client.build_delete_todo(id);
        match self.call(request, TodoClient::parse_delete_todo) {
            Ok(()) => self.refresh(),
            Err(e) => {
                log::error!("deleting todo {id} failed: {e}");
                self.ui.alert(DELETE_FAILED);
            }
        }
    }

    pub fn reset_stats(&mut self) {
        if !self.ui.confirm(RESET_PROMPT) {
            return;
        }
        let request = self.client.build_reset_stats();
        match self.call(request, TodoClient::parse_reset_stats) {
            Ok(()) => self.load_stats(),
            Err(e) => {
                log::error!("resetting stats failed: {e}");
                self.ui.alert(RESET_FAILED);
            }
        }
    }

    fn try_toggle(&mut self, id: i64) -> Result<Todo, ApiError> {
        let request = self.client.build_get_todo(id);
        let current = self.call(request, TodoClient::parse_get_todo)?;
        let request = self.client.build_update_todo(&current.toggled())?;
        self.call(request, TodoClient::parse_update_todo)
    }

    fn refresh(&mut self) {
        self.load_todos();
        self.load_stats();
    }

    fn show_list(
        &mut self,
        request: HttpRequest,
        parse: fn(&TodoClient, HttpResponse) -> Result<Vec<Todo>, ApiError>,
    ) {
        match self.call(request, parse) {
            Ok(todos) => self.ui.show_todos(&ListView::from_todos(todos)),
            Err(e) => {
                log::error!("loading todos failed: {e}");
                self.ui.show_todos(&ListView::Failed);
            }
        }
    }

    fn call<R>(
        &mut self,
        request: HttpRequest,
        parse: fn(&TodoClient, HttpResponse) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        log::debug!("{} {}", request.method, request.path);
        let response = self.transport.execute(request)?;
        parse(&self.client, response)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::http::HttpMethod;

    const BASE: &str = "http://localhost:8080/api/todos";

    /// Replays canned responses in order and records every request.
    #[derive(Default)]
    struct ScriptedTransport {
        responses: VecDeque<Result<HttpResponse, ApiError>>,
        requests: Vec<HttpRequest>,
    }

    impl ScriptedTransport {
        fn reply(mut self, status: u16, body: &str) -> Self {
            self.responses.push_back(Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            }));
            self
        }

        fn fail(mut self) -> Self {
            self.responses
                .push_back(Err(ApiError::Transport("connection refused".to_string())));
            self
        }

        fn calls(&self) -> Vec<(HttpMethod, String)> {
            self.requests
                .iter()
                .map(|r| (r.method, r.path.trim_start_matches(BASE).to_string()))
                .collect()
        }
    }

    impl Transport for ScriptedTransport {
        fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.push(request);
            self.responses
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".to_string())))
        }
    }

    #[derive(Debug, PartialEq, Eq)]
    enum Event {
        Todos(ListView),
        Stats(Stats),
        Status(BackendStatus),
        Alert(String),
        Confirm(String),
        Cleared,
    }

    struct RecordingUi {
        confirm_answer: bool,
        events: Vec<Event>,
    }

    impl RecordingUi {
        fn answering(confirm_answer: bool) -> Self {
            Self {
                confirm_answer,
                events: Vec::new(),
            }
        }
    }

    impl Ui for RecordingUi {
        fn show_todos(&mut self, view: &ListView) {
            self.events.push(Event::Todos(view.clone()));
        }
        fn show_stats(&mut self, stats: &Stats) {
            self.events.push(Event::Stats(*stats));
        }
        fn show_status(&mut self, status: &BackendStatus) {
            self.events.push(Event::Status(status.clone()));
        }
        fn alert(&mut self, message: &str) {
            self.events.push(Event::Alert(message.to_string()));
        }
        fn confirm(&mut self, prompt: &str) -> bool {
            self.events.push(Event::Confirm(prompt.to_string()));
            self.confirm_answer
        }
        fn clear_inputs(&mut self) {
            self.events.push(Event::Cleared);
        }
    }

    fn app(transport: ScriptedTransport, confirm: bool) -> TodoApp<ScriptedTransport, RecordingUi> {
        TodoApp::new(TodoClient::new(BASE), transport, RecordingUi::answering(confirm))
    }

    const STATS: &str = r#"{"todos_created":1,"todos_updated":0,"todos_deleted":0,"db_reads":2}"#;
    const TODO_5: &str = r#"{"id":5,"title":"Walk","description":"the dog","completed":false,
        "createdAt":"2024-01-15T10:30:00","updatedAt":"2024-01-15T10:30:00"}"#;

    fn stats() -> Stats {
        Stats {
            todos_created: 1,
            todos_updated: 0,
            todos_deleted: 0,
            db_reads: 2,
        }
    }

    #[test]
    fn empty_collection_shows_placeholder() {
        let mut app = app(ScriptedTransport::default().reply(200, "[]"), true);
        app.load_todos();
        assert_eq!(app.ui().events, vec![Event::Todos(ListView::Empty)]);
    }

    #[test]
    fn list_failure_shows_inline_error() {
        let mut app = app(ScriptedTransport::default().reply(200, "{oops"), true);
        app.load_todos();
        assert_eq!(app.ui().events, vec![Event::Todos(ListView::Failed)]);
    }

    #[test]
    fn load_completed_hits_completed_resource() {
        let mut app = app(ScriptedTransport::default().reply(200, &format!("[{TODO_5}]")), true);
        app.load_completed();
        assert_eq!(app.transport().calls(), vec![(HttpMethod::Get, "/completed".to_string())]);
        assert!(matches!(&app.ui().events[0], Event::Todos(ListView::Items(items)) if items[0].id == 5));
    }

    #[test]
    fn health_network_error_shows_offline() {
        let mut app = app(ScriptedTransport::default().fail(), true);
        app.check_health();
        assert_eq!(app.ui().events, vec![Event::Status(BackendStatus::Offline)]);
    }

    #[test]
    fn health_bad_status_or_body_shows_offline() {
        let mut app = app(
            ScriptedTransport::default()
                .reply(503, r#"{"status":"DOWN"}"#)
                .reply(200, "<html>"),
            true,
        );
        app.check_health();
        app.check_health();
        assert_eq!(
            app.ui().events,
            vec![
                Event::Status(BackendStatus::Offline),
                Event::Status(BackendStatus::Offline),
            ]
        );
    }

    #[test]
    fn health_reports_server_status() {
        let mut app = app(
            ScriptedTransport::default().reply(200, r#"{"status":"UP","service":"todo-backend"}"#),
            true,
        );
        app.check_health();
        assert_eq!(app.ui().events, vec![Event::Status(BackendStatus::Online("UP".to_string()))]);
    }

    #[test]
    fn blank_title_alerts_without_network() {
        let mut app = app(ScriptedTransport::default(), true);
        app.add_todo("   ", "desc");
        assert!(app.transport().requests.is_empty());
        assert_eq!(app.ui().events, vec![Event::Alert(TITLE_REQUIRED.to_string())]);
    }

    #[test]
    fn successful_create_clears_inputs_and_refreshes() {
        let transport = ScriptedTransport::default()
            .reply(200, TODO_5)
            .reply(200, &format!("[{TODO_5}]"))
            .reply(200, STATS);
        let mut app = app(transport, true);
        app.add_todo(" Walk ", "the dog");

        assert_eq!(
            app.transport().calls(),
            vec![
                (HttpMethod::Post, String::new()),
                (HttpMethod::Get, String::new()),
                (HttpMethod::Get, "/stats".to_string()),
            ]
        );
        let body: serde_json::Value =
            serde_json::from_str(app.transport().requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"title":"Walk","description":"the dog","completed":false}));

        let events = &app.ui().events;
        assert_eq!(events[0], Event::Cleared);
        assert!(matches!(&events[1], Event::Todos(ListView::Items(items)) if items.len() == 1));
        assert_eq!(events[2], Event::Stats(stats()));
    }

    #[test]
    fn failed_create_alerts_and_keeps_inputs() {
        let mut app = app(ScriptedTransport::default().reply(500, "boom"), true);
        app.add_todo("Walk", "");
        assert_eq!(app.transport().requests.len(), 1);
        assert_eq!(app.ui().events, vec![Event::Alert(CREATE_FAILED.to_string())]);
    }

    #[test]
    fn toggle_reads_then_writes_flipped_copy() {
        let updated = TODO_5.replace(r#""completed":false"#, r#""completed":true"#);
        let transport = ScriptedTransport::default()
            .reply(200, TODO_5)
            .reply(200, &updated)
            .reply(200, &format!("[{updated}]"))
            .reply(200, STATS);
        let mut app = app(transport, true);
        app.toggle_todo(5);

        let calls = app.transport().calls();
        assert_eq!(calls[0], (HttpMethod::Get, "/5".to_string()));
        assert_eq!(calls[1], (HttpMethod::Put, "/5".to_string()));

        let sent: Todo = serde_json::from_str(app.transport().requests[1].body.as_deref().unwrap()).unwrap();
        let fetched: Todo = serde_json::from_str(TODO_5).unwrap();
        assert!(sent.completed);
        assert_eq!(Todo { completed: false, ..sent }, fetched);
        assert_eq!(calls.len(), 4);
    }

    #[test]
    fn toggle_of_missing_todo_alerts_without_put() {
        let mut app = app(ScriptedTransport::default().reply(404, ""), true);
        app.toggle_todo(42);
        assert_eq!(app.transport().calls(), vec![(HttpMethod::Get, "/42".to_string())]);
        assert_eq!(app.ui().events, vec![Event::Alert(TOGGLE_FAILED.to_string())]);
    }

    #[test]
    fn declined_delete_issues_no_request() {
        let mut app = app(ScriptedTransport::default(), false);
        app.delete_todo(5);
        assert!(app.transport().requests.is_empty());
        assert_eq!(app.ui().events, vec![Event::Confirm(DELETE_PROMPT.to_string())]);
    }

    #[test]
    fn confirmed_delete_refreshes_list_and_stats() {
        let transport = ScriptedTransport::default()
            .reply(200, "")
            .reply(200, "[]")
            .reply(200, STATS);
        let mut app = app(transport, true);
        app.delete_todo(5);
        assert_eq!(
            app.transport().calls(),
            vec![
                (HttpMethod::Delete, "/5".to_string()),
                (HttpMethod::Get, String::new()),
                (HttpMethod::Get, "/stats".to_string()),
            ]
        );
        assert_eq!(app.ui().events[1], Event::Todos(ListView::Empty));
    }

    #[test]
    fn failed_delete_alerts() {
        let mut app = app(ScriptedTransport::default().fail(), true);
        app.delete_todo(5);
        assert_eq!(app.ui().events.last(), Some(&Event::Alert(DELETE_FAILED.to_string())));
    }

    #[test]
    fn reset_refreshes_stats_only() {
        let transport = ScriptedTransport::default().reply(200, "").reply(200, "{}");
        let mut app = app(transport, true);
        app.reset_stats();
        assert_eq!(
            app.transport().calls(),
            vec![
                (HttpMethod::Post, "/stats/reset".to_string()),
                (HttpMethod::Get, "/stats".to_string()),
            ]
        );
        assert_eq!(app.ui().events.last(), Some(&Event::Stats(Stats::default())));
    }

    #[test]
    fn declined_reset_issues_no_request() {
        let mut app = app(ScriptedTransport::default(), false);
        app.reset_stats();
        assert!(app.transport().requests.is_empty());
    }

    #[test]
    fn stats_failure_is_silent() {
        let mut app = app(ScriptedTransport::default().fail(), true);
        app.load_stats();
        assert!(app.ui().events.is_empty());
    }

    #[test]
    fn start_loads_list_stats_and_health() {
        let transport = ScriptedTransport::default()
            .reply(200, "[]")
            .reply(200, STATS)
            .reply(200, r#"{"status":"UP"}"#);
        let mut app = app(transport, true);
        app.start();
        let (transport, ui) = app.into_parts();
        assert_eq!(
            transport.calls(),
            vec![
                (HttpMethod::Get, String::new()),
                (HttpMethod::Get, "/stats".to_string()),
                (HttpMethod::Get, "/health".to_string()),
            ]
        );
        assert_eq!(ui.events.len(), 3);
    }
}
