//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each endpoint is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Health, NewTodo, Stats, Todo};

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, self.base_url.clone())
    }

    pub fn build_list_completed(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("{}/completed", self.base_url))
    }

    pub fn build_get_todo(&self, id: i64) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("{}/{id}", self.base_url))
    }

    pub fn build_create_todo(&self, input: &NewTodo) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(ApiError::Encode)?;
        Ok(self.json(HttpMethod::Post, self.base_url.clone(), body))
    }

    /// PUT the full todo back. The server overwrites title, description and
    /// completion with whatever is sent; there is no version check.
    pub fn build_update_todo(&self, todo: &Todo) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(todo).map_err(ApiError::Encode)?;
        Ok(self.json(HttpMethod::Put, format!("{}/{}", self.base_url, todo.id), body))
    }

    pub fn build_delete_todo(&self, id: i64) -> HttpRequest {
        self.bare(HttpMethod::Delete, format!("{}/{id}", self.base_url))
    }

    pub fn build_health(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("{}/health", self.base_url))
    }

    pub fn build_stats(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("{}/stats", self.base_url))
    }

    pub fn build_reset_stats(&self) -> HttpRequest {
        self.bare(HttpMethod::Post, format!("{}/stats/reset", self.base_url))
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_json(response)
    }

    pub fn parse_list_completed(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response)
    }

    /// The response body is ignored.
    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_health(&self, response: HttpResponse) -> Result<Health, ApiError> {
        parse_json(response)
    }

    pub fn parse_stats(&self, response: HttpResponse) -> Result<Stats, ApiError> {
        parse_json(response)
    }

    /// The response body is ignored.
    pub fn parse_reset_stats(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn bare(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    fn json(&self, method: HttpMethod, path: String, body: String) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        }
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(ApiError::Decode)
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
