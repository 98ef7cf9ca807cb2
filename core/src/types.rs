//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the backend's JSON schema but are defined independently
//! of the mock-server crate; integration tests catch schema drift between the
//! two. Timestamps stay opaque strings: the client only formats them for
//! display and must echo them back unchanged on a full-object PUT.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub completed: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Todo {
    /// Copy of this todo with `completed` flipped and every other field kept.
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl NewTodo {
    /// Trim the form inputs and reject a blank title.
    ///
    /// This is only a client-side guard; the server stays authoritative.
    pub fn new(title: &str, description: &str) -> Result<Self, ApiError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ApiError::InvalidInput("title must not be empty".to_string()));
        }
        Ok(Self {
            title: title.to_string(),
            description: description.trim().to_string(),
            completed: false,
        })
    }
}

/// Operation counters reported by `/stats`. Absent keys read as zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    #[serde(default, deserialize_with = "counter")]
    pub todos_created: u64,
    #[serde(default, deserialize_with = "counter")]
    pub todos_updated: u64,
    #[serde(default, deserialize_with = "counter")]
    pub todos_deleted: u64,
    #[serde(default, deserialize_with = "counter")]
    pub db_reads: u64,
}

/// Body of `/health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

/// Counters may arrive as numbers, numeric strings, or `null`.
fn counter<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// A boxed boolean on the backend may be `null`; treat that as unset.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}
