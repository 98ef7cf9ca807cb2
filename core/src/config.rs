//! Base-URL resolution and client settings.
//!
//! The base URL is the only environment-sensitive input: a local
//! development host talks to the backend on its own port, any other host
//! goes through a relative path on the same origin.

use std::time::Duration;

use crate::client::TodoClient;

/// Backend address used when running on a development machine.
pub const LOCAL_API_URL: &str = "http://localhost:8080/api/todos";

/// Collection path used behind a reverse proxy.
pub const API_PATH: &str = "/api/todos";

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

pub fn resolve_base_url(hostname: &str) -> &'static str {
    match hostname {
        "localhost" | "127.0.0.1" => LOCAL_API_URL,
        _ => API_PATH,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Origin a relative `base_url` is resolved against, e.g.
    /// `https://todo.example.com`.
    pub origin: Option<String>,
    pub poll_interval: Duration,
}

impl ClientConfig {
    pub fn for_host(hostname: &str) -> Self {
        Self {
            base_url: resolve_base_url(hostname).to_string(),
            origin: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Read `TODO_HOST`, `TODO_ORIGIN`, `TODO_API_URL` and `TODO_POLL_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("TODO_HOST").unwrap_or_else(|| "localhost".to_string());
        let mut config = Self::for_host(&host);

        if let Some(origin) = lookup("TODO_ORIGIN") {
            config = config.with_origin(&origin);
        }
        if let Some(url) = lookup("TODO_API_URL") {
            config = config.with_api_url(&url);
        }
        if let Some(raw) = lookup("TODO_POLL_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.poll_interval = Duration::from_secs(secs),
                _ => log::warn!("ignoring TODO_POLL_SECS={raw:?}, keeping {:?}", config.poll_interval),
            }
        }
        config
    }

    pub fn with_origin(mut self, origin: &str) -> Self {
        self.origin = Some(origin.trim_end_matches('/').to_string());
        self
    }

    pub fn with_api_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn client(&self) -> TodoClient {
        TodoClient::new(&self.base_url)
    }
}
