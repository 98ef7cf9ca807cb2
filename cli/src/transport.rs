//! Blocking HTTP executor for the core's plain-data requests.

use todo_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Transport};

/// Executes requests with ureq, returning 4xx/5xx responses as data so the
/// core decides what a status means.
pub struct UreqTransport {
    agent: ureq::Agent,
    origin: Option<String>,
}

impl UreqTransport {
    pub fn new(origin: Option<String>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent, origin }
    }

    /// Relative paths are resolved against the configured origin.
    fn resolve(&self, path: &str) -> Result<String, ApiError> {
        if !path.starts_with('/') {
            return Ok(path.to_string());
        }
        match &self.origin {
            Some(origin) => Ok(format!("{origin}{path}")),
            None => Err(ApiError::Transport(format!(
                "relative path {path} needs an origin (set TODO_ORIGIN or --origin)"
            ))),
        }
    }
}

impl Transport for UreqTransport {
    fn execute(&mut self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = self.resolve(&req.path)?;
        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => self.agent.get(&url).call(),
            (HttpMethod::Delete, _) => self.agent.delete(&url).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&url).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(&url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(&url).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(HttpResponse { status, headers, body })
    }
}
