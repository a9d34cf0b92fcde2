// executor.rs

use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExecutionError {
    /// Endpoint unreachable, or the response body was not the expected shape.
    #[error("{0}")]
    Transport(String),
    /// Non-2xx status. Rendered generically; status detail never leaks.
    #[error("Failed to execute command")]
    ServerRejected,
}

#[derive(Deserialize)]
struct ExecuteResponse {
    // a payload without `output` means "no output", not an error
    #[serde(default)]
    output: String,
}

/// Client for the remote command-execution service.
pub struct Executor {
    endpoint: String,
    client: Client,
}

impl Executor {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One form-encoded POST per call; no retries, no timeout.
    pub fn run(&self, command: &str) -> Result<String, ExecutionError> {
        debug!(command, endpoint = %self.endpoint, "dispatching command");
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("command", command)])
            .send()
            .map_err(|e| ExecutionError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ExecutionError::ServerRejected);
        }
        let payload: ExecuteResponse = response
            .json()
            .map_err(|e| ExecutionError::Transport(e.to_string()))?;
        Ok(payload.output.trim().to_string())
    }
}
