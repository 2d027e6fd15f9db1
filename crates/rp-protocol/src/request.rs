//! Outbound execution request
//!
//! One `ExecutionRequest` is serialized per dispatch and written as a single
//! frame. Optional values are omitted from the wire form rather than sent as
//! `null` or empty, since the server treats the presence of `group_ids` as
//! meaningful.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Timeout applied when the caller leaves it unset (or sets it to zero)
pub const DEFAULT_TIMEOUT_SECS: u32 = 30;

/// What the targets should run: a one-line command or a script body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecPayload {
    /// Shell command line
    Command(String),
    /// Script body, already encoded for transport
    Script(String),
}

impl ExecPayload {
    /// Whether this payload carries a script rather than a command
    pub fn is_script(&self) -> bool {
        matches!(self, ExecPayload::Script(_))
    }

    /// The command line or script body
    pub fn body(&self) -> &str {
        match self {
            ExecPayload::Command(body) | ExecPayload::Script(body) => body,
        }
    }
}

/// Command or script execution request sent to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    client_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    group_ids: Option<Vec<String>>,
    #[serde(flatten)]
    payload: ExecPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cwd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    interpreter: Option<String>,
    #[serde(default)]
    is_sudo: bool,
    #[serde(default)]
    execute_concurrently: bool,
    #[serde(default)]
    abort_on_error: bool,
    timeout_sec: u32,
}

impl ExecutionRequest {
    /// Create a request for the given targets with default flags and timeout
    pub fn new(client_ids: Vec<String>, payload: ExecPayload) -> Self {
        Self {
            client_ids,
            group_ids: None,
            payload,
            cwd: None,
            interpreter: None,
            is_sudo: false,
            execute_concurrently: false,
            abort_on_error: false,
            timeout_sec: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Attach client group IDs
    pub fn with_group_ids(mut self, group_ids: Vec<String>) -> Self {
        self.group_ids = Some(group_ids);
        self
    }

    /// Set the working directory on the targets; empty means unset
    pub fn with_cwd(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = non_empty(cwd.into());
        self
    }

    /// Set the interpreter used to run the payload; empty means unset
    pub fn with_interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = non_empty(interpreter.into());
        self
    }

    /// Run with elevated privileges
    pub fn sudo(mut self, is_sudo: bool) -> Self {
        self.is_sudo = is_sudo;
        self
    }

    /// Run on all targets in parallel instead of one after another
    pub fn concurrently(mut self, execute_concurrently: bool) -> Self {
        self.execute_concurrently = execute_concurrently;
        self
    }

    /// Stop the remaining targets once one of them fails
    pub fn abort_on_error(mut self, abort_on_error: bool) -> Self {
        self.abort_on_error = abort_on_error;
        self
    }

    /// Set the advisory server-side timeout; zero falls back to the default
    pub fn with_timeout(mut self, timeout_sec: u32) -> Self {
        self.timeout_sec = if timeout_sec == 0 {
            DEFAULT_TIMEOUT_SECS
        } else {
            timeout_sec
        };
        self
    }

    pub fn client_ids(&self) -> &[String] {
        &self.client_ids
    }

    pub fn group_ids(&self) -> Option<&[String]> {
        self.group_ids.as_deref()
    }

    pub fn payload(&self) -> &ExecPayload {
        &self.payload
    }

    pub fn cwd(&self) -> Option<&str> {
        self.cwd.as_deref()
    }

    pub fn interpreter(&self) -> Option<&str> {
        self.interpreter.as_deref()
    }

    pub fn is_sudo(&self) -> bool {
        self.is_sudo
    }

    pub fn is_concurrent(&self) -> bool {
        self.execute_concurrently
    }

    pub fn aborts_on_error(&self) -> bool {
        self.abort_on_error
    }

    pub fn timeout_sec(&self) -> u32 {
        self.timeout_sec
    }

    /// Serialize into the single outbound frame
    pub fn to_frame(&self) -> Result<Bytes, ProtocolError> {
        serde_json::to_vec(self)
            .map(Bytes::from)
            .map_err(|e| ProtocolError::Encode(e.to_string()))
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
