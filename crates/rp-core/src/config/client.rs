//! Client configuration file

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::serde_utils::duration_secs;

/// Server URL used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Persistent settings for talking to an rport server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the rport server API
    pub api_url: String,

    /// User for basic-auth login
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_user: Option<String>,

    /// Password for basic-auth login
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_password: Option<String>,

    /// Long-lived API token; takes precedence over user/password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Lifetime requested for session tokens obtained by login
    #[serde(rename = "token_lifetime_secs", with = "duration_secs")]
    pub token_lifetime: Duration,

    /// Bound on establishing HTTP and WebSocket connections
    #[serde(rename = "connect_timeout_secs", with = "duration_secs")]
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_user: None,
            api_password: None,
            api_token: None,
            token_lifetime: Duration::from_secs(600),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// Overlay non-empty values from another source (env, flags) onto this one
    pub fn overlay(
        mut self,
        api_url: Option<String>,
        api_user: Option<String>,
        api_password: Option<String>,
        api_token: Option<String>,
    ) -> Self {
        if let Some(url) = api_url.filter(|v| !v.is_empty()) {
            self.api_url = url;
        }
        if let Some(user) = api_user.filter(|v| !v.is_empty()) {
            self.api_user = Some(user);
        }
        if let Some(password) = api_password.filter(|v| !v.is_empty()) {
            self.api_password = Some(password);
        }
        if let Some(token) = api_token.filter(|v| !v.is_empty()) {
            self.api_token = Some(token);
        }
        self
    }

    /// Whether a long-lived API token is configured
    pub fn has_api_token(&self) -> bool {
        self.api_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}
