//! REST client for the rport server API
//!
//! Only the calls the CLI needs live here: the paginated client listing
//! (behind [`ListingClient`]) and the login exchange used by
//! [`LoginTokenProvider`].

mod auth;

pub use auth::{LoginTokenProvider, StaticTokenProvider, LOGIN_PATH};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use rp_core::error::ApiError;
use rp_core::traits::{ListingClient, TokenProvider};
use rp_core::types::{ClientsPage, Filters, Pagination};
use rp_protocol::ErrorEnvelope;

/// Clients listing endpoint
pub const CLIENTS_PATH: &str = "/api/v1/clients";

/// Fields requested from the listing endpoint
const CLIENT_FIELDS: &str = "id,name,connection_state,disconnected_at,hostname,os_kernel";

/// Authenticated REST client
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClient {
    pub fn new(
        api_url: &str,
        tokens: Arc<dyn TokenProvider>,
        connect_timeout: Duration,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            http: http_client(connect_timeout)?,
            base_url: parse_base_url(api_url)?,
            tokens,
        })
    }
}

#[async_trait]
impl ListingClient for ApiClient {
    async fn list_clients(
        &self,
        pagination: Pagination,
        filters: Filters,
    ) -> Result<ClientsPage, ApiError> {
        let url = endpoint(&self.base_url, CLIENTS_PATH)?;

        let mut query = vec![("fields[clients]".to_string(), CLIENT_FIELDS.to_string())];
        for (field, value) in filters.iter() {
            query.push((format!("filter[{}]", field), value.to_string()));
        }
        query.push(("page[limit]".to_string(), pagination.limit.to_string()));
        query.push(("page[offset]".to_string(), pagination.offset.to_string()));

        let token = self.tokens.get_token().await?;

        tracing::debug!("GET {} filters [{}]", url, filters);
        let response = self
            .http
            .get(url)
            .query(&query)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        decode_response(response).await
    }
}

pub(crate) fn http_client(connect_timeout: Duration) -> Result<reqwest::Client, ApiError> {
    reqwest::Client::builder()
        .connect_timeout(connect_timeout)
        .build()
        .map_err(|e| ApiError::Request(e.to_string()))
}

pub(crate) fn parse_base_url(api_url: &str) -> Result<Url, ApiError> {
    Url::parse(api_url).map_err(|e| ApiError::Request(format!("invalid api url '{}': {}", api_url, e)))
}

/// Resolve an API path below the base URL, keeping any base path prefix
pub(crate) fn endpoint(base_url: &Url, path: &str) -> Result<Url, ApiError> {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let dir = format!("{}/", base.path());
        base.set_path(&dir);
    }
    base.join(path.trim_start_matches('/'))
        .map_err(|e| ApiError::Request(format!("invalid endpoint '{}': {}", path, e)))
}

/// Decode a success body, or turn a failure status into an [`ApiError`]
///
/// Failure bodies are decoded as an error envelope when possible; otherwise
/// the status code alone decides the message.
pub(crate) async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;

    if !status.is_success() {
        return match serde_json::from_slice::<ErrorEnvelope>(&body) {
            Ok(envelope) if !envelope.is_empty() => Err(ApiError::Server(envelope)),
            _ => {
                tracing::warn!(
                    "cannot decode error response '{}'",
                    String::from_utf8_lossy(&body)
                );
                Err(status_error(status))
            }
        };
    }

    tracing::debug!("got response status {}", status);
    serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn status_error(status: StatusCode) -> ApiError {
    let message = match status {
        StatusCode::NOT_FOUND => "the specified item doesn't exist".to_string(),
        StatusCode::BAD_REQUEST => "invalid input provided".to_string(),
        StatusCode::INTERNAL_SERVER_ERROR => "operation failed".to_string(),
        other => format!(
            "unknown error: {}",
            other.canonical_reason().unwrap_or("unexpected status")
        ),
    };
    ApiError::Status {
        code: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        assert_eq!(
            status_error(StatusCode::NOT_FOUND).to_string(),
            "the specified item doesn't exist (status 404)"
        );
        assert_eq!(
            status_error(StatusCode::BAD_REQUEST).to_string(),
            "invalid input provided (status 400)"
        );
        assert_eq!(
            status_error(StatusCode::INTERNAL_SERVER_ERROR).to_string(),
            "operation failed (status 500)"
        );
        assert_eq!(
            status_error(StatusCode::IM_A_TEAPOT).to_string(),
            "unknown error: I'm a teapot (status 418)"
        );
    }

    #[test]
    fn test_endpoint_below_base() {
        let base = parse_base_url("https://rport.example.com:3000").unwrap();
        let url = endpoint(&base, CLIENTS_PATH).unwrap();
        assert_eq!(url.as_str(), "https://rport.example.com:3000/api/v1/clients");

        let base = parse_base_url("https://example.com/rport").unwrap();
        let url = endpoint(&base, LOGIN_PATH).unwrap();
        assert_eq!(url.as_str(), "https://example.com/rport/api/v1/login");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = parse_base_url("not a url").unwrap_err();
        assert!(err.to_string().contains("invalid api url 'not a url'"));
    }
}
