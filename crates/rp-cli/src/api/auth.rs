//! Token providers

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tokio::sync::OnceCell;

use rp_core::error::ApiError;
use rp_core::traits::TokenProvider;

use super::{decode_response, endpoint, http_client, parse_base_url};

/// Login endpoint exchanging basic credentials for a session token
pub const LOGIN_PATH: &str = "/api/v1/login";

/// Delivery method the server reports when a TOTP app must confirm the login
const TOTP_DELIVERY_METHOD: &str = "totp_authenticator_app";

/// Hands out a fixed token, such as a long-lived API token
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self) -> Result<String, ApiError> {
        Ok(self.token.clone())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TwoFactor {
    send_to: String,
    delivery_method: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoginData {
    token: String,
    two_fa: TwoFactor,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    data: LoginData,
}

/// Logs in with user and password, then reuses the session token
pub struct LoginTokenProvider {
    http: reqwest::Client,
    base_url: Url,
    user: String,
    password: String,
    lifetime: Duration,
    token: OnceCell<String>,
}

impl LoginTokenProvider {
    pub fn new(
        api_url: &str,
        user: impl Into<String>,
        password: impl Into<String>,
        lifetime: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            http: http_client(connect_timeout)?,
            base_url: parse_base_url(api_url)?,
            user: user.into(),
            password: password.into(),
            lifetime,
            token: OnceCell::new(),
        })
    }

    async fn login(&self) -> Result<String, ApiError> {
        let url = endpoint(&self.base_url, LOGIN_PATH)?;
        tracing::debug!("logging in as '{}' at {}", self.user, url);

        let response = self
            .http
            .get(url)
            .query(&[("token-lifetime", self.lifetime.as_secs())])
            .basic_auth(&self.user, Some(&self.password))
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let login: LoginResponse = decode_response(response).await?;
        let two_fa = &login.data.two_fa;
        if two_fa.delivery_method == TOTP_DELIVERY_METHOD || !two_fa.send_to.is_empty() {
            return Err(ApiError::SecondFactorRequired(two_fa.delivery_method.clone()));
        }
        if login.data.token.is_empty() {
            return Err(ApiError::Decode("no auth token received from rport".to_string()));
        }

        tracing::info!("logged in as '{}'", self.user);
        Ok(login.data.token)
    }
}

#[async_trait]
impl TokenProvider for LoginTokenProvider {
    async fn get_token(&self) -> Result<String, ApiError> {
        self.token.get_or_try_init(|| self.login()).await.cloned()
    }
}
