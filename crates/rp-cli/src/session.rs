//! Authenticated API session

use std::sync::Arc;

use anyhow::{bail, Result};

use rp_core::config::ClientConfig;
use rp_core::traits::TokenProvider;

use crate::api::{ApiClient, LoginTokenProvider, StaticTokenProvider};
use crate::ws::{WsConnector, WsUrlBuilder};

/// REST client and command channel connector sharing one token source
#[derive(Clone)]
pub struct Session {
    pub api: ApiClient,
    pub connector: WsConnector,
}

impl Session {
    /// Pick the token source from the configured credentials
    ///
    /// An API token wins over user and password.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let tokens: Arc<dyn TokenProvider> = if config.has_api_token() {
            tracing::debug!("authenticating with the configured api token");
            Arc::new(StaticTokenProvider::new(
                config.api_token.clone().unwrap_or_default(),
            ))
        } else {
            match (config.api_user.as_deref(), config.api_password.as_deref()) {
                (Some(user), Some(password)) if !user.is_empty() => {
                    Arc::new(LoginTokenProvider::new(
                        &config.api_url,
                        user,
                        password,
                        config.token_lifetime,
                        config.connect_timeout,
                    )?)
                }
                _ => bail!(
                    "no credentials configured: set RPORT_API_TOKEN, or RPORT_API_USER and RPORT_API_PASSWORD"
                ),
            }
        };

        let api = ApiClient::new(&config.api_url, Arc::clone(&tokens), config.connect_timeout)?;
        let connector = WsConnector::new(
            WsUrlBuilder::new(&config.api_url)?,
            tokens,
            config.connect_timeout,
        );

        Ok(Self { api, connector })
    }
}
