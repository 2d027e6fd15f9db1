//! WebSocket command channel
//!
//! Commands and scripts are streamed over a WebSocket opened against the API
//! server. The bearer token travels as the `access_token` query parameter.

mod connection;

pub use connection::{WsConnection, WsReader, WsWriter};

use std::sync::Arc;
use std::time::Duration;

use tokio_tungstenite::connect_async;
use url::Url;

use rp_core::error::TransportError;
use rp_core::traits::TokenProvider;

/// Endpoint for plain commands
pub const COMMANDS_WS_PATH: &str = "/api/v1/ws/commands";

/// Endpoint for base64 encoded scripts
pub const SCRIPTS_WS_PATH: &str = "/api/v1/ws/scripts";

/// Query parameter carrying the bearer token
const ACCESS_TOKEN_PARAM: &str = "access_token";

/// Derives WebSocket URLs from the REST base URL
#[derive(Debug, Clone)]
pub struct WsUrlBuilder {
    base: Url,
}

impl WsUrlBuilder {
    pub fn new(api_url: &str) -> Result<Self, TransportError> {
        let base = Url::parse(api_url).map_err(|e| TransportError::Connect {
            url: api_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { base })
    }

    /// Build the URL for `path` below the base path, authenticated with `token`
    pub fn build(&self, path: &str, token: &str) -> Result<Url, TransportError> {
        let mut base = self.base.clone();
        if !base.path().ends_with('/') {
            let dir = format!("{}/", base.path());
            base.set_path(&dir);
        }
        let mut url = base
            .join(path.trim_start_matches('/'))
            .map_err(|e| TransportError::Connect {
                url: self.base.to_string(),
                reason: format!("invalid endpoint '{}': {}", path, e),
            })?;

        let scheme = match url.scheme() {
            "http" | "ws" => "ws",
            "https" | "wss" => "wss",
            other => {
                return Err(TransportError::Connect {
                    url: self.base.to_string(),
                    reason: format!("unsupported scheme '{}'", other),
                })
            }
        };
        url.set_scheme(scheme).map_err(|()| TransportError::Connect {
            url: self.base.to_string(),
            reason: format!("cannot switch to scheme '{}'", scheme),
        })?;

        url.set_query(None);
        url.query_pairs_mut().append_pair(ACCESS_TOKEN_PARAM, token);
        Ok(url)
    }
}

/// Opens authenticated command channels
#[derive(Clone)]
pub struct WsConnector {
    urls: WsUrlBuilder,
    tokens: Arc<dyn TokenProvider>,
    connect_timeout: Duration,
}

impl WsConnector {
    pub fn new(urls: WsUrlBuilder, tokens: Arc<dyn TokenProvider>, connect_timeout: Duration) -> Self {
        Self {
            urls,
            tokens,
            connect_timeout,
        }
    }

    /// Fetch a token and open a channel on `path`
    pub async fn connect(&self, path: &str) -> Result<WsConnection, TransportError> {
        let token = self
            .tokens
            .get_token()
            .await
            .map_err(|e| TransportError::Token(e.to_string()))?;

        let url = self.urls.build(path, &token)?;
        let display_url = redact(&url);
        tracing::debug!("connecting to {}", display_url);

        let connect = tokio::time::timeout(self.connect_timeout, connect_async(url.as_str()));
        let (stream, _response) = match connect.await {
            Ok(Ok(value)) => value,
            Ok(Err(e)) => {
                return Err(TransportError::Connect {
                    url: display_url,
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                return Err(TransportError::Connect {
                    url: display_url,
                    reason: format!("timed out after {}s", self.connect_timeout.as_secs()),
                })
            }
        };

        tracing::info!("connected to {}", display_url);
        Ok(WsConnection::new(stream))
    }
}

/// URL without its query, safe to log
fn redact(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}
