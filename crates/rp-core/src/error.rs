//! Core error types for rportcli

use rp_protocol::{ErrorEnvelope, ProtocolError};
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the rportcli libraries
#[derive(Error, Debug)]
pub enum RpError {
    /// Protocol error
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Transport error
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Target resolution error
    #[error("Target resolution error: {0}")]
    Resolve(#[from] ResolveError),

    /// Invalid execution request
    #[error("Invalid request: {0}")]
    Request(#[from] RequestError),

    /// REST API error
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Command execution error
    #[error("Execution error: {0}")]
    Exec(#[from] ExecError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of the persistent command channel
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No token could be obtained for the connection URL
    #[error("failed to obtain access token: {0}")]
    Token(String),

    /// The channel could not be opened
    #[error("failed to connect to {url}: {reason}")]
    Connect { url: String, reason: String },

    /// The request frame could not be written
    #[error("failed to send command: {0}")]
    Write(String),

    /// A frame could not be read (other than end of stream)
    #[error("failed to read command output: {0}")]
    Read(String),

    /// The channel could not be closed cleanly
    #[error("failed to close connection: {0}")]
    Close(String),
}

/// REST API failures
#[derive(Error, Debug)]
pub enum ApiError {
    /// The HTTP request itself failed
    #[error("operation failed with an error: {0}")]
    Request(String),

    /// Non-success status without a decodable error body
    #[error("{message} (status {code})")]
    Status { code: u16, message: String },

    /// Error envelope returned by the server
    #[error("{0}")]
    Server(ErrorEnvelope),

    /// Response body could not be decoded
    #[error("can't parse server response: {0}")]
    Decode(String),

    /// Login succeeded but the server demands a second factor
    #[error("2fa requested via {0}; log in with a 2fa capable client and use the resulting token")]
    SecondFactorRequired(String),
}

/// Failures turning user input into a concrete target list
#[derive(Error, Debug)]
pub enum ResolveError {
    /// None of client ids, names or search were given
    #[error("no client ids, names or search provided")]
    NoTargetSpecified,

    /// A name or search query matched no connected client
    #[error("no connected clients match '{filter}'")]
    NoMatchingTargets { filter: String },

    /// The listing query failed
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// An execution request that must not be sent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Resolution left no client id to target
    #[error("no client ids to run on")]
    NoClientIds,

    /// Neither a command nor a script body was given
    #[error("no command or script to run")]
    EmptyPayload,
}

/// Job renderer failures
#[derive(Error, Debug)]
pub enum RenderError {
    /// Writing to the output failed
    #[error("failed to write job output: {0}")]
    Io(#[from] std::io::Error),

    /// The job could not be serialized
    #[error("failed to serialize job: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Fatal outcomes of a single dispatch
#[derive(Error, Debug)]
pub enum ExecError {
    /// Request encoding or frame classification failed
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The channel failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server reported an error for this dispatch
    #[error("{0}")]
    Server(ErrorEnvelope),

    /// The renderer rejected a job
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// Invalid configuration
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialize error
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(String),
}
