//! Protocol error types

use thiserror::Error;

/// Errors that can occur while encoding requests or classifying inbound frames
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The execution request could not be serialized
    #[error("failed to encode execution request: {0}")]
    Encode(String),

    /// An inbound frame matched neither a job record nor an error envelope
    #[error("cannot recognize command output message: {payload}, reason: {reason}")]
    UnrecognizedFrame {
        /// Escaped and possibly truncated copy of the raw frame
        payload: String,
        /// Last parse failure
        reason: String,
    },
}
