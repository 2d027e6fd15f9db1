//! rp-protocol: Wire types for rport command streaming
//!
//! This crate defines the JSON frames exchanged with the rport server over
//! the command WebSocket: the outbound execution request, the inbound job
//! records and error envelopes, and the classifier that tells them apart.

pub mod classify;
pub mod envelope;
pub mod error;
pub mod job;
pub mod request;

pub use classify::{classify, Frame, MAX_DIAGNOSTIC_PAYLOAD};
pub use envelope::{ErrorEnvelope, ServerError};
pub use error::ProtocolError;
pub use job::{JobRecord, JobResult};
pub use request::{ExecPayload, ExecutionRequest, DEFAULT_TIMEOUT_SECS};
