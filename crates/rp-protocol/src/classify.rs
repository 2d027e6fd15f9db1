//! Inbound frame classification
//!
//! Job records and error envelopes arrive on the same stream without a type
//! tag. A frame is a job only if it decodes as one *and* carries a non-empty
//! job id; everything else is tried as an error envelope, and a frame that is
//! neither is fatal for the dispatch.

use crate::envelope::ErrorEnvelope;
use crate::error::ProtocolError;
use crate::job::JobRecord;

/// Maximum number of raw bytes quoted in an `UnrecognizedFrame` error
pub const MAX_DIAGNOSTIC_PAYLOAD: usize = 512;

/// A classified inbound frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A finished (or progressing) job
    Job(Box<JobRecord>),
    /// A server-reported failure
    Error(ErrorEnvelope),
}

/// Classify one raw inbound frame
pub fn classify(raw: &[u8]) -> Result<Frame, ProtocolError> {
    match serde_json::from_slice::<JobRecord>(raw) {
        Ok(job) if job.has_id() => return Ok(Frame::Job(Box::new(job))),
        Ok(_) => {
            tracing::debug!(
                "frame has no job id, will try to interpret it as an error: {}",
                diagnostic_payload(raw)
            );
        }
        Err(e) => {
            tracing::debug!(
                "cannot decode frame as a job: {}, will try to interpret it as an error",
                e
            );
        }
    }

    match serde_json::from_slice::<ErrorEnvelope>(raw) {
        Ok(envelope) if !envelope.is_empty() => Ok(Frame::Error(envelope)),
        Ok(_) => Err(ProtocolError::UnrecognizedFrame {
            payload: diagnostic_payload(raw),
            reason: "error envelope carries no errors".to_string(),
        }),
        Err(e) => Err(ProtocolError::UnrecognizedFrame {
            payload: diagnostic_payload(raw),
            reason: e.to_string(),
        }),
    }
}

/// Escaped, length-capped rendering of a raw frame for error messages
fn diagnostic_payload(raw: &[u8]) -> String {
    let cut = raw.len().min(MAX_DIAGNOSTIC_PAYLOAD);
    let mut payload: String = String::from_utf8_lossy(&raw[..cut])
        .escape_debug()
        .collect();
    if raw.len() > cut {
        payload.push_str("...");
    }
    payload
}
