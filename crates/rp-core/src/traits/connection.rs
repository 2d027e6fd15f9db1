//! Connection traits

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{ApiError, TransportError};

/// Read half of a command channel
#[async_trait]
pub trait FrameReader: Send + 'static {
    /// Read the next frame
    ///
    /// Returns `Ok(None)` once the peer has ended the stream.
    async fn read_frame(&mut self) -> Result<Option<Bytes>, TransportError>;
}

/// Write half of a command channel
#[async_trait]
pub trait FrameWriter: Send {
    /// Send one frame
    async fn write_frame(&mut self, frame: Bytes) -> Result<(), TransportError>;

    /// Close the channel gracefully
    async fn close(&mut self) -> Result<(), TransportError>;
}

/// An open, authenticated, bidirectional frame channel
pub trait Connection: Send {
    /// Read half, moved into the reader task
    type Reader: FrameReader;
    /// Write half, kept by the dispatching task
    type Writer: FrameWriter;

    /// Split into independently owned halves
    fn split(self) -> (Self::Writer, Self::Reader);
}

/// Source of the bearer credential used when opening a connection
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Obtain a token; called once per connection attempt
    async fn get_token(&self) -> Result<String, ApiError>;
}
