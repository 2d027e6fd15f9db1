//! tokio-tungstenite backed [`Connection`]

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use rp_core::error::TransportError;
use rp_core::traits::{Connection, FrameReader, FrameWriter};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// An open command WebSocket
pub struct WsConnection {
    stream: WsStream,
}

impl WsConnection {
    pub(crate) fn new(stream: WsStream) -> Self {
        Self { stream }
    }
}

impl Connection for WsConnection {
    type Reader = WsReader;
    type Writer = WsWriter;

    fn split(self) -> (WsWriter, WsReader) {
        let (sink, stream) = self.stream.split();
        (WsWriter { sink }, WsReader { stream })
    }
}

/// Inbound half
pub struct WsReader {
    stream: SplitStream<WsStream>,
}

#[async_trait]
impl FrameReader for WsReader {
    async fn read_frame(&mut self) -> Result<Option<Bytes>, TransportError> {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => return Ok(Some(Bytes::from(text))),
                Some(Ok(Message::Binary(data))) => return Ok(Some(Bytes::from(data))),
                Some(Ok(Message::Close(frame))) => {
                    tracing::debug!("server closed the channel: {:?}", frame);
                    return Ok(None);
                }
                // ping, pong and raw frames carry no job data
                Some(Ok(_)) => continue,
                Some(Err(WsError::ConnectionClosed)) | None => return Ok(None),
                Some(Err(e)) => return Err(TransportError::Read(e.to_string())),
            }
        }
    }
}

/// Outbound half
pub struct WsWriter {
    sink: SplitSink<WsStream, Message>,
}

#[async_trait]
impl FrameWriter for WsWriter {
    async fn write_frame(&mut self, frame: Bytes) -> Result<(), TransportError> {
        let text = String::from_utf8(frame.to_vec()).map_err(|e| TransportError::Write(e.to_string()))?;
        self.sink
            .send(Message::Text(text))
            .await
            .map_err(|e| TransportError::Write(e.to_string()))
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        match self.sink.close().await {
            Ok(()) | Err(WsError::ConnectionClosed) | Err(WsError::AlreadyClosed) => Ok(()),
            Err(e) => Err(TransportError::Close(e.to_string())),
        }
    }
}
