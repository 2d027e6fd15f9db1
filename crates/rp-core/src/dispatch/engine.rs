//! Dispatch-and-stream engine
//!
//! Sends one execution request over a connection and streams the results
//! back. Two tasks are involved per dispatch:
//!
//! - a reader task that pumps raw frames from the connection into a channel
//!   of capacity one, ending the channel on end of stream or after forwarding
//!   a read error
//! - the calling task, which waits on that channel and on the interrupt token,
//!   classifies each frame and hands jobs to the renderer in arrival order
//!
//! The connection is closed exactly once when `execute` returns, whichever
//! way it returns.

use bytes::Bytes;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use rp_protocol::{classify, ExecutionRequest, Frame};

use crate::error::{ExecError, TransportError};
use crate::traits::{Connection, FrameReader, FrameWriter, JobRenderer};

/// Frames buffered between the reader task and the event loop
const FRAME_CHANNEL_CAPACITY: usize = 1;

const WAITING_MSG: &str = "waiting for the command to finish";

/// How a successful dispatch ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The server ended the stream
    Completed { jobs: usize },
    /// The user interrupted the stream
    Interrupted { jobs: usize },
}

impl DispatchOutcome {
    /// Number of jobs rendered before the dispatch ended
    pub fn jobs(&self) -> usize {
        match self {
            DispatchOutcome::Completed { jobs } | DispatchOutcome::Interrupted { jobs } => *jobs,
        }
    }
}

/// Runs one request per connection and renders the resulting jobs
pub struct Dispatcher<R> {
    renderer: R,
}

impl<R: JobRenderer> Dispatcher<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Send `request` over `connection` and stream back its jobs
    ///
    /// Returns once the stream ends, a fatal error occurs, or `interrupt` is
    /// cancelled. An interrupt is a successful outcome, not an error.
    pub async fn execute<C: Connection>(
        &mut self,
        connection: C,
        request: &ExecutionRequest,
        interrupt: &CancellationToken,
    ) -> Result<DispatchOutcome, ExecError> {
        let (mut writer, reader) = connection.split();

        let result = self.dispatch(&mut writer, reader, request, interrupt).await;

        if let Err(e) = writer.close().await {
            tracing::warn!("{}", e);
        }

        result
    }

    async fn dispatch<W: FrameWriter, F: FrameReader>(
        &mut self,
        writer: &mut W,
        reader: F,
        request: &ExecutionRequest,
        interrupt: &CancellationToken,
    ) -> Result<DispatchOutcome, ExecError> {
        let frame = request.to_frame()?;
        tracing::debug!("will send {}", String::from_utf8_lossy(&frame));
        writer.write_frame(frame).await?;

        let (frame_tx, mut frame_rx) = mpsc::channel(FRAME_CHANNEL_CAPACITY);
        let _reader_task = ReaderTask::spawn(reader, frame_tx);

        let mut jobs = 0;
        loop {
            tokio::select! {
                _ = interrupt.cancelled() => {
                    tracing::info!("interrupted, stopping after {} job(s)", jobs);
                    return Ok(DispatchOutcome::Interrupted { jobs });
                }
                event = frame_rx.recv() => match event {
                    Some(Ok(raw)) => {
                        self.process_frame(&raw)?;
                        jobs += 1;
                        tracing::debug!("{}", WAITING_MSG);
                    }
                    Some(Err(e)) => return Err(e.into()),
                    None => {
                        tracing::debug!("command stream ended after {} job(s)", jobs);
                        return Ok(DispatchOutcome::Completed { jobs });
                    }
                },
            }
        }
    }

    fn process_frame(&mut self, raw: &[u8]) -> Result<(), ExecError> {
        match classify(raw)? {
            Frame::Job(job) => {
                tracing::debug!("received message: '{}'", String::from_utf8_lossy(raw));
                self.renderer.render_job(&job)?;
                Ok(())
            }
            Frame::Error(envelope) => Err(ExecError::Server(envelope)),
        }
    }
}

/// Reader task handle; aborts the task when dropped
struct ReaderTask(JoinHandle<()>);

impl ReaderTask {
    fn spawn<F: FrameReader>(
        reader: F,
        frames: mpsc::Sender<Result<Bytes, TransportError>>,
    ) -> Self {
        Self(tokio::spawn(pump_frames(reader, frames)))
    }
}

impl Drop for ReaderTask {
    fn drop(&mut self) {
        self.0.abort();
    }
}

async fn pump_frames<F: FrameReader>(
    mut reader: F,
    frames: mpsc::Sender<Result<Bytes, TransportError>>,
) {
    loop {
        match reader.read_frame().await {
            Ok(Some(frame)) => {
                if frames.send(Ok(frame)).await.is_err() {
                    return;
                }
            }
            Ok(None) => return,
            Err(e) => {
                let _ = frames.send(Err(e)).await;
                return;
            }
        }
    }
}
