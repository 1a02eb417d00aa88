use std::sync::Arc;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::time::{Instant, timeout_at};

use crate::config::Config;
use crate::handlers::Service;
use crate::http::parser::expected_len;
use crate::http::writer::ResponseWriter;

const READ_CHUNK: usize = 1024;

/// One client connection: one request, one response, then close.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    service: Arc<Service>,
    max_request_bytes: usize,
    read_timeout: Option<Duration>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Bytes),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, service: Arc<Service>, config: &Config) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(config.max_request_bytes),
            service,
            max_request_bytes: config.max_request_bytes,
            read_timeout: config.read_timeout,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    if self.read_request().await? {
                        let raw = self.buffer.split().freeze();
                        self.state = ConnectionState::Processing(raw);
                    } else {
                        // Client closed without sending anything
                        self.state = ConnectionState::Closed;
                    }
                }

                ConnectionState::Processing(raw) => {
                    let response = self.service.respond(&raw[..]).await;
                    tracing::debug!(status = response.status.as_u16(), "Response ready");

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(writer) => {
                    if let Err(e) = writer.write_to_stream(&mut self.stream).await {
                        tracing::warn!(error = %e, "Failed to send response");
                    }
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Buffers the request until it is complete or no more can be read.
    ///
    /// Reading stops once the header block and the declared body are in,
    /// when the buffer reaches `max_request_bytes` (the body is then
    /// truncated), on EOF, or when the read deadline passes. Returns
    /// whether any bytes were received.
    pub async fn read_request(&mut self) -> anyhow::Result<bool> {
        let deadline = self.read_timeout.map(|t| Instant::now() + t);
        let mut temp = [0u8; READ_CHUNK];

        loop {
            if let Some(total) = expected_len(&self.buffer) {
                if self.buffer.len() >= total {
                    return Ok(true);
                }
            }

            if self.buffer.len() >= self.max_request_bytes {
                tracing::debug!(limit = self.max_request_bytes, "Request buffer full");
                return Ok(true);
            }

            let room = (self.max_request_bytes - self.buffer.len()).min(READ_CHUNK);
            let read = self.stream.read(&mut temp[..room]);

            let n = match deadline {
                Some(deadline) => match timeout_at(deadline, read).await {
                    Ok(res) => res?,
                    Err(_) => {
                        tracing::warn!(buffered = self.buffer.len(), "Timed out reading request");
                        return Ok(!self.buffer.is_empty());
                    }
                },
                None => read.await?,
            };

            if n == 0 {
                return Ok(!self.buffer.is_empty());
            }

            self.buffer.extend_from_slice(&temp[..n]);
        }
    }
}
