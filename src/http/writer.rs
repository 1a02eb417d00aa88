use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::{Response, ResponseBuilder, StatusCode};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Serializes a response: status line, headers in order, blank line, body.
pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::with_capacity(128 + resp.body.len());

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    // Body
    buf.extend_from_slice(&resp.body);

    buf
}

/// Encodes a complete response in one call.
///
/// When `compress` is set the body is gzipped and `Content-Encoding: gzip`
/// is appended before `Content-Length` is computed from the final bytes.
pub fn encode(
    status: StatusCode,
    headers: &[(&str, &str)],
    body: &[u8],
    compress: bool,
) -> std::io::Result<Vec<u8>> {
    let response = headers
        .iter()
        .fold(ResponseBuilder::new(status), |builder, (k, v)| builder.header(*k, *v))
        .body(body)
        .gzip(compress)
        .build()?;

    Ok(serialize_response(&response))
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
