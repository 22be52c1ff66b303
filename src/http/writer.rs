use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::http::response::WireResponse;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Serializes a wire response into bytes.
///
/// Framing belongs to the writer: Content-Length always comes from the body,
/// and any Content-Length or Transfer-Encoding on the response is dropped.
/// Headers that cannot be written as one line are dropped too.
/// `Connection: close` is added when the connection will not be reused.
pub fn serialize_response(resp: &WireResponse, keep_alive: bool) -> Vec<u8> {
    let mut buf = Vec::with_capacity(128 + resp.body.len());

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status,
        resp.reason
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    for h in &resp.headers {
        if is_framing(&h.name) {
            continue;
        }
        if !h.is_writable() {
            tracing::warn!(header = %h.name.escape_debug(), "Dropping unwritable response header");
            continue;
        }
        write_header(&mut buf, &h.name, &h.value);
    }

    write_header(&mut buf, "Content-Length", &resp.body.len().to_string());

    let has_connection = resp
        .headers
        .iter()
        .any(|h| h.name.eq_ignore_ascii_case("Connection") && h.is_writable());
    if !keep_alive && !has_connection {
        write_header(&mut buf, "Connection", "close");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    // Body
    buf.extend_from_slice(&resp.body);

    buf
}

fn is_framing(name: &str) -> bool {
    name.eq_ignore_ascii_case("Content-Length") || name.eq_ignore_ascii_case("Transfer-Encoding")
}

fn write_header(buf: &mut Vec<u8>, name: &str, value: &str) {
    buf.extend_from_slice(name.as_bytes());
    buf.extend_from_slice(b": ");
    buf.extend_from_slice(value.as_bytes());
    buf.extend_from_slice(b"\r\n");
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &WireResponse, keep_alive: bool) -> Self {
        Self {
            buffer: serialize_response(response, keep_alive),
            written: 0,
        }
    }

    pub async fn write_to_stream(
        &mut self,
        stream: &mut TcpStream,
    ) -> anyhow::Result<()> {
        while self.written < self.buffer.len() {
            let n = stream
                .write(&self.buffer[self.written..])
                .await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
