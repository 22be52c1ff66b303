use std::sync::Arc;

use anyhow::Context;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::sync::oneshot;

use crate::http::parser::{parse_http_request, ParseError};
use crate::http::request::WireRequest;
use crate::http::response::WireResponse;
use crate::http::writer::ResponseWriter;
use crate::server::Handler;

pub struct Connection {
    stream: TcpStream,
    buffer: Vec<u8>,
    state: ConnectionState,
    handler: Arc<dyn Handler>,
}

pub enum ConnectionState {
    Reading,
    Processing(WireRequest),
    Writing(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

impl Connection {
    pub fn new(stream: TcpStream, handler: Arc<dyn Handler>) -> Self {
        Self {
            stream,
            buffer: Vec::with_capacity(4096),
            state: ConnectionState::Reading,
            handler,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);

            self.state = match state {
                ConnectionState::Reading => match self.read_request().await {
                    Ok(Some(req)) => ConnectionState::Processing(req),
                    Ok(None) => ConnectionState::Closed,
                    Err(ReadError::Malformed(e)) => {
                        tracing::debug!(error = ?e, status = e.status(), "Rejecting request");
                        let response = WireResponse::new(e.status(), Vec::new(), Vec::new());
                        ConnectionState::Writing(ResponseWriter::new(&response, false), false)
                    }
                    Err(ReadError::Io(e)) => return Err(e.into()),
                },

                ConnectionState::Processing(req) => {
                    let keep_alive = req.keep_alive();
                    let response = self.dispatch(req).await?;

                    let writer = ResponseWriter::new(&response, keep_alive);
                    ConnectionState::Writing(writer, keep_alive)
                }

                ConnectionState::Writing(mut writer, keep_alive) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    if keep_alive {
                        ConnectionState::Reading // go back for next request
                    } else {
                        ConnectionState::Closed
                    }
                }

                ConnectionState::Closed => break,
            };
        }

        Ok(())
    }

    /// Hands the request to the handler and waits for its single delivery.
    ///
    /// The handler returns immediately; the response arrives later on the
    /// oneshot channel, so this only suspends the current connection task.
    async fn dispatch(&self, req: WireRequest) -> anyhow::Result<WireResponse> {
        let (tx, rx) = oneshot::channel();

        self.handler.handle(
            req,
            Box::new(move |response| {
                // Receiver is gone only if the connection task was dropped.
                let _ = tx.send(response);
            }),
        );

        rx.await.context("handler dropped the request without delivering a response")
    }

    async fn read_request(&mut self) -> Result<Option<WireRequest>, ReadError> {
        loop {
            // Try parsing whatever we already have
            match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    // Remove consumed bytes
                    self.buffer.drain(..consumed);
                    return Ok(Some(request));
                }

                Err(ParseError::Incomplete) => {
                    // Need more data → fall through to read
                }

                Err(e) => return Err(ReadError::Malformed(e)),
            }

            // Read more data
            let mut temp = [0u8; 4096];
            let n = self.stream.read(&mut temp).await.map_err(ReadError::Io)?;

            if n == 0 {
                // Client closed connection
                return Ok(None);
            }

            self.buffer.extend_from_slice(&temp[..n]);
        }
    }
}

enum ReadError {
    Malformed(ParseError),
    Io(std::io::Error),
}
