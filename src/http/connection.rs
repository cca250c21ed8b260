use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::http::outcome::{classify, Outcome};
use crate::http::parser::{self, ParseError, RequestLine};
use crate::http::request::{Method, Request};
use crate::http::response::{render, ResponseContext, StatusCode};
use crate::http::writer::ResponseWriter;
use crate::server::clock::{http_now, ServerClock};

/// State shared by every connection of one server.
#[derive(Debug)]
pub struct ServerContext {
    /// The one path that is served
    pub resource_path: String,
    pub server_name: String,
    pub clock: Arc<ServerClock>,
}

impl ServerContext {
    pub fn new(cfg: &Config, clock: Arc<ServerClock>) -> Self {
        Self {
            resource_path: cfg.resource.path.clone(),
            server_name: cfg.server.name.clone(),
            clock,
        }
    }
}

/// A single-request connection.
///
/// `run` takes the connection by value: after it returns the stream has been
/// shut down and dropped.
pub struct Connection<S> {
    stream: BufReader<S>,
    ctx: Arc<ServerContext>,
    local_addr: Option<SocketAddr>,
    state: ConnectionState,
}

pub enum ConnectionState {
    AwaitingRequestLine,
    ParsingHeaders(RequestLine),
    Classifying(Request),
    BuildingResponse(Outcome, Option<Method>),
    Writing(ResponseWriter, StatusCode),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, ctx: Arc<ServerContext>, local_addr: Option<SocketAddr>) -> Self {
        Self {
            stream: BufReader::new(stream),
            ctx,
            local_addr,
            state: ConnectionState::AwaitingRequestLine,
        }
    }

    /// Handles one request to completion and closes the connection.
    ///
    /// Every read or parse failure is answered with a response. The only
    /// error returned is a failed write, and the stream is closed by then.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut result = Ok(());

        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);

            self.state = match state {
                ConnectionState::AwaitingRequestLine => {
                    match parser::read_request_line(&mut self.stream).await {
                        Ok(line) => ConnectionState::ParsingHeaders(line),
                        Err(e) => Self::parse_failed(e),
                    }
                }

                ConnectionState::ParsingHeaders(line) => {
                    match parser::read_headers(&mut self.stream).await {
                        Ok(headers) => ConnectionState::Classifying(Request {
                            method: line.method,
                            path: line.path,
                            version: line.version,
                            headers,
                        }),
                        Err(e) => Self::parse_failed(e),
                    }
                }

                ConnectionState::Classifying(req) => {
                    let last_modified = self.ctx.clock.last_modified();
                    let outcome = classify(&req, &self.ctx.resource_path, last_modified.as_deref());
                    debug!(
                        method = %req.method,
                        path = %req.path,
                        version = %req.version,
                        ?outcome,
                        "Request classified"
                    );
                    ConnectionState::BuildingResponse(outcome, req.supported_method())
                }

                ConnectionState::BuildingResponse(outcome, method) => {
                    let ctx = ResponseContext {
                        now: http_now(),
                        last_modified: self.ctx.clock.last_modified(),
                        method,
                        server_name: self.ctx.server_name.clone(),
                        local_addr: self.local_addr,
                    };
                    let response = render(outcome, &ctx);
                    ConnectionState::Writing(ResponseWriter::new(&response), response.status)
                }

                ConnectionState::Writing(mut writer, status) => {
                    result = writer
                        .write_to_stream(&mut self.stream)
                        .await
                        .context("failed to write response");

                    if result.is_ok() {
                        info!(status = status.as_u16(), bytes = writer.len(), "Response sent");
                    }
                    ConnectionState::Closed
                }

                ConnectionState::Closed => break,
            };
        }

        if let Err(e) = self.stream.shutdown().await {
            debug!(error = %e, "Shutdown after response failed");
        }

        result
    }

    fn parse_failed(e: ParseError) -> ConnectionState {
        if e.is_malformed() {
            warn!(error = %e, "Malformed request");
            ConnectionState::BuildingResponse(Outcome::Malformed, None)
        } else {
            error!(error = %e, "Failed to read request");
            ConnectionState::BuildingResponse(Outcome::InternalError, None)
        }
    }
}
