use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::config::Config;
use crate::files::error_page;
use crate::files::resolver::{is_within, resolve};
use crate::http::parser::{ParseError, parse_request_line, request_line_text};
use crate::http::request::RequestLine;
use crate::http::response::{Response, StatusCode};
use crate::http::writer::ResponseWriter;
use crate::server::access_log::AccessLog;

/// Drives a single client connection: one request line in, one response out.
pub struct Connection<S> {
    stream: BufReader<S>,
    config: Arc<Config>,
    access_log: Arc<AccessLog>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(String),
    Writing(Response),
    Closed,
}

/// Why a request was turned away before any file was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Request line did not have exactly three tokens, or was too long
    BadRequest,
    /// Method other than GET
    MethodNotAllowed,
    /// Target escapes the root or its extension is not in the MIME table
    Forbidden,
    /// No regular file at the resolved path
    NotFound,
}

impl Rejection {
    pub fn status(&self) -> StatusCode {
        match self {
            Rejection::BadRequest => StatusCode::BadRequest,
            Rejection::MethodNotAllowed => StatusCode::MethodNotAllowed,
            Rejection::Forbidden => StatusCode::Forbidden,
            Rejection::NotFound => StatusCode::NotFound,
        }
    }
}

impl From<ParseError> for Rejection {
    fn from(_: ParseError) -> Self {
        Rejection::BadRequest
    }
}

/// A file that passed every check and may be served.
#[derive(Debug)]
struct Admitted {
    path: PathBuf,
    content_type: String,
}

enum Incoming {
    Line(Vec<u8>),
    Eof,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, config: Arc<Config>, access_log: Arc<AccessLog>) -> Self {
        Self {
            stream: BufReader::new(stream),
            config,
            access_log,
            state: ConnectionState::Reading,
        }
    }

    /// Runs the connection to completion. The stream is dropped when this
    /// returns, whatever the outcome.
    pub async fn run(mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    // A blank line is still a line: it fails the token count
                    // and gets a 400. Only a peer that sends nothing at all
                    // is closed silently.
                    self.state = match self.read_request_line().await? {
                        Incoming::Line(raw) => {
                            match request_line_text(&raw, self.config.max_request_line) {
                                Ok(line) => ConnectionState::Processing(line),
                                Err(e) => {
                                    tracing::warn!(
                                        limit = self.config.max_request_line,
                                        error = ?e,
                                        "Rejecting request line"
                                    );
                                    ConnectionState::Writing(self.reject(e.into()).await)
                                }
                            }
                        }
                        // Client went away without sending anything
                        Incoming::Eof => ConnectionState::Closed,
                    };
                }

                ConnectionState::Processing(line) => {
                    if let Err(e) = self.access_log.record(&line).await {
                        tracing::warn!(error = %e, "Failed to append to request log");
                    }

                    let response = self.respond(&line).await?;
                    tracing::info!(
                        request = %line,
                        status = response.status.as_u16(),
                        bytes = response.content_length(),
                        "Request handled"
                    );
                    self.state = ConnectionState::Writing(response);
                }

                ConnectionState::Writing(response) => {
                    let stream = self.stream.get_mut();
                    ResponseWriter::new(&response)
                        .write_to_stream(stream)
                        .await
                        .context("writing response")?;

                    if let Err(e) = stream.shutdown().await {
                        tracing::debug!(error = %e, "Shutdown after response failed");
                    }
                }

                ConnectionState::Closed => break,
            }
        }

        Ok(())
    }

    async fn read_request_line(&mut self) -> anyhow::Result<Incoming> {
        let limit = self.config.max_request_line as u64;
        let mut raw = Vec::new();

        let n = (&mut self.stream)
            .take(limit + 1)
            .read_until(b'\n', &mut raw)
            .await
            .context("reading request line")?;

        if n == 0 {
            return Ok(Incoming::Eof);
        }

        Ok(Incoming::Line(raw))
    }

    /// Builds the response for one request line.
    ///
    /// Validation failures become error responses. Only I/O errors while
    /// reading an admitted file are returned as `Err`.
    async fn respond(&self, line: &str) -> anyhow::Result<Response> {
        let admitted = match self.admit(line).await {
            Ok(admitted) => admitted,
            Err(rejection) => return Ok(self.reject(rejection).await),
        };

        let contents = tokio::fs::read(&admitted.path)
            .await
            .with_context(|| format!("reading {}", admitted.path.display()))?;

        Ok(Response::binary(StatusCode::Ok, admitted.content_type, contents))
    }

    async fn admit(&self, line: &str) -> Result<Admitted, Rejection> {
        let request = parse_request_line(line).inspect_err(|e| {
            tracing::debug!(request = %line, error = ?e, "Malformed request line");
        })?;

        check_method(&request)?;

        let root = &self.config.root;
        let resolved = resolve(root, &request.target);
        if !resolved.safe {
            tracing::warn!(uri = %request.target, "Path escapes document root");
            return Err(Rejection::Forbidden);
        }

        let content_type = self
            .config
            .mime
            .classify_path(&resolved.path)
            .ok_or(Rejection::Forbidden)?
            .to_string();

        match tokio::fs::metadata(&resolved.path).await {
            Ok(meta) if meta.is_file() => {}
            _ => {
                tracing::info!(path = %resolved.path.display(), "File not found");
                return Err(Rejection::NotFound);
            }
        }

        let canonical = tokio::fs::canonicalize(&resolved.path)
            .await
            .map_err(|_| Rejection::NotFound)?;
        if !is_within(root, &canonical) {
            tracing::warn!(
                path = %resolved.path.display(),
                resolved = %canonical.display(),
                "Symlink leaves document root"
            );
            return Err(Rejection::Forbidden);
        }

        Ok(Admitted {
            path: canonical,
            content_type,
        })
    }

    async fn reject(&self, rejection: Rejection) -> Response {
        let status = rejection.status();
        match rejection {
            Rejection::BadRequest => Response::bad_request(),
            _ => Response::html(
                status,
                error_page::render(&self.config.root, &status.to_string()).await,
            ),
        }
    }
}

fn check_method(request: &RequestLine) -> Result<(), Rejection> {
    if request.method.is_retrieval() {
        Ok(())
    } else {
        tracing::debug!(method = %request.method, "Method not allowed");
        Err(Rejection::MethodNotAllowed)
    }
}
