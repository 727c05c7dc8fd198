use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::{Body, Response, StatusCode};

const HTTP_VERSION: &str = "HTTP/1.1";

fn serialize_head(status: StatusCode, content_type: &str, content_length: usize) -> Vec<u8> {
    format!(
        "{} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n\r\n",
        HTTP_VERSION, status, content_type, content_length
    )
    .into_bytes()
}

/// Writes a response whose body is text. `Content-Length` is the UTF-8 byte
/// count of `body`.
pub async fn write_text<W>(
    stream: &mut W,
    status: StatusCode,
    content_type: &str,
    body: &str,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut buf = serialize_head(status, content_type, body.len());
    buf.extend_from_slice(body.as_bytes());

    stream.write_all(&buf).await?;
    stream.flush().await
}

/// Writes a response whose body is raw bytes.
///
/// The head is flushed on its own before any body byte goes out.
pub async fn write_binary<W>(
    stream: &mut W,
    status: StatusCode,
    content_type: &str,
    body: &[u8],
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let head = serialize_head(status, content_type, body.len());
    stream.write_all(&head).await?;
    stream.flush().await?;

    stream.write_all(body).await?;
    stream.flush().await
}

/// Serializes a [`Response`] onto a stream, choosing the text or binary path
/// from its body.
pub struct ResponseWriter<'a> {
    response: &'a Response,
}

impl<'a> ResponseWriter<'a> {
    pub fn new(response: &'a Response) -> Self {
        Self { response }
    }

    pub async fn write_to_stream<W>(&self, stream: &mut W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let resp = self.response;
        match &resp.body {
            Body::Text(text) => write_text(stream, resp.status, &resp.content_type, text).await,
            Body::Binary(bytes) => {
                write_binary(stream, resp.status, &resp.content_type, bytes).await
            }
        }
    }
}
