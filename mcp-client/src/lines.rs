//! Line-by-line reading of streaming response bodies.
//!
//! Both protocol streams (handshake and per-call response) are consumed
//! through [`LineReader`], so every read suspension point sits behind the
//! same abstraction and the callers can bound it with a single timeout.

use futures::TryStreamExt;
use std::pin::Pin;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};
use tokio_util::io::StreamReader;

/// Reads a streaming HTTP response body one text line at a time,
/// in arrival order, decoding no more than one line ahead.
pub(crate) struct LineReader {
    lines: Lines<BufReader<Pin<Box<dyn AsyncRead + Send>>>>,
}

impl LineReader {
    pub(crate) fn new(response: reqwest::Response) -> Self {
        let stream = response.bytes_stream().map_err(std::io::Error::other);
        let reader: Pin<Box<dyn AsyncRead + Send>> = Box::pin(StreamReader::new(stream));
        Self {
            lines: BufReader::new(reader).lines(),
        }
    }

    /// Next line, or `None` when the server closes the stream.
    pub(crate) async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        self.lines.next_line().await
    }
}

/// Extract the payload of an SSE `data:` line, stripped of surrounding
/// whitespace. Returns `None` for every other line.
pub(crate) fn data_payload(line: &str) -> Option<&str> {
    line.trim().strip_prefix("data:").map(str::trim)
}
