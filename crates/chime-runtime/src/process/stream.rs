//! Async stream log readers (non-UTF8-safe).
//!
//! Audio tools can emit non-UTF8 bytes on stderr. Using `BufReader::lines()`
//! would terminate the reader task on invalid UTF-8, so lines are read as
//! bytes and decoded lossily before being forwarded to tracing.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;
use tracing::debug;

/// Forward every line of `stream` to `debug!` until EOF.
///
/// The task ends on its own once the child closes the stream (exit or kill).
/// Dropping the returned handle detaches it.
pub fn spawn_stream_reader(
    stream: impl AsyncRead + Unpin + Send + 'static,
    program: String,
    stream_type: &'static str,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut reader = BufReader::new(stream);
        let mut buf: Vec<u8> = Vec::with_capacity(256);

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break, // EOF
                Ok(_) => {
                    // Trim trailing newline(s)
                    if buf.last() == Some(&b'\n') {
                        buf.pop();
                        if buf.last() == Some(&b'\r') {
                            buf.pop();
                        }
                    }

                    let line = String::from_utf8_lossy(&buf);
                    debug!(%program, %stream_type, "{}", line);
                }
                Err(e) => {
                    debug!(%program, %stream_type, error = %e, "stream reader exiting due to read error");
                    break;
                }
            }
        }
    })
}
