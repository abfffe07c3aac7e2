//! Prompt watching: automating a single interactive credential entry.
//!
//! A watcher scans a byte stream for a prompt pattern — an unterminated
//! line such as `"Password: "` printed just before a program blocks on
//! input — and answers it once over the program's stdin.

use regex::bytes::Regex;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinHandle;

use crate::error::{Result, ShellProbeError};

/// Read size per iteration. Small enough to react to a prompt that
/// arrives mid-stream without waiting for more output.
const CHUNK_SIZE: usize = 16;

/// Watches a source stream for a prompt and answers it on a sink stream.
///
/// The watcher has no explicit cancel; to abandon a watch, close the
/// underlying stream so the read loop terminates with an error.
pub struct PromptWatcher<R, W> {
    read_from: R,
    write_to: W,
    prompt: Regex,
    response: String,
}

impl<R, W> PromptWatcher<R, W>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    /// Create a watcher that answers `prompt` with `response` + newline.
    pub fn new(read_from: R, write_to: W, prompt: Regex, response: impl Into<String>) -> Self {
        Self {
            read_from,
            write_to,
            prompt,
            response: response.into(),
        }
    }

    /// Start the watch loop on a background task.
    pub fn start(self) -> PromptWatch {
        let handle = tokio::spawn(watch_loop(
            self.read_from,
            self.write_to,
            self.prompt,
            self.response,
        ));

        PromptWatch { handle }
    }
}

/// Handle to a running watch. Terminal in both outcomes: once the prompt
/// has been answered or the stream has failed, the watch is over.
pub struct PromptWatch {
    handle: JoinHandle<std::io::Result<()>>,
}

impl PromptWatch {
    /// Block until the watch reaches a terminal state.
    ///
    /// Returns `Ok(())` when the prompt was matched and answered, or the
    /// stream error when the source failed or closed first.
    pub async fn wait(self) -> Result<()> {
        match self.handle.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(ShellProbeError::Stream(err)),
            Err(join_err) => Err(ShellProbeError::Stream(std::io::Error::other(join_err))),
        }
    }
}

async fn watch_loop<R, W>(
    mut read_from: R,
    mut write_to: W,
    prompt: Regex,
    response: String,
) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line_buffer: Vec<u8> = Vec::new();
    let mut chunk = [0u8; CHUNK_SIZE];

    loop {
        let read = read_from.read(&mut chunk).await?;

        if read == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "stream closed before the prompt matched",
            ));
        }

        line_buffer.extend_from_slice(&chunk[..read]);

        if prompt.is_match(&line_buffer) {
            write_to.write_all(response.as_bytes()).await?;
            write_to.write_all(b"\n").await?;
            write_to.flush().await?;
            return Ok(());
        }

        // The prompt is only expected inside the current unterminated
        // line; completed lines are discarded to bound memory on chatty
        // programs.
        if let Some(idx) = line_buffer.iter().rposition(|&b| b == b'\n') {
            line_buffer.drain(..=idx);
        }
    }
}
