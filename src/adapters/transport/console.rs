//! Line-oriented console transport.
//!
//! Each line read is one user message; each outbound message is written
//! followed by a newline and flushed.

use async_trait::async_trait;
use tokio::io::{
    self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines, Stdin,
    Stdout,
};

use crate::ports::{ConversationTransport, TransportError};

/// Transport over any async line reader and writer.
pub struct ConsoleTransport<R, W> {
    lines: Lines<R>,
    writer: W,
}

impl ConsoleTransport<BufReader<Stdin>, Stdout> {
    /// Transport bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R, W> ConsoleTransport<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            lines: reader.lines(),
            writer,
        }
    }

    /// Consumes the transport, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<R, W> ConversationTransport for ConsoleTransport<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn send(&mut self, text: &str) -> Result<(), TransportError> {
        self.writer
            .write_all(text.as_bytes())
            .await
            .map_err(io_error)?;
        self.writer.write_all(b"\n").await.map_err(io_error)?;
        self.writer.flush().await.map_err(io_error)
    }

    async fn receive(&mut self) -> Result<Option<String>, TransportError> {
        self.lines.next_line().await.map_err(io_error)
    }
}

fn io_error(err: std::io::Error) -> TransportError {
    if err.kind() == std::io::ErrorKind::BrokenPipe {
        TransportError::Closed
    } else {
        TransportError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_lines_until_eof() {
        let input: &[u8] = b"Sync\r\n30\n";
        let mut transport = ConsoleTransport::new(input, Vec::new());

        assert_eq!(transport.receive().await.unwrap(), Some("Sync".to_string()));
        assert_eq!(transport.receive().await.unwrap(), Some("30".to_string()));
        assert_eq!(transport.receive().await.unwrap(), None);
    }

    #[tokio::test]
    async fn writes_one_line_per_message() {
        let input: &[u8] = b"";
        let mut transport = ConsoleTransport::new(input, Vec::new());

        transport.send("Hello!").await.unwrap();
        transport.send("Please enter the subject of the meeting.").await.unwrap();

        let written = String::from_utf8(transport.into_writer()).unwrap();
        assert_eq!(written, "Hello!\nPlease enter the subject of the meeting.\n");
    }

    #[test]
    fn broken_pipe_means_closed() {
        let err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        assert_eq!(io_error(err), TransportError::Closed);
    }
}
