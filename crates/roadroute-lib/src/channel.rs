//! Line channels carrying the route protocol.
//!
//! The protocol engine only sees whole lines, timeouts and end of input via
//! the [`Channel`] trait. Two implementations exist:
//!
//! - [`BatchChannel`] reads buffered lines (typically stdin/stdout) and never
//!   times out.
//! - [`LinkChannel`] speaks CRLF-terminated ASCII over a byte stream whose
//!   reads are bounded by a timeout, such as a [`TcpStream`] standing in for
//!   a serial link.

use std::io::{self, BufRead, BufReader, ErrorKind, Write};
use std::net::TcpStream;
use std::time::Duration;

use crate::error::Result;

/// Outcome of waiting for one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// A complete line with its terminator removed.
    Line(String),
    /// The read deadline passed before a full line arrived.
    Timeout,
    /// The peer closed the channel.
    Closed,
}

impl LineEvent {
    /// Convenience constructor used heavily in tests.
    pub fn line(text: impl Into<String>) -> Self {
        LineEvent::Line(text.into())
    }
}

/// Line-oriented transport used by the protocol engine.
pub trait Channel {
    /// Wait for the next line.
    fn read_line(&mut self) -> Result<LineEvent>;

    /// Send `line`; the channel appends its own terminator.
    fn write_line(&mut self, line: &str) -> Result<()>;
}

/// Buffered line channel without timeouts.
pub struct BatchChannel<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> BatchChannel<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Consume the channel, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Channel for BatchChannel<R, W> {
    fn read_line(&mut self) -> Result<LineEvent> {
        let mut buf = String::new();
        if self.reader.read_line(&mut buf)? == 0 {
            return Ok(LineEvent::Closed);
        }
        Ok(LineEvent::Line(trim_terminator(&buf).to_string()))
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// CRLF line channel over a stream whose reads time out.
///
/// A read that fails with [`ErrorKind::WouldBlock`] or
/// [`ErrorKind::TimedOut`] is reported as [`LineEvent::Timeout`]. Bytes of a
/// partially received line are kept and completed by the next read.
pub struct LinkChannel<R, W> {
    reader: R,
    writer: W,
    pending: Vec<u8>,
}

impl<R: BufRead, W: Write> LinkChannel<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            pending: Vec::new(),
        }
    }
}

impl LinkChannel<BufReader<TcpStream>, TcpStream> {
    /// Wrap a connected socket, bounding every read by `read_timeout`.
    pub fn from_tcp(stream: TcpStream, read_timeout: Duration) -> io::Result<Self> {
        stream.set_read_timeout(Some(read_timeout))?;
        let writer = stream.try_clone()?;
        Ok(Self::new(BufReader::new(stream), writer))
    }
}

impl<R: BufRead, W: Write> Channel for LinkChannel<R, W> {
    fn read_line(&mut self) -> Result<LineEvent> {
        match self.reader.read_until(b'\n', &mut self.pending) {
            Ok(0) if self.pending.is_empty() => Ok(LineEvent::Closed),
            Ok(_) if !self.pending.ends_with(b"\n") => {
                // End of stream in the middle of a line; hand over what arrived.
                let line = take_line(&mut self.pending);
                Ok(LineEvent::Line(line))
            }
            Ok(_) => Ok(LineEvent::Line(take_line(&mut self.pending))),
            Err(err) if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                Ok(LineEvent::Timeout)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\r\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

fn take_line(pending: &mut Vec<u8>) -> String {
    let bytes = std::mem::take(pending);
    let text = String::from_utf8_lossy(&bytes);
    trim_terminator(&text).to_string()
}

fn trim_terminator(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}
