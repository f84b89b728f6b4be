//! In-memory stream standing in for a server connection in unit tests

use crate::proto::Msg;
use prost::Message;
use std::io::{self, Cursor, Read, Write};

/// Byte stream that replays canned server bytes and records what is written
pub struct MockStream {
    input: Cursor<Vec<u8>>,
    written: Vec<u8>,
    fail_writes: bool,
}

impl MockStream {
    /// Serve the given raw bytes to the reader
    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        Self {
            input: Cursor::new(bytes),
            written: Vec::new(),
            fail_writes: false,
        }
    }

    /// Serve one length-prefixed reply frame
    pub fn with_reply(reply: &Msg) -> Self {
        let payload = reply.encode_to_vec();
        let mut bytes = (payload.len() as u32).to_be_bytes().to_vec();
        bytes.extend_from_slice(&payload);
        Self::with_bytes(bytes)
    }

    /// Every write fails with `BrokenPipe`
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::with_bytes(Vec::new())
        }
    }

    /// All bytes written so far
    pub fn written(&self) -> Vec<u8> {
        self.written.clone()
    }
}

impl Read for MockStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.input.read(buf)
    }
}

impl Write for MockStream {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "mock write failure"));
        }
        self.written.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
