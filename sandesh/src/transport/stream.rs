//! Stream (TCP) transport
//!
//! # Wire Protocol
//!
//! ```text
//! ┌──────────────────┬──────────────────────────┐
//! │ Length (4 bytes) │ Payload (variable)       │
//! │ Big-endian u32   │ Protobuf Msg             │
//! └──────────────────┴──────────────────────────┘
//! ```
//!
//! The client writes one request frame, then blocks reading exactly one
//! reply frame. There is no pipelining.

use super::Transport;
use crate::error::{Error, Result};
use crate::proto::Msg;
use prost::Message;
use std::io::{Read, Write};
use std::net::TcpStream;

/// Default largest frame accepted in either direction (64MB)
pub const MAX_FRAME_LEN: usize = 64 * 1024 * 1024;

/// Initial capacity for the reply buffer
const INITIAL_BUFFER_CAPACITY: usize = 1024;

/// Length-prefixed request/reply transport over any byte stream
pub struct StreamTransport<S = TcpStream> {
    stream: S,
    /// Reusable buffer for reply payloads
    read_buffer: Vec<u8>,
    max_frame_len: usize,
}

impl<S: Read + Write> StreamTransport<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            read_buffer: Vec::with_capacity(INITIAL_BUFFER_CAPACITY),
            max_frame_len: MAX_FRAME_LEN,
        }
    }

    /// Override the frame size limit.
    ///
    /// Values above `u32::MAX` accept any length the prefix can announce.
    pub fn with_max_frame_len(mut self, max_frame_len: usize) -> Self {
        self.max_frame_len = max_frame_len;
        self
    }

    pub fn max_frame_len(&self) -> usize {
        self.max_frame_len
    }

    /// Borrow the underlying stream
    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    /// Unwrap the underlying stream
    pub fn into_inner(self) -> S {
        self.stream
    }

    fn write_frame(&mut self, message: &Msg) -> Result<()> {
        let payload = message.encode_to_vec();
        let len = frame_len(payload.len(), self.max_frame_len)?;

        tracing::trace!("Writing frame: {} bytes", payload.len());
        self.stream.write_all(&len.to_be_bytes())?;
        self.stream.write_all(&payload)?;
        self.stream.flush()?;
        Ok(())
    }

    fn read_frame(&mut self) -> Result<Msg> {
        let mut len_buf = [0u8; 4];
        self.stream.read_exact(&mut len_buf)?;

        let len = u32::from_be_bytes(len_buf) as usize;
        if len > self.max_frame_len {
            return Err(Error::FrameTooLarge {
                len,
                max: self.max_frame_len,
            });
        }
        tracing::trace!("Reading frame: {} bytes", len);

        self.read_buffer.clear();
        self.read_buffer.resize(len, 0);
        self.stream.read_exact(&mut self.read_buffer)?;

        Ok(Msg::decode(self.read_buffer.as_slice())?)
    }
}

impl<S: Read + Write + Send> Transport for StreamTransport<S> {
    fn send(&mut self, message: &Msg) -> Result<Option<Msg>> {
        self.write_frame(message)?;
        let reply = self.read_frame()?;

        if reply.ok == Some(false) {
            return Err(Error::Server(reply.error.unwrap_or_default()));
        }
        Ok(Some(reply))
    }
}

/// Validate a payload length against the u32 prefix and `max`
fn frame_len(len: usize, max: usize) -> Result<u32> {
    let max = max.min(u32::MAX as usize);
    if len > max {
        return Err(Error::FrameTooLarge { len, max });
    }
    u32::try_from(len).map_err(|_| Error::FrameTooLarge { len, max })
}
