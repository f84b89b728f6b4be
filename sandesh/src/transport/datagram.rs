//! Datagram (UDP) transport
//!
//! One datagram carries one serialized `Msg`. There is no length prefix,
//! the datagram boundary is the frame. Nothing is ever read back, so the
//! server's view of the message is unknown to the client.

use super::Transport;
use crate::error::Result;
use crate::proto::Msg;
use prost::Message;
use std::net::UdpSocket;

/// Fire-and-forget transport over a connected UDP socket
pub struct DatagramTransport {
    socket: UdpSocket,
}

impl DatagramTransport {
    /// Wrap a socket already connected to the server
    pub fn new(socket: UdpSocket) -> Self {
        Self { socket }
    }

    pub fn socket(&self) -> &UdpSocket {
        &self.socket
    }
}

impl Transport for DatagramTransport {
    fn send(&mut self, message: &Msg) -> Result<Option<Msg>> {
        let data = message.encode_to_vec();
        let sent = self.socket.send(&data)?;
        tracing::trace!("Sent datagram: {} of {} bytes", sent, data.len());
        Ok(None)
    }
}
