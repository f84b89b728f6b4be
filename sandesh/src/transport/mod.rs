//! Transport layer: how a `Msg` physically reaches the server.
//!
//! Two strategies implement [`Transport`]:
//!
//! - [`StreamTransport`]: TCP, length-prefixed frames, one reply per request
//! - [`DatagramTransport`]: UDP, one datagram per message, no reply
//!
//! The strategy is picked once from the transport name at dial time.

use crate::error::{Error, Result};
use crate::proto::Msg;
use std::fmt;
use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs, UdpSocket};
use std::str::FromStr;
use std::time::Duration;

mod datagram;
#[cfg(test)]
pub(crate) mod mock;
mod stream;

pub use datagram::DatagramTransport;
pub use stream::{MAX_FRAME_LEN, StreamTransport};

/// Transport trait for exchanging messages with the server
pub trait Transport: Send {
    /// Deliver `message`. Returns the server's reply when the transport
    /// has one.
    fn send(&mut self, message: &Msg) -> Result<Option<Msg>>;
}

/// Stream or datagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Stream,
    Datagram,
}

/// Address family restriction carried by `tcp4`, `udp6`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressFamily {
    #[default]
    Any,
    V4,
    V6,
}

impl AddressFamily {
    fn matches(self, addr: &SocketAddr) -> bool {
        match self {
            AddressFamily::Any => true,
            AddressFamily::V4 => addr.is_ipv4(),
            AddressFamily::V6 => addr.is_ipv6(),
        }
    }
}

/// Parsed transport name
///
/// Accepted names: `tcp`, `tcp4`, `tcp6`, `udp`, `udp4`, `udp6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Network {
    kind: TransportKind,
    family: AddressFamily,
}

impl Network {
    pub const TCP: Network = Network::new(TransportKind::Stream, AddressFamily::Any);
    pub const UDP: Network = Network::new(TransportKind::Datagram, AddressFamily::Any);

    pub const fn new(kind: TransportKind, family: AddressFamily) -> Self {
        Self { kind, family }
    }

    pub fn kind(&self) -> TransportKind {
        self.kind
    }

    pub fn family(&self) -> AddressFamily {
        self.family
    }

    /// Only the stream transport ever reads a reply
    pub fn supports_query(&self) -> bool {
        self.kind == TransportKind::Stream
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        let (kind, family) = match name {
            "tcp" => (TransportKind::Stream, AddressFamily::Any),
            "tcp4" => (TransportKind::Stream, AddressFamily::V4),
            "tcp6" => (TransportKind::Stream, AddressFamily::V6),
            "udp" => (TransportKind::Datagram, AddressFamily::Any),
            "udp4" => (TransportKind::Datagram, AddressFamily::V4),
            "udp6" => (TransportKind::Datagram, AddressFamily::V6),
            other => return Err(Error::UnsupportedTransport(other.to_string())),
        };
        Ok(Self::new(kind, family))
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = match self.kind {
            TransportKind::Stream => "tcp",
            TransportKind::Datagram => "udp",
        };
        let suffix = match self.family {
            AddressFamily::Any => "",
            AddressFamily::V4 => "4",
            AddressFamily::V6 => "6",
        };
        write!(f, "{}{}", base, suffix)
    }
}

/// Socket options applied when dialing.
///
/// `None` timeouts mean blocking I/O with no deadline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialOptions {
    /// Stream transport only
    pub connect_timeout: Option<Duration>,
    pub read_timeout: Option<Duration>,
    pub write_timeout: Option<Duration>,
    /// Largest stream frame accepted in either direction (default:
    /// [`MAX_FRAME_LEN`]). Anything from `u32::MAX` up removes the limit.
    pub max_frame_len: usize,
}

impl Default for DialOptions {
    fn default() -> Self {
        Self {
            connect_timeout: None,
            read_timeout: None,
            write_timeout: None,
            max_frame_len: MAX_FRAME_LEN,
        }
    }
}

/// Open a connection and wrap it in the strategy matching `network`
pub fn dial(network: Network, addr: &str, options: &DialOptions) -> Result<Box<dyn Transport>> {
    let candidates = resolve(network.family, addr)?;
    tracing::debug!("Dialing {} {} ({} candidates)", network, addr, candidates.len());

    match network.kind {
        TransportKind::Stream => {
            let stream = connect_stream(&candidates, options.connect_timeout)?;
            stream.set_nodelay(true)?;
            stream.set_read_timeout(options.read_timeout)?;
            stream.set_write_timeout(options.write_timeout)?;
            tracing::debug!("Connected to {:?}", stream.peer_addr());
            Ok(Box::new(
                StreamTransport::new(stream).with_max_frame_len(options.max_frame_len),
            ))
        }
        TransportKind::Datagram => {
            let target = candidates[0];
            let bind_addr = if target.is_ipv4() {
                "0.0.0.0:0"
            } else {
                "[::]:0"
            };
            let socket = UdpSocket::bind(bind_addr)?;
            socket.connect(target)?;
            socket.set_write_timeout(options.write_timeout)?;
            tracing::debug!("UDP socket {:?} -> {}", socket.local_addr(), target);
            Ok(Box::new(DatagramTransport::new(socket)))
        }
    }
}

/// Resolve `addr`, keeping only addresses of the requested family
fn resolve(family: AddressFamily, addr: &str) -> Result<Vec<SocketAddr>> {
    let candidates: Vec<SocketAddr> = addr
        .to_socket_addrs()?
        .filter(|a| family.matches(a))
        .collect();

    if candidates.is_empty() {
        return Err(Error::Connection(io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            format!("no {:?} address found for {}", family, addr),
        )));
    }
    Ok(candidates)
}

/// Try each candidate in order, returning the last failure
fn connect_stream(candidates: &[SocketAddr], timeout: Option<Duration>) -> Result<TcpStream> {
    let mut last_err = None;
    for addr in candidates {
        let attempt = match timeout {
            Some(t) => TcpStream::connect_timeout(addr, t),
            None => TcpStream::connect(addr),
        };
        match attempt {
            Ok(stream) => return Ok(stream),
            Err(e) => last_err = Some(e),
        }
    }
    Err(Error::Connection(last_err.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::AddrNotAvailable, "no address to connect to")
    })))
}
