//! Riemann client session.
//!
//! A [`Client`] owns one connection and the transport strategy picked for it
//! at dial time. Every operation holds the connection lock for its whole
//! request/reply exchange, so concurrent callers are served one at a time
//! and frames never interleave on the wire.
//!
//! # Example
//!
//! ```no_run
//! use sandesh::{Client, Event};
//!
//! let client = Client::dial("tcp", "127.0.0.1:5555")?;
//!
//! let mut event = Event::new("api latency");
//! event.host = "web-01".to_string();
//! event.double = 12.5;
//! client.send(&event)?;
//!
//! for event in client.query("service = \"api latency\"")? {
//!     println!("{} {}", event.host, event.double);
//! }
//! client.close();
//! # Ok::<(), sandesh::Error>(())
//! ```

use crate::codec;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::event::Event;
use crate::proto::Msg;
use crate::transport::{self, DialOptions, Network, Transport, TransportKind};
use std::io;
use std::sync::{Mutex, MutexGuard};

/// Connection to a Riemann server
pub struct Client {
    network: Network,
    /// `None` once closed
    transport: Mutex<Option<Box<dyn Transport>>>,
}

impl Client {
    /// Connect using a transport name (`tcp`, `udp`, ...) and `host:port`.
    ///
    /// An unknown transport name fails before any connection attempt.
    pub fn dial(network: &str, addr: &str) -> Result<Self> {
        let network: Network = network.parse()?;
        Self::dial_with(network, addr, &DialOptions::default())
    }

    /// Connect with explicit socket options
    pub fn dial_with(network: Network, addr: &str, options: &DialOptions) -> Result<Self> {
        let transport = transport::dial(network, addr, options)?;
        Ok(Self::with_transport(network, transport))
    }

    /// Connect using a loaded configuration
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let network = config.network()?;
        Self::dial_with(network, &config.address(), &config.dial_options())
    }

    /// Build a session around an already open transport
    pub fn with_transport(network: Network, transport: Box<dyn Transport>) -> Self {
        Self {
            network,
            transport: Mutex::new(Some(transport)),
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn is_closed(&self) -> bool {
        self.lock().is_none()
    }

    /// Send one event
    pub fn send(&self, event: &Event) -> Result<()> {
        let message = Msg::with_events(vec![codec::encode(event)]);
        self.exchange(&message).map(|_| ())
    }

    /// Send several events in a single message
    pub fn send_all(&self, events: &[Event]) -> Result<()> {
        let message = Msg::with_events(codec::encode_all(events));
        self.exchange(&message).map(|_| ())
    }

    /// Run a query and return the matching events.
    ///
    /// Fails with [`Error::UnsupportedOperation`] on a datagram transport,
    /// which never reads a reply.
    ///
    /// A reply larger than [`DialOptions::max_frame_len`] (64MB unless
    /// raised) fails with [`Error::FrameTooLarge`] and closes the session.
    pub fn query(&self, query: &str) -> Result<Vec<Event>> {
        if !self.network.supports_query() {
            return Err(Error::UnsupportedOperation("querying over UDP"));
        }

        let message = Msg::with_query(query);
        let reply = self.exchange(&message)?;
        Ok(reply.map(|r| codec::decode(r.events)).unwrap_or_default())
    }

    /// Close the connection. Later calls fail with a connection error.
    ///
    /// A stream session also closes itself when an exchange fails mid-frame.
    pub fn close(&self) {
        if self.lock().take().is_some() {
            tracing::debug!("Closed {} connection", self.network);
        }
    }

    fn exchange(&self, message: &Msg) -> Result<Option<Msg>> {
        let mut guard = self.lock();
        let transport = guard.as_mut().ok_or_else(|| {
            Error::Connection(io::Error::new(
                io::ErrorKind::NotConnected,
                "connection closed",
            ))
        })?;

        let result = transport.send(message);
        if let Err(e) = &result {
            if self.network.kind() == TransportKind::Stream && breaks_framing(e) {
                tracing::debug!(
                    "Dropping {} connection after failed exchange: {}",
                    self.network,
                    e
                );
                *guard = None;
            }
        }
        result
    }

    fn lock(&self) -> MutexGuard<'_, Option<Box<dyn Transport>>> {
        // Poisoning is ignored: the slot never holds partial state
        self.transport.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Errors after which the stream position no longer matches a frame boundary.
/// A `Server` error comes from a fully read reply and leaves the stream usable.
fn breaks_framing(error: &Error) -> bool {
    matches!(
        error,
        Error::Connection(_) | Error::Decode(_) | Error::FrameTooLarge { .. }
    )
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("network", &self.network)
            .finish_non_exhaustive()
    }
}
