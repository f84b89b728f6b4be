//! Sandesh - Riemann event client
//!
//! Sends monitoring events to, and queries events from, a Riemann server.
//!
//! ## Transports
//!
//! - **TCP** (`tcp`, `tcp4`, `tcp6`): length-prefixed protobuf frames, every
//!   request gets a reply. Supports `send` and `query`.
//! - **UDP** (`udp`, `udp4`, `udp6`): one protobuf message per datagram,
//!   fire-and-forget. Supports `send` only.
//!
//! ## Zero values
//!
//! Event fields equal to zero (or empty) are not transmitted. A metric of
//! exactly `0` is therefore seen by the server as "no metric". See [`Event`].

pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod event;
pub mod proto;
pub mod transport;

// Re-export commonly used types
pub use client::Client;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use event::{Event, Metric};
pub use transport::{DialOptions, Network, Transport, TransportKind};
