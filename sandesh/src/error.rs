//! Error types for Sandesh

use thiserror::Error;

/// Sandesh error type
///
/// Every error is handed back to the caller as-is. Nothing is retried or
/// logged inside the library.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport name is not one of the known stream/datagram names
    #[error("Unsupported transport: {0:?}")]
    UnsupportedTransport(String),

    /// Dial, read or write failure (also returned after `close`)
    #[error("Connection failed: {0}")]
    Connection(#[from] std::io::Error),

    /// Server replied with `ok = false`
    #[error("Server error: {0}")]
    Server(String),

    /// Operation the active transport cannot perform
    #[error("Operation not supported: {0}")]
    UnsupportedOperation(&'static str),

    /// Reply bytes did not parse as a protobuf `Msg`
    #[error("Decode error: {0}")]
    Decode(String),

    /// Frame length does not fit the protocol limits
    #[error("Frame too large: {len} bytes exceeds maximum {max} bytes")]
    FrameTooLarge {
        /// Length of the offending frame
        len: usize,
        /// Maximum accepted length
        max: usize,
    },

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<prost::DecodeError> for Error {
    fn from(e: prost::DecodeError) -> Self {
        Error::Decode(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
