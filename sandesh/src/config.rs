//! Configuration loading for Sandesh
//!
//! ```toml
//! [connection]
//! transport = "tcp"
//! host = "127.0.0.1"
//! port = 5555
//! connect_timeout_ms = 5000
//! read_timeout_ms = 0
//! write_timeout_ms = 0
//! max_frame_len = 67108864
//!
//! [event]
//! host = "web-01"
//! ttl = 60.0
//! ```
//!
//! Every field is optional. A timeout of `0` means "no deadline".

use crate::error::{Error, Result};
use crate::transport::{DialOptions, MAX_FRAME_LEN, Network};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ClientConfig {
    #[serde(default)]
    pub connection: ConnectionConfig,
    #[serde(default)]
    pub event: EventDefaults,
}

/// Server connection settings
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ConnectionConfig {
    /// Transport name: tcp, tcp4, tcp6, udp, udp4, udp6 (default: tcp)
    #[serde(default = "default_transport")]
    pub transport: String,

    /// Server host name or IP (default: 127.0.0.1)
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port (default: 5555)
    #[serde(default = "default_port")]
    pub port: u16,

    /// TCP connect timeout in milliseconds (default: 5000)
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,

    /// Socket read deadline in milliseconds (default: 0, none)
    #[serde(default)]
    pub read_timeout_ms: u64,

    /// Socket write deadline in milliseconds (default: 0, none)
    #[serde(default)]
    pub write_timeout_ms: u64,

    /// Largest TCP frame in bytes, either direction (default: 64MB)
    #[serde(default = "default_max_frame_len")]
    pub max_frame_len: usize,
}

/// Values stamped onto events built by the command-line tool
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct EventDefaults {
    /// Host reported when none is given on the command line
    pub host: Option<String>,
    /// TTL in seconds
    pub ttl: Option<f32>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            transport: default_transport(),
            host: default_host(),
            port: default_port(),
            connect_timeout_ms: default_connect_timeout(),
            read_timeout_ms: 0,
            write_timeout_ms: 0,
            max_frame_len: default_max_frame_len(),
        }
    }
}

fn default_transport() -> String {
    "tcp".to_string()
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    5555
}
fn default_connect_timeout() -> u64 {
    5000
}
fn default_max_frame_len() -> usize {
    MAX_FRAME_LEN
}

fn millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

impl ClientConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;
        let config: ClientConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the full address string for connection
    pub fn address(&self) -> String {
        if self.connection.host.contains(':') && !self.connection.host.starts_with('[') {
            // Bare IPv6 literal
            format!("[{}]:{}", self.connection.host, self.connection.port)
        } else {
            format!("{}:{}", self.connection.host, self.connection.port)
        }
    }

    /// Parsed transport name
    pub fn network(&self) -> Result<Network> {
        self.connection.transport.parse()
    }

    /// Socket options derived from the timeout settings
    pub fn dial_options(&self) -> DialOptions {
        DialOptions {
            connect_timeout: millis(self.connection.connect_timeout_ms),
            read_timeout: millis(self.connection.read_timeout_ms),
            write_timeout: millis(self.connection.write_timeout_ms),
            max_frame_len: self.connection.max_frame_len,
        }
    }
}
