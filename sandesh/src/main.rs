//! Sandesh - command-line Riemann client
//!
//! # Usage
//!
//! ```bash
//! # Send one event over TCP (default 127.0.0.1:5555)
//! sandesh send --service "api latency" --metric-double 12.5 --state ok
//!
//! # Fire-and-forget over UDP
//! sandesh --transport udp --server riemann:5555 send --service heartbeat
//!
//! # Query the index
//! sandesh query 'service = "api latency"'
//! ```
//!
//! Settings come from `--config FILE`, else `sandesh.toml` in the working
//! directory if present, else built-in defaults. Command-line flags win.

use clap::{Args, Parser, Subcommand};
use sandesh::{Client, ClientConfig, Event};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

const DEFAULT_CONFIG_FILE: &str = "sandesh.toml";

/// Sandesh - send events to and query a Riemann server
#[derive(Parser, Debug)]
#[command(name = "sandesh")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Transport: tcp, tcp4, tcp6, udp, udp4, udp6
    #[arg(short, long, global = true)]
    transport: Option<String>,

    /// Server address as host:port
    #[arg(short, long, global = true)]
    server: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send a single event
    Send(SendArgs),

    /// Query events and print them as JSON lines
    Query {
        /// Riemann query, e.g. 'service = "api" and state = "critical"'
        query: String,
    },
}

#[derive(Args, Debug)]
struct SendArgs {
    #[arg(long)]
    service: String,

    /// Defaults to `[event] host` from the config file
    #[arg(long)]
    host: Option<String>,

    #[arg(long)]
    state: Option<String>,

    #[arg(long)]
    description: Option<String>,

    /// Time to live in seconds
    #[arg(long)]
    ttl: Option<f32>,

    /// UNIX time in seconds (default: now)
    #[arg(long)]
    time: Option<i64>,

    #[arg(long, conflicts_with_all = ["metric_float", "metric_double"])]
    metric_int: Option<i64>,

    #[arg(long, conflicts_with = "metric_double")]
    metric_float: Option<f32>,

    #[arg(long)]
    metric_double: Option<f64>,
}

impl SendArgs {
    fn into_event(self, config: &ClientConfig) -> Event {
        Event {
            ttl: self.ttl.or(config.event.ttl).unwrap_or_default(),
            time: self.time.unwrap_or_else(unix_now),
            host: self
                .host
                .or_else(|| config.event.host.clone())
                .unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            service: self.service,
            description: self.description.unwrap_or_default(),
            float: self.metric_float.unwrap_or_default(),
            double: self.metric_double.unwrap_or_default(),
            int: self.metric_int.unwrap_or_default(),
        }
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

fn load_config(path: Option<&Path>) -> sandesh::Result<ClientConfig> {
    match path {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            ClientConfig::load(path)
        }
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            info!("Loading configuration from {}", DEFAULT_CONFIG_FILE);
            ClientConfig::load(Path::new(DEFAULT_CONFIG_FILE))
        }
        None => {
            debug!("Using default configuration");
            Ok(ClientConfig::default())
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sandesh=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(transport) = cli.transport {
        config.connection.transport = transport;
    }

    let network = config.network()?;
    let address = cli.server.unwrap_or_else(|| config.address());

    info!("Connecting to {} over {}", address, network);
    let client = Client::dial_with(network, &address, &config.dial_options())?;

    match cli.command {
        Command::Send(args) => {
            let event = args.into_event(&config);
            debug!("Sending {:?}", event);
            client.send(&event)?;
        }
        Command::Query { query } => {
            let events = client.query(&query)?;
            info!("{} events matched", events.len());
            for event in &events {
                println!("{}", serde_json::to_string(event)?);
            }
        }
    }

    client.close();
    Ok(())
}
