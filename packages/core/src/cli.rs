use std::net::SocketAddr;

use clap::Parser;

/// Quote relay CLI arguments.
///
/// Every flag overrides the matching environment variable. The provider
/// API key is only read from the environment.
#[derive(Debug, Default, Parser)]
#[command(
    name = "quote-relay",
    version,
    about = "Relays upstream quotes to a downstream broker on a fixed interval"
)]
pub struct Cli {
    /// Comma-separated symbols to relay, in order (e.g. AAPL,GOOGL,MSFT)
    #[arg(long)]
    pub symbols: Option<String>,

    /// Broker URL that receives updates
    #[arg(long)]
    pub broker_url: Option<String>,

    /// Quote provider base URL
    #[arg(long)]
    pub provider_url: Option<String>,

    /// Relay interval in seconds
    #[arg(long)]
    pub poll_interval: Option<u64>,

    /// Per-request HTTP timeout in seconds
    #[arg(long)]
    pub http_timeout: Option<u64>,

    /// Address for the /health and /metrics endpoint
    #[arg(long)]
    pub listen: Option<SocketAddr>,
}
