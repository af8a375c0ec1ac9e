use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use crate::cli::Cli;
use crate::relay::TrackedSymbols;
use crate::services::alphavantage::DEFAULT_PROVIDER_URL;

pub const DEFAULT_POLL_INTERVAL_SECONDS: u64 = 10;

/// Upper bound for interval and timeout settings (one day).
pub const MAX_SECONDS: u64 = 86_400;

#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub broker_url: String,
    pub provider_url: String,
    pub symbols: TrackedSymbols,
    pub poll_interval_seconds: u64,
    pub http_timeout_seconds: Option<u64>,
    pub listen_addr: Option<SocketAddr>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[REDACTED]")
            .field("broker_url", &self.broker_url)
            .field("provider_url", &self.provider_url)
            .field("symbols", &self.symbols)
            .field("poll_interval_seconds", &self.poll_interval_seconds)
            .field("http_timeout_seconds", &self.http_timeout_seconds)
            .field("listen_addr", &self.listen_addr)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = get("API_KEY").ok_or("API_KEY is required")?;
        let broker_url = get("BROKER_URL").ok_or("BROKER_URL is required")?;

        let provider_url =
            get("PROVIDER_URL").unwrap_or_else(|| DEFAULT_PROVIDER_URL.to_string());

        let symbols = match get("SYMBOLS") {
            Some(raw) => {
                TrackedSymbols::parse(&raw).map_err(|err| format!("Invalid SYMBOLS: {}", err))?
            }
            None => TrackedSymbols::default(),
        };

        let poll_interval_seconds = match get("POLL_INTERVAL_SECONDS") {
            Some(raw) => parse_positive_seconds("POLL_INTERVAL_SECONDS", &raw)?,
            None => DEFAULT_POLL_INTERVAL_SECONDS,
        };

        let http_timeout_seconds = get("HTTP_TIMEOUT_SECONDS")
            .map(|raw| parse_positive_seconds("HTTP_TIMEOUT_SECONDS", &raw))
            .transpose()?;

        let listen_addr = get("LISTEN_ADDR")
            .map(|raw| {
                raw.trim()
                    .parse::<SocketAddr>()
                    .map_err(|_| format!("Invalid LISTEN_ADDR: {}", raw))
            })
            .transpose()?;

        Ok(Self {
            api_key,
            broker_url,
            provider_url,
            symbols,
            poll_interval_seconds,
            http_timeout_seconds,
            listen_addr,
        })
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_cli(mut self, cli: &Cli) -> Result<Self, String> {
        if let Some(raw) = &cli.symbols {
            self.symbols =
                TrackedSymbols::parse(raw).map_err(|err| format!("Invalid --symbols: {}", err))?;
        }
        if let Some(url) = &cli.broker_url {
            self.broker_url = non_empty(url).ok_or("BROKER_URL is required")?;
        }
        if let Some(url) = &cli.provider_url {
            self.provider_url = non_empty(url).ok_or("PROVIDER_URL must not be empty")?;
        }
        if let Some(seconds) = cli.poll_interval {
            self.poll_interval_seconds = check_seconds("--poll-interval", seconds)?;
        }
        if let Some(seconds) = cli.http_timeout {
            self.http_timeout_seconds = Some(check_seconds("--http-timeout", seconds)?);
        }
        if cli.listen.is_some() {
            self.listen_addr = cli.listen;
        }
        Ok(self)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }

    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout_seconds.map(Duration::from_secs)
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_positive_seconds(key: &str, raw: &str) -> Result<u64, String> {
    let seconds = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| format!("{} must be a valid number", key))?;
    check_seconds(key, seconds)
}

fn check_seconds(key: &str, seconds: u64) -> Result<u64, String> {
    match seconds {
        0 => Err(format!("{} must be greater than zero", key)),
        s if s > MAX_SECONDS => Err(format!("{} must be at most {}", key, MAX_SECONDS)),
        s => Ok(s),
    }
}
