//! Configuration for the venue HTTP server.
//!
//! Intentionally simple: defaults, overridable via a few environment
//! variables:
//!
//! - `VENUE_BIND_ADDR`        (default: "0.0.0.0")
//! - `VENUE_PORT`             (default: "8080")
//! - `VENUE_STATS_INTERVAL_MS` (default: "1000")
//! - `VENUE_DEMO`             (default: "false")

use std::env;
use std::str::FromStr;

use anyhow::Context;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// IP address / interface to bind to.
    pub bind_addr: String,

    /// TCP port to listen on.
    pub port: u16,

    /// Throughput recomputation period, in milliseconds.
    pub stats_interval_ms: u64,

    /// Whether to run the synthetic demo order flow.
    pub demo: bool,
}

impl Config {
    /// Construct a `Config` from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = env::var("VENUE_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = read_env_or_default("VENUE_PORT", 8080u16)?;
        let stats_interval_ms = read_env_or_default("VENUE_STATS_INTERVAL_MS", 1000u64)?;
        let demo = read_env_or_default("VENUE_DEMO", false)?;

        Ok(Config {
            bind_addr,
            port,
            stats_interval_ms,
            demo,
        })
    }

    /// Convenience: `addr:port` socket string.
    pub fn socket_addr_string(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn read_env_or_default<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(val) => val.parse::<T>().with_context(|| format!("invalid {key}")),
        Err(_) => Ok(default),
    }
}
