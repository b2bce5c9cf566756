//! Runtime configuration.
//!
//! Every flag can also come from a `SHOWCASE_*` environment variable so the
//! same binary runs locally and on a hosting platform. `AppConfig` is the
//! validated form handed to the rest of the server.

use std::time::Duration;

use clap::Parser;

use crate::upstream::TransportConfig;

pub const DEFAULT_LISTING_URL: &str = "https://api.github.com/repos/Yao-888/web-develop1/contents";
pub const DEFAULT_STATS_URL: &str = "https://late-grass-5e61.3420808767.workers.dev";

/// Course Showcase - listing proxy and usage stats backend
#[derive(Debug, Parser)]
#[command(name = "course-showcase")]
#[command(about = "Backend for the coursework showcase page", long_about = None)]
pub struct Cli {
    /// Address to bind
    #[arg(long, env = "SHOWCASE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to run the server on
    #[arg(short, long, env = "SHOWCASE_PORT", default_value = "3001")]
    pub port: u16,

    /// Repository contents API to proxy
    #[arg(long, env = "SHOWCASE_LISTING_URL", default_value = DEFAULT_LISTING_URL)]
    pub listing_url: String,

    /// Usage statistics endpoint polled for the footer
    #[arg(long, env = "SHOWCASE_STATS_URL", default_value = DEFAULT_STATS_URL)]
    pub stats_url: String,

    /// Seconds between stats polls
    #[arg(long, env = "SHOWCASE_POLL_INTERVAL_SECS", default_value = "300")]
    pub poll_interval_secs: u64,

    /// Timeout for each upstream request, in seconds
    #[arg(long, env = "SHOWCASE_UPSTREAM_TIMEOUT_SECS", default_value = "10")]
    pub upstream_timeout_secs: u64,

    /// Skip TLS certificate validation for upstream requests
    #[arg(long, env = "SHOWCASE_INSECURE_UPSTREAM_TLS")]
    pub insecure_upstream_tls: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub listing_url: String,
    pub stats_url: String,
    pub poll_interval: Duration,
    pub transport: TransportConfig,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    EmptyUrl(&'static str),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

impl TryFrom<Cli> for AppConfig {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        if cli.listing_url.trim().is_empty() {
            return Err(ConfigError::EmptyUrl("--listing-url"));
        }
        if cli.stats_url.trim().is_empty() {
            return Err(ConfigError::EmptyUrl("--stats-url"));
        }
        if cli.poll_interval_secs == 0 {
            return Err(ConfigError::Zero("--poll-interval-secs"));
        }
        if cli.upstream_timeout_secs == 0 {
            return Err(ConfigError::Zero("--upstream-timeout-secs"));
        }

        Ok(Self {
            bind_addr: format!("{}:{}", cli.host, cli.port),
            listing_url: cli.listing_url,
            stats_url: cli.stats_url,
            poll_interval: Duration::from_secs(cli.poll_interval_secs),
            transport: TransportConfig {
                accept_invalid_certs: cli.insecure_upstream_tls,
                timeout: Duration::from_secs(cli.upstream_timeout_secs),
                ..TransportConfig::default()
            },
        })
    }
}
