//! Course Showcase - backend for a personal coursework showcase page
//!
//! Serves the repository listing proxy and the footer's usage statistics.
//!
//! # Usage
//! ```bash
//! course-showcase                          # Start on 127.0.0.1:3001
//! course-showcase --port 8080              # Different port
//! course-showcase --poll-interval-secs 60  # Poll stats every minute
//! ```

mod config;
mod error;
mod models;
mod routes;
#[cfg(test)]
mod test_support;
mod upstream;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{AppConfig, Cli};
use upstream::{ListingSource, StatsPoller, UpstreamClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::try_from(Cli::parse())?;

    // Initialize tracing (quieter for production)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = UpstreamClient::new(&config.transport)?;
    let listing = Arc::new(ListingSource::new(client.clone(), config.listing_url.clone()));
    let stats = Arc::new(StatsPoller::new(client, config.stats_url.clone()));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poller = tokio::spawn(stats.clone().run(config.poll_interval, shutdown_rx));

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::create_router(listing, stats)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    tracing::info!(
        listing = %config.listing_url,
        stats = %config.stats_url,
        "Listening on http://{}",
        config.bind_addr
    );
    println!("  Server:  http://{}", config.bind_addr);
    println!("  Press Ctrl+C to stop");

    // Set up graceful shutdown
    let shutdown = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
        println!("\n  Shutting down...");
        let _ = shutdown_tx.send(true);
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    poller.await.context("Stats poller panicked")?;

    Ok(())
}
