//! # eClips News
//!
//! A small HTTP API that scrapes esports news from third-party pages and
//! feeds and serves it as a uniform JSON item list.
//!
//! ## Routes
//!
//! - `GET /api/ow_news`: Overwatch headlines from MMO-Champion
//! - `GET /api/rl_news`: Rocket League esports posts from Reddit's ATOM feed
//! - `GET /health`: liveness probe
//!
//! ## Usage
//!
//! ```sh
//! eclips_news --host 127.0.0.1 --port 5000
//! ```
//!
//! ## Architecture
//!
//! Each request runs one linear pipeline for its source:
//! 1. **Fetching**: a single GET with browser-like headers and a timeout
//! 2. **Parsing**: tolerant HTML parsing (feeds are parsed as HTML too)
//! 3. **Extraction**: source selectors pull raw fields per container
//! 4. **Normalization**: sentinels and cleanup produce uniform items
//! 5. **Envelope**: items are wrapped as `{"data": {"status", "segments"}}`

use clap::Parser;
use std::error::Error;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod extractor;
mod fetcher;
mod markup;
mod models;
mod normalize;
mod pipeline;
mod routes;
mod scrapers;
mod utils;

use cli::Cli;
use fetcher::Fetcher;
use routes::{AppState, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let state = AppState::with_default_sources(Fetcher::new(reqwest::Client::builder().build()?));
    for source in state.sources() {
        source.validate()?;
        info!(source = source.name, url = %source.target_url, "Registered source");
    }

    let addr = args.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "eclips_news listening");
    axum::serve(listener, router(state)).await?;

    Ok(())
}
