// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Carrera Challenge Server
//!
//! Accepts recognized race result screenshots, keeps per-channel lap time
//! leaderboards, and closes challenges on schedule.

use carrera_challenge::{
    config::Config,
    db::{FileConfigStore, FileMessageBoard},
    services::ChallengeService,
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        data_dir = %config.data_dir.display(),
        "Starting Carrera Challenge"
    );

    let store = FileConfigStore::open(config.channels_dir()).await?;
    let board = FileMessageBoard::open(config.messages_dir()).await?;
    let challenges = ChallengeService::new(Arc::new(store), Arc::new(board));

    // Close expired challenges in the background
    let sweeper = challenges.spawn_sweeper(config.sweep_interval());
    tracing::info!(
        interval_secs = config.sweep_interval_secs,
        "Challenge sweeper started"
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        challenges,
    });

    // Build router
    let app = carrera_challenge::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    sweeper.abort();
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("carrera_challenge=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
