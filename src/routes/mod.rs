// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod admin;
pub mod channels;

use crate::middleware::require_admin;
use crate::AppState;
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Usage help for challenge participants and admins.
pub const HELP_TEXT: &str = "\
Carrera Hybrid Challenge - Help

Admin:
  POST   /messages                  publish a leaderboard message
  POST   /challenges                start a challenge in a channel
  DELETE /challenges/{channel_id}   stop a challenge
  POST   /challenges/sweep          close expired challenges now

Usage:
  1. Submit the recognized text of a Carrera Hybrid results screenshot
     to POST /channels/{channel_id}/results
  2. Driver names and lap times are picked up automatically
  3. The leaderboard message is updated
  4. The challenge ends at 19:00 German time on the date in the channel name

Notes:
  - The channel name must end in DD-MM-YY for the challenge to end automatically
  - Only better times replace a driver's entry
  - Once drivers are known, only known drivers are picked up from screenshots
";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

async fn help() -> &'static str {
    HELP_TEXT
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/help", get(help))
        .merge(channels::routes());

    let admin_routes =
        admin::routes().route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
