// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin routes for managing challenges.
//! The admin middleware is applied in routes/mod.rs for these routes.

use crate::db::BoardError;
use crate::error::{AppError, Result};
use crate::models::ChannelConfig;
use crate::services::SweepReport;
use crate::AppState;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    routing::{delete, post},
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Admin routes (require the admin token).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/messages", post(post_message))
        .route("/challenges", post(add_challenge))
        .route("/challenges/sweep", post(sweep))
        .route("/challenges/{channel_id}", delete(remove_challenge))
}

// ─── Messages ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct PostMessageResponse {
    pub message_id: u64,
}

/// Publish a message that can later hold a leaderboard.
async fn post_message(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PostMessageRequest>,
) -> Result<(StatusCode, Json<PostMessageResponse>)> {
    let message_id = state
        .challenges
        .board()
        .post(&payload.text)
        .await
        .map_err(|e| match e {
            BoardError::Forbidden(reason) => AppError::PermissionDenied(reason),
            other => AppError::Storage(other.to_string()),
        })?;

    Ok((StatusCode::CREATED, Json(PostMessageResponse { message_id })))
}

// ─── Challenges ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AddChallengeRequest {
    pub channel_id: u64,
    /// Channel label; a trailing DD-MM-YY sets the closing date
    pub channel_name: String,
    pub leaderboard_message_id: u64,
}

/// Start a challenge in a channel.
async fn add_challenge(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AddChallengeRequest>,
) -> Result<(StatusCode, Json<ChannelConfig>)> {
    let channel_name = payload.channel_name.trim();
    if channel_name.is_empty() {
        return Err(AppError::BadRequest(
            "channel_name must not be empty".to_string(),
        ));
    }

    let config = state
        .challenges
        .activate(
            payload.channel_id,
            channel_name,
            payload.leaderboard_message_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(config)))
}

/// Stop a challenge in a channel.
async fn remove_challenge(
    State(state): State<Arc<AppState>>,
    Path(channel_id): Path<u64>,
) -> Result<StatusCode> {
    state.challenges.deactivate(channel_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Close expired challenges without waiting for the next scheduled sweep.
async fn sweep(State(state): State<Arc<AppState>>) -> Result<Json<SweepReport>> {
    Ok(Json(state.challenges.sweep(Utc::now()).await?))
}
