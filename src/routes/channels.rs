// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Channel routes: result submissions and leaderboard reads.

use crate::error::{AppError, Result};
use crate::services::SubmissionOutcome;
use crate::AppState;
use axum::{
    extract::{Json, Path, State},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Upper bound on recognized text per submission.
const MAX_TEXT_BYTES: usize = 64 * 1024;
const MAX_AUTHOR_CHARS: usize = 100;

/// Channel routes (public).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/channels/{channel_id}/results", post(submit_results))
        .route("/channels/{channel_id}/leaderboard", get(get_leaderboard))
}

/// Recognized text of one screenshot.
#[derive(Debug, Deserialize)]
pub struct SubmitResultsRequest {
    /// Display name of whoever posted the screenshot
    pub author: String,
    /// OCR output for the screenshot
    pub text: String,
}

impl SubmitResultsRequest {
    fn validate(&self) -> Result<()> {
        let author = self.author.trim();
        if author.is_empty() {
            return Err(AppError::BadRequest("author must not be empty".to_string()));
        }
        if author.chars().count() > MAX_AUTHOR_CHARS {
            return Err(AppError::BadRequest(format!(
                "author must be at most {} characters",
                MAX_AUTHOR_CHARS
            )));
        }
        if author.chars().any(char::is_control) {
            return Err(AppError::BadRequest(
                "author must not contain control characters".to_string(),
            ));
        }
        if self.text.len() > MAX_TEXT_BYTES {
            return Err(AppError::BadRequest(format!(
                "text must be at most {} bytes",
                MAX_TEXT_BYTES
            )));
        }
        Ok(())
    }
}

/// Merge a screenshot's results into the channel's leaderboard.
async fn submit_results(
    State(state): State<Arc<AppState>>,
    Path(channel_id): Path<u64>,
    Json(payload): Json<SubmitResultsRequest>,
) -> Result<Json<SubmissionOutcome>> {
    payload.validate()?;

    tracing::info!(
        channel_id,
        author = %payload.author,
        chars = payload.text.len(),
        "Received result submission"
    );

    let outcome = state
        .challenges
        .submit_results(channel_id, payload.author.trim(), &payload.text)
        .await?;

    Ok(Json(outcome))
}

/// Current leaderboard text.
async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Path(channel_id): Path<u64>,
) -> Result<String> {
    state.challenges.leaderboard_text(channel_id).await
}
