// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Carrera challenge: lap-time leaderboards from race result screenshots
//!
//! Recognized screenshot text is parsed into driver/time pairs, matched
//! against the channel's known drivers, and merged best-time-wins into a
//! published text leaderboard that closes at 19:00 on the challenge date.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::ChallengeService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub challenges: ChallengeService,
}
