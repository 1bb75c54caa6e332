// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod channel;
pub mod leaderboard;
pub mod race_time;

pub use channel::{ChannelConfig, DriverMapping};
pub use leaderboard::{ExtractedResult, LeaderboardEntry, ResolvedResult};
pub use race_time::{time_to_millis, RaceTime, TimeError};
