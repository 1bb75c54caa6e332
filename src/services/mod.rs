// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod challenge;
pub mod extractor;
pub mod identity;
pub mod leaderboard;
pub mod merge;

pub use challenge::{ChallengeService, SubmissionOutcome, SubmissionStatus, SweepReport};
pub use extractor::extract_results;
pub use identity::resolve_identities;
pub use leaderboard::{parse_leaderboard, render_leaderboard};
pub use merge::{merge_and_rank, merge_entries, MergeOutcome};
