// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Best-time-wins merge of new results into a leaderboard.

use crate::models::{LeaderboardEntry, ResolvedResult};
use crate::services::leaderboard::{parse_leaderboard, render_leaderboard};
use chrono::{DateTime, Utc};

/// Result of merging results into rendered leaderboard text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// New leaderboard text; the input text unchanged when `changed` is false.
    pub text: String,
    /// Whether any entry was added or improved. When false the caller must
    /// not write the leaderboard back.
    pub changed: bool,
}

/// Merge results into a list of entries.
///
/// Returns `true` if anything was added or improved, in which case the list
/// has been re-sorted (stable, ascending by time). Equal or slower times for
/// an existing identifier are ignored, so re-submitting a result is a no-op.
pub fn merge_entries(entries: &mut Vec<LeaderboardEntry>, results: &[ResolvedResult]) -> bool {
    let mut updated = false;

    for result in results {
        let identifier = result.identifier();

        match entries.iter_mut().find(|e| e.identifier == identifier) {
            Some(existing) => {
                if result.time < existing.time {
                    tracing::info!(
                        driver = %result.driver_name,
                        old_time = %existing.time,
                        new_time = %result.time,
                        "Improved time"
                    );
                    existing.time = result.time;
                    updated = true;
                }
            }
            None => {
                tracing::info!(
                    driver = %result.driver_name,
                    time = %result.time,
                    "New leaderboard entry"
                );
                entries.push(LeaderboardEntry::from_result(result));
                updated = true;
            }
        }
    }

    if updated {
        // sort_by_key is stable: ties keep their previous order
        entries.sort_by_key(|e| e.time.total_millis());
    }

    updated
}

/// Parse the current leaderboard, merge results and re-render if changed.
pub fn merge_and_rank(
    current_text: &str,
    results: &[ResolvedResult],
    as_of: DateTime<Utc>,
) -> MergeOutcome {
    let mut entries = parse_leaderboard(current_text);

    if merge_entries(&mut entries, results) {
        MergeOutcome {
            text: render_leaderboard(&entries, as_of),
            changed: true,
        }
    } else {
        MergeOutcome {
            text: current_text.to_string(),
            changed: false,
        }
    }
}
