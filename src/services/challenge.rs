// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Challenge orchestration.
//!
//! Handles the core workflow for a screenshot submission:
//! 1. Acquire the channel's lock
//! 2. Load the channel config and re-check the challenge window
//! 3. Resolve recognized drivers against the channel's mapping
//! 4. Fetch the published leaderboard, merge, and edit it if anything changed
//! 5. Persist the (possibly grown) driver mapping
//!
//! Every operation touching a channel's leaderboard or config runs under that
//! channel's mutex, so submissions and the close sweep never interleave for
//! one channel while different channels proceed in parallel.

use crate::db::{ConfigStore, MessageBoard};
use crate::error::{AppError, Result};
use crate::models::ChannelConfig;
use crate::services::extractor::extract_results;
use crate::services::identity::resolve_identities;
use crate::services::merge::merge_and_rank;
use crate::time_utils::{close_leaderboard, is_active_at};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use futures_util::{stream, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Upper bound on channels closed concurrently by one sweep.
const MAX_CONCURRENT_SWEEPS: usize = 8;

/// Per-channel locks, shared by every clone of the service.
pub type ChannelLocks = Arc<DashMap<u64, Arc<Mutex<()>>>>;

/// What happened to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// The leaderboard was re-rendered and edited
    Updated,
    /// Results were accepted but none beat the current board
    Unchanged,
    /// Nothing usable was recognized, or every driver was unknown
    NoResults,
    /// The challenge is over; nothing was changed
    Inactive,
}

/// Summary of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionOutcome {
    /// Lines recognized as (driver, time)
    pub extracted: usize,
    /// Results that survived identity resolution
    pub accepted: usize,
    pub status: SubmissionStatus,
}

/// Summary of one close sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub checked: usize,
    pub closed: usize,
    pub failed: usize,
}

/// Coordinates challenges across channels.
#[derive(Clone)]
pub struct ChallengeService {
    store: Arc<dyn ConfigStore>,
    board: Arc<dyn MessageBoard>,
    locks: ChannelLocks,
}

impl ChallengeService {
    pub fn new(store: Arc<dyn ConfigStore>, board: Arc<dyn MessageBoard>) -> Self {
        Self {
            store,
            board,
            locks: Arc::new(DashMap::new()),
        }
    }

    /// The message board leaderboards are published to.
    pub fn board(&self) -> &Arc<dyn MessageBoard> {
        &self.board
    }

    fn lock_for(&self, channel_id: u64) -> Arc<Mutex<()>> {
        self.locks
            .entry(channel_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn require_config(&self, channel_id: u64) -> Result<ChannelConfig> {
        self.store
            .load(channel_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No challenge in channel {}", channel_id)))
    }

    // ─── Activation ──────────────────────────────────────────────────────────

    /// Start a challenge in a channel, publishing into an existing message.
    ///
    /// Replaces any previous config for the channel, including its drivers.
    pub async fn activate(
        &self,
        channel_id: u64,
        channel_name: &str,
        leaderboard_post_id: u64,
    ) -> Result<ChannelConfig> {
        self.board
            .fetch(leaderboard_post_id)
            .await
            .map_err(|e| AppError::from_board(leaderboard_post_id, e))?;

        let lock = self.lock_for(channel_id);
        let _guard = lock.lock().await;

        let config = ChannelConfig::new(channel_id, leaderboard_post_id, channel_name);
        self.store.save(&config).await?;

        tracing::info!(
            channel_id,
            channel = channel_name,
            leaderboard_post_id,
            "Challenge activated"
        );
        Ok(config)
    }

    /// Stop a challenge and forget the channel's config.
    pub async fn deactivate(&self, channel_id: u64) -> Result<()> {
        let lock = self.lock_for(channel_id);
        let guard = lock.lock().await;

        self.require_config(channel_id).await?;
        self.store.delete(channel_id).await?;

        drop(guard);
        drop(lock);
        self.locks
            .remove_if(&channel_id, |_, lock| Arc::strong_count(lock) == 1);

        tracing::info!(channel_id, "Challenge deactivated");
        Ok(())
    }

    /// Current rendered leaderboard for a channel.
    pub async fn leaderboard_text(&self, channel_id: u64) -> Result<String> {
        let config = self.require_config(channel_id).await?;
        self.board
            .fetch(config.leaderboard_post_id)
            .await
            .map_err(|e| AppError::from_board(config.leaderboard_post_id, e))
    }

    // ─── Submissions ─────────────────────────────────────────────────────────

    /// Merge the results recognized in one screenshot into the channel's board.
    pub async fn submit_results(
        &self,
        channel_id: u64,
        author: &str,
        recognized_text: &str,
    ) -> Result<SubmissionOutcome> {
        self.submit_results_at(channel_id, author, recognized_text, Utc::now())
            .await
    }

    /// [`Self::submit_results`] with an explicit clock.
    pub async fn submit_results_at(
        &self,
        channel_id: u64,
        author: &str,
        recognized_text: &str,
        now: DateTime<Utc>,
    ) -> Result<SubmissionOutcome> {
        let extracted = extract_results(recognized_text);

        let lock = self.lock_for(channel_id);
        let _guard = lock.lock().await;

        let mut config = self.require_config(channel_id).await?;

        // Checked under the lock so a concurrent close cannot slip in between.
        if !config.is_active || !is_active_at(&config.channel_name, now) {
            tracing::info!(
                channel_id,
                channel = %config.channel_name,
                "Challenge is over, ignoring submission"
            );
            return Ok(SubmissionOutcome {
                extracted: extracted.len(),
                accepted: 0,
                status: SubmissionStatus::Inactive,
            });
        }

        let mappings_before = config.driver_mappings.len();
        let resolved = resolve_identities(&extracted, &mut config.driver_mappings, author);

        if resolved.is_empty() {
            tracing::debug!(
                channel_id,
                extracted = extracted.len(),
                "No results to merge"
            );
            return Ok(SubmissionOutcome {
                extracted: extracted.len(),
                accepted: 0,
                status: SubmissionStatus::NoResults,
            });
        }

        let post_id = config.leaderboard_post_id;
        let current = self
            .board
            .fetch(post_id)
            .await
            .map_err(|e| AppError::from_board(post_id, e))?;

        let outcome = merge_and_rank(&current, &resolved, now);
        if outcome.changed {
            self.board
                .edit(post_id, &outcome.text)
                .await
                .map_err(|e| AppError::from_board(post_id, e))?;
            tracing::info!(channel_id, post_id, "Leaderboard updated");
        }

        if config.driver_mappings.len() != mappings_before {
            self.store.save(&config).await?;
        }

        Ok(SubmissionOutcome {
            extracted: extracted.len(),
            accepted: resolved.len(),
            status: if outcome.changed {
                SubmissionStatus::Updated
            } else {
                SubmissionStatus::Unchanged
            },
        })
    }

    // ─── Closing ─────────────────────────────────────────────────────────────

    /// Close a channel's challenge if its window has passed.
    ///
    /// Returns `true` if this call closed it. Already-closed challenges are
    /// left alone, so the transition happens at most once.
    pub async fn close_if_expired(&self, channel_id: u64, now: DateTime<Utc>) -> Result<bool> {
        let lock = self.lock_for(channel_id);
        let _guard = lock.lock().await;

        let Some(mut config) = self.store.load(channel_id).await? else {
            return Ok(false);
        };
        if !config.is_active || is_active_at(&config.channel_name, now) {
            return Ok(false);
        }

        let post_id = config.leaderboard_post_id;
        let current = self
            .board
            .fetch(post_id)
            .await
            .map_err(|e| AppError::from_board(post_id, e))?;
        self.board
            .edit(post_id, &close_leaderboard(&current))
            .await
            .map_err(|e| AppError::from_board(post_id, e))?;

        config.is_active = false;
        self.store.save(&config).await?;

        tracing::info!(channel_id, channel = %config.channel_name, "Challenge closed");
        Ok(true)
    }

    /// Close every expired challenge. Per-channel failures are logged and
    /// counted; they do not stop the sweep.
    pub async fn sweep(&self, now: DateTime<Utc>) -> Result<SweepReport> {
        let channel_ids = self.store.list().await?;

        let results: Vec<(u64, Result<bool>)> = stream::iter(channel_ids)
            .map(|channel_id| {
                let service = self.clone();
                async move {
                    let result = service.close_if_expired(channel_id, now).await;
                    (channel_id, result)
                }
            })
            .buffer_unordered(MAX_CONCURRENT_SWEEPS)
            .collect()
            .await;

        let mut report = SweepReport {
            checked: results.len(),
            ..SweepReport::default()
        };
        for (channel_id, result) in results {
            match result {
                Ok(true) => report.closed += 1,
                Ok(false) => {}
                Err(e) => {
                    tracing::error!(channel_id, error = %e, "Failed to close challenge");
                    report.failed += 1;
                }
            }
        }

        if report.closed > 0 || report.failed > 0 {
            tracing::info!(
                checked = report.checked,
                closed = report.closed,
                failed = report.failed,
                "Challenge sweep finished"
            );
        }
        Ok(report)
    }

    /// Run [`Self::sweep`] on a fixed interval until the task is aborted.
    pub fn spawn_sweeper(&self, every: Duration) -> JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(e) = service.sweep(Utc::now()).await {
                    tracing::error!(error = %e, "Challenge sweep failed");
                }
            }
        })
    }
}
