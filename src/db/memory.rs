// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory config store and message board (offline mode for tests).

use crate::db::{BoardError, ConfigStore, MessageBoard, StoreError};
use crate::models::ChannelConfig;
use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Config store backed by a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    configs: DashMap<u64, ChannelConfig>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn load(&self, channel_id: u64) -> Result<Option<ChannelConfig>, StoreError> {
        Ok(self.configs.get(&channel_id).map(|c| c.value().clone()))
    }

    async fn save(&self, config: &ChannelConfig) -> Result<(), StoreError> {
        self.configs.insert(config.channel_id, config.clone());
        Ok(())
    }

    async fn delete(&self, channel_id: u64) -> Result<(), StoreError> {
        self.configs.remove(&channel_id);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<u64>, StoreError> {
        let mut ids: Vec<u64> = self.configs.iter().map(|e| *e.key()).collect();
        ids.sort_unstable();
        Ok(ids)
    }
}

/// Message board backed by a concurrent map.
#[derive(Debug)]
pub struct MemoryMessageBoard {
    messages: DashMap<u64, String>,
    next_id: AtomicU64,
    /// Messages whose edits fail with `Forbidden`.
    forbidden: DashSet<u64>,
    edits: AtomicU64,
    /// Simulated latency of `fetch`, in milliseconds.
    fetch_delay_ms: AtomicU64,
}

impl Default for MemoryMessageBoard {
    fn default() -> Self {
        Self {
            messages: DashMap::new(),
            next_id: AtomicU64::new(1),
            forbidden: DashSet::new(),
            edits: AtomicU64::new(0),
            fetch_delay_ms: AtomicU64::new(0),
        }
    }
}

impl MemoryMessageBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make edits to these messages fail as if the bot lacked permission.
    pub fn set_forbidden(&self, ids: impl IntoIterator<Item = u64>) {
        self.forbidden.clear();
        for id in ids {
            self.forbidden.insert(id);
        }
    }

    /// Make every `fetch` sleep first, so concurrent callers interleave.
    pub fn set_fetch_delay(&self, delay: Duration) {
        self.fetch_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// Number of successful edits so far.
    pub fn edit_count(&self) -> u64 {
        self.edits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessageBoard for MemoryMessageBoard {
    async fn post(&self, content: &str) -> Result<u64, BoardError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.messages.insert(id, content.to_string());
        Ok(id)
    }

    async fn fetch(&self, message_id: u64) -> Result<String, BoardError> {
        let delay = self.fetch_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        self.messages
            .get(&message_id)
            .map(|m| m.value().clone())
            .ok_or(BoardError::NotFound)
    }

    async fn edit(&self, message_id: u64, content: &str) -> Result<(), BoardError> {
        if self.forbidden.contains(&message_id) {
            return Err(BoardError::Forbidden(format!(
                "message {} is read-only",
                message_id
            )));
        }

        let mut message = self
            .messages
            .get_mut(&message_id)
            .ok_or(BoardError::NotFound)?;
        *message = content.to_string();
        self.edits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
