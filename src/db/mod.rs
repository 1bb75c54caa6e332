// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storage seams: channel configs and the published leaderboard messages.
//!
//! The challenge logic only needs load/save/delete by channel id and
//! fetch/edit by message id, so both are traits with a file-backed
//! implementation for the server and an in-memory one for tests.

pub mod file;
pub mod memory;

pub use file::{FileConfigStore, FileMessageBoard};
pub use memory::{MemoryConfigStore, MemoryMessageBoard};

use crate::models::ChannelConfig;
use async_trait::async_trait;

/// Keyed store for channel configurations.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load a channel's config; `None` if the channel has no challenge.
    async fn load(&self, channel_id: u64) -> Result<Option<ChannelConfig>, StoreError>;

    /// Create or replace a channel's config.
    async fn save(&self, config: &ChannelConfig) -> Result<(), StoreError>;

    /// Remove a channel's config. Removing a missing config is not an error.
    async fn delete(&self, channel_id: u64) -> Result<(), StoreError>;

    /// Ids of every channel with a stored config.
    async fn list(&self) -> Result<Vec<u64>, StoreError>;
}

/// Where leaderboards are published.
#[async_trait]
pub trait MessageBoard: Send + Sync {
    /// Publish a new message and return its id.
    async fn post(&self, content: &str) -> Result<u64, BoardError>;

    /// Current text of a message.
    async fn fetch(&self, message_id: u64) -> Result<String, BoardError>;

    /// Replace the text of an existing message.
    async fn edit(&self, message_id: u64, content: &str) -> Result<(), BoardError>;
}

/// Config store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt config for channel {channel_id}: {source}")]
    Corrupt {
        channel_id: u64,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Message board errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("Message not found")]
    NotFound,

    #[error("Not allowed to modify message: {0}")]
    Forbidden(String),

    #[error("Message board I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for BoardError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => BoardError::NotFound,
            std::io::ErrorKind::PermissionDenied => BoardError::Forbidden(err.to_string()),
            _ => BoardError::Io(err.to_string()),
        }
    }
}
