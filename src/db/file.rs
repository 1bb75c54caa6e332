// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-backed config store and message board.
//!
//! Layout under the data directory:
//! - `channels/channel_{id}.json`: one pretty-printed config per channel
//! - `messages/message_{id}.txt`: one leaderboard message per file
//!
//! Writes go to a `.tmp` sibling and are renamed into place so a crash never
//! leaves a half-written file behind.

use crate::db::{BoardError, ConfigStore, MessageBoard, StoreError};
use crate::models::ChannelConfig;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;

const CHANNEL_PREFIX: &str = "channel_";
const CHANNEL_SUFFIX: &str = ".json";
const MESSAGE_PREFIX: &str = "message_";
const MESSAGE_SUFFIX: &str = ".txt";

/// Write `contents` to `path` via a temp file and rename.
async fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents).await?;
    fs::rename(&tmp, path).await
}

/// Parse `{prefix}{id}{suffix}` file names.
fn parse_id(file_name: &str, prefix: &str, suffix: &str) -> Option<u64> {
    file_name
        .strip_prefix(prefix)?
        .strip_suffix(suffix)?
        .parse()
        .ok()
}

/// Ids of all files in `dir` named `{prefix}{id}{suffix}`.
async fn list_ids(dir: &Path, prefix: &str, suffix: &str) -> std::io::Result<Vec<u64>> {
    let mut ids = Vec::new();
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ids),
        Err(e) => return Err(e),
    };

    while let Some(entry) = entries.next_entry().await? {
        if let Some(id) = entry
            .file_name()
            .to_str()
            .and_then(|name| parse_id(name, prefix, suffix))
        {
            ids.push(id);
        }
    }

    ids.sort_unstable();
    Ok(ids)
}

// ─── Config Store ────────────────────────────────────────────

/// Channel configs as JSON files.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    dir: PathBuf,
}

impl FileConfigStore {
    /// Open (creating if needed) a config directory.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        tracing::info!(path = %dir.display(), "Opened channel config store");
        Ok(Self { dir })
    }

    fn path_for(&self, channel_id: u64) -> PathBuf {
        self.dir
            .join(format!("{}{}{}", CHANNEL_PREFIX, channel_id, CHANNEL_SUFFIX))
    }
}

#[async_trait]
impl ConfigStore for FileConfigStore {
    async fn load(&self, channel_id: u64) -> Result<Option<ChannelConfig>, StoreError> {
        let raw = match fs::read_to_string(self.path_for(channel_id)).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Corrupt { channel_id, source })
    }

    async fn save(&self, config: &ChannelConfig) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(config).map_err(StoreError::Serialize)?;
        write_atomic(&self.path_for(config.channel_id), &json).await?;
        tracing::debug!(channel_id = config.channel_id, "Saved channel config");
        Ok(())
    }

    async fn delete(&self, channel_id: u64) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(channel_id)).await {
            Ok(()) => {
                tracing::info!(channel_id, "Removed channel config");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> Result<Vec<u64>, StoreError> {
        Ok(list_ids(&self.dir, CHANNEL_PREFIX, CHANNEL_SUFFIX).await?)
    }
}

// ─── Message Board ───────────────────────────────────────────

/// Leaderboard messages as text files.
#[derive(Debug)]
pub struct FileMessageBoard {
    dir: PathBuf,
    next_id: AtomicU64,
}

impl FileMessageBoard {
    /// Open (creating if needed) a message directory.
    ///
    /// New message ids continue after the highest id already on disk.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, BoardError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        let highest = list_ids(&dir, MESSAGE_PREFIX, MESSAGE_SUFFIX)
            .await?
            .last()
            .copied()
            .unwrap_or(0);

        tracing::info!(path = %dir.display(), highest, "Opened message board");
        Ok(Self {
            dir,
            next_id: AtomicU64::new(highest + 1),
        })
    }

    fn path_for(&self, message_id: u64) -> PathBuf {
        self.dir
            .join(format!("{}{}{}", MESSAGE_PREFIX, message_id, MESSAGE_SUFFIX))
    }
}

#[async_trait]
impl MessageBoard for FileMessageBoard {
    async fn post(&self, content: &str) -> Result<u64, BoardError> {
        let message_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        write_atomic(&self.path_for(message_id), content.as_bytes()).await?;
        tracing::info!(message_id, "Posted message");
        Ok(message_id)
    }

    async fn fetch(&self, message_id: u64) -> Result<String, BoardError> {
        Ok(fs::read_to_string(self.path_for(message_id)).await?)
    }

    async fn edit(&self, message_id: u64, content: &str) -> Result<(), BoardError> {
        let path = self.path_for(message_id);
        // Editing never creates a message.
        fs::metadata(&path).await?;
        write_atomic(&path, content.as_bytes()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("carrera-file-test-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("channel_42.json", CHANNEL_PREFIX, CHANNEL_SUFFIX), Some(42));
        assert_eq!(parse_id("channel_x.json", CHANNEL_PREFIX, CHANNEL_SUFFIX), None);
        assert_eq!(parse_id("channel_42.json.tmp", CHANNEL_PREFIX, CHANNEL_SUFFIX), None);
        assert_eq!(parse_id("message_7.txt", MESSAGE_PREFIX, MESSAGE_SUFFIX), Some(7));
    }

    #[tokio::test]
    async fn test_config_store_round_trip() {
        let dir = temp_dir();
        let store = FileConfigStore::open(&dir).await.unwrap();

        let mut config = ChannelConfig::new(42, 7, "hotlap-01-01-30");
        config.driver_mappings.insert("Max", "max#123");
        store.save(&config).await.unwrap();

        assert_eq!(store.load(42).await.unwrap(), Some(config));
        assert_eq!(store.load(43).await.unwrap(), None);
        assert_eq!(store.list().await.unwrap(), vec![42]);

        store.delete(42).await.unwrap();
        store.delete(42).await.unwrap();
        assert_eq!(store.load(42).await.unwrap(), None);
        assert!(store.list().await.unwrap().is_empty());

        let _ = fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_corrupt_config_is_an_error() {
        let dir = temp_dir();
        let store = FileConfigStore::open(&dir).await.unwrap();
        fs::write(dir.join("channel_5.json"), "{not json").await.unwrap();

        let err = store.load(5).await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { channel_id: 5, .. }));

        let _ = fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_message_board_post_fetch_edit() {
        let dir = temp_dir();
        let board = FileMessageBoard::open(&dir).await.unwrap();

        let id = board.post("Stand: -\n").await.unwrap();
        assert_eq!(board.fetch(id).await.unwrap(), "Stand: -\n");

        board.edit(id, "Endstand\n").await.unwrap();
        assert_eq!(board.fetch(id).await.unwrap(), "Endstand\n");

        assert_eq!(board.fetch(id + 100).await, Err(BoardError::NotFound));
        assert_eq!(board.edit(id + 100, "x").await, Err(BoardError::NotFound));

        // Ids continue after a reopen
        let reopened = FileMessageBoard::open(&dir).await.unwrap();
        assert!(reopened.post("next").await.unwrap() > id);

        let _ = fs::remove_dir_all(&dir).await;
    }
}
