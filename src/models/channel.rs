// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-channel challenge configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Driver name → account handle mapping for one channel.
///
/// Keys keep the case they were first seen with; lookups ignore case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverMapping(BTreeMap<String, String>);

impl DriverMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Case-insensitive lookup. Returns the canonical name and its handle.
    pub fn find(&self, driver_name: &str) -> Option<(&str, &str)> {
        let wanted = driver_name.to_lowercase();
        self.0
            .iter()
            .find(|(name, _)| name.to_lowercase() == wanted)
            .map(|(name, handle)| (name.as_str(), handle.as_str()))
    }

    /// Record a driver. An existing handle for the exact key is overwritten.
    pub fn insert(&mut self, driver_name: impl Into<String>, account_handle: impl Into<String>) {
        self.0.insert(driver_name.into(), account_handle.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DriverMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Stored configuration for a channel running a challenge.
///
/// Stored as `channel_{channel_id}.json` by the file store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub channel_id: u64,
    /// Message holding the rendered leaderboard
    pub leaderboard_post_id: u64,
    /// Channel label; a trailing `DD-MM-YY` sets the closing date
    #[serde(default)]
    pub channel_name: String,
    #[serde(default)]
    pub driver_mappings: DriverMapping,
    /// Cleared once when the challenge window closes
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl ChannelConfig {
    pub fn new(channel_id: u64, leaderboard_post_id: u64, channel_name: impl Into<String>) -> Self {
        Self {
            channel_id,
            leaderboard_post_id,
            channel_name: channel_name.into(),
            driver_mappings: DriverMapping::new(),
            is_active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_is_case_insensitive_and_returns_canonical_name() {
        let mut mapping = DriverMapping::new();
        mapping.insert("MaxPower", "max#123");

        assert_eq!(mapping.find("maxpower"), Some(("MaxPower", "max#123")));
        assert_eq!(mapping.find("MAXPOWER"), Some(("MaxPower", "max#123")));
        assert_eq!(mapping.find("Max"), None);
    }

    #[test]
    fn test_config_json_uses_stored_field_names() {
        let mut config = ChannelConfig::new(42, 4242, "hotlap-24-12-26");
        config.driver_mappings.insert("Max", "max#123");

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["channel_id"], 42);
        assert_eq!(json["leaderboard_post_id"], 4242);
        assert_eq!(json["driver_mappings"]["Max"], "max#123");
        assert_eq!(json["is_active"], true);
    }

    #[test]
    fn test_config_defaults_for_missing_fields() {
        let config: ChannelConfig =
            serde_json::from_str(r#"{"channel_id": 1, "leaderboard_post_id": 2}"#).unwrap();

        assert!(config.is_active);
        assert!(config.driver_mappings.is_empty());
        assert_eq!(config.channel_name, "");
    }
}
