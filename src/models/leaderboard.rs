// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard entries and the result records that feed them.

use crate::models::RaceTime;

/// A (driver, time) pair read from one line of recognized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedResult {
    /// Driver name exactly as recognized (whitespace collapsed)
    pub driver_name: String,
    pub time: RaceTime,
}

/// A result after identity resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResult {
    /// Canonical driver name from the channel's mapping
    pub driver_name: String,
    /// Platform account handle the driver is mapped to
    pub account_handle: String,
    pub time: RaceTime,
}

impl ResolvedResult {
    pub fn new(driver_name: impl Into<String>, account_handle: impl Into<String>, time: RaceTime) -> Self {
        Self {
            driver_name: driver_name.into(),
            account_handle: account_handle.into(),
            time,
        }
    }

    /// Stable leaderboard key for this driver/account pair.
    pub fn identifier(&self) -> String {
        entry_identifier(&self.driver_name, &self.account_handle)
    }

    /// Human-readable name shown on the leaderboard.
    pub fn display_name(&self) -> String {
        entry_display_name(&self.driver_name, &self.account_handle)
    }
}

/// One ranked row of a leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub identifier: String,
    pub display_name: String,
    pub time: RaceTime,
}

impl LeaderboardEntry {
    /// Build an entry from a resolved result.
    pub fn from_result(result: &ResolvedResult) -> Self {
        Self {
            identifier: result.identifier(),
            display_name: result.display_name(),
            time: result.time,
        }
    }
}

/// Whether the handle adds information beyond the driver name.
fn handle_is_distinct(driver_name: &str, account_handle: &str) -> bool {
    !account_handle.is_empty() && driver_name.to_lowercase() != account_handle.to_lowercase()
}

/// `driver_handle`, or the bare driver name when the handle is empty or the
/// same name in another case.
pub fn entry_identifier(driver_name: &str, account_handle: &str) -> String {
    identifier_from_display_name(&entry_display_name(driver_name, account_handle))
}

/// `Driver (handle)`, or just the driver name.
///
/// Control characters become spaces and runs of whitespace collapse, so the
/// result always fits on one leaderboard row.
pub fn entry_display_name(driver_name: &str, account_handle: &str) -> String {
    let driver_name = single_line(driver_name);
    let account_handle = single_line(account_handle);
    if handle_is_distinct(&driver_name, &account_handle) {
        format!("{} ({})", driver_name, account_handle)
    } else {
        driver_name
    }
}

/// Leaderboard key for a rendered display name.
///
/// Merging and parsing both derive keys here, so an entry read back from the
/// board always matches the result that produced it.
pub fn identifier_from_display_name(display_name: &str) -> String {
    let display_name = single_line(display_name);
    match split_display_name(&display_name) {
        Some((driver, handle)) => format!("{}_{}", driver, handle),
        None => display_name,
    }
}

/// Split `Driver (handle)` at the last ` (` when the name ends in `)`.
fn split_display_name(display_name: &str) -> Option<(&str, &str)> {
    let inner = display_name.strip_suffix(')')?;
    let open = inner.rfind(" (")?;
    let driver = inner[..open].trim();
    let handle = inner[open + 2..].trim();
    if driver.is_empty() || handle.is_empty() {
        return None;
    }
    Some((driver, handle))
}

/// Replace control characters with spaces and collapse whitespace.
pub fn single_line(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c.is_control())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
