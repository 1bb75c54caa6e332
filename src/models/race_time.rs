// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Race time value type (`M:SS.mmm` / `MM:SS.mmm`).

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Pattern for locating a time inside free text.
pub const TIME_PATTERN: &str = r"\d{1,2}:\d{2}\.\d{3}";

/// Sort key for anything that is not a valid race time.
///
/// Greater than every valid value, so invalid times always rank last and
/// never win a comparison.
pub const INVALID_MILLIS: u64 = u64::MAX;

static STRICT_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{2})\.(\d{3})$").expect("static time regex is valid")
});

/// A lap time with millisecond resolution.
///
/// Equality and ordering use the total millisecond value only; the minute
/// width is a rendering detail.
#[derive(Debug, Clone, Copy)]
pub struct RaceTime {
    minutes: u8,
    seconds: u8,
    millis: u16,
    /// Minutes were given as two digits (`07:...`), so render them that way.
    wide_minutes: bool,
}

impl RaceTime {
    /// Build a time from its parts. Returns `None` when a field is out of range.
    pub fn new(minutes: u8, seconds: u8, millis: u16) -> Option<Self> {
        if minutes > 99 || seconds > 59 || millis > 999 {
            return None;
        }
        Some(Self {
            minutes,
            seconds,
            millis,
            wide_minutes: minutes >= 10,
        })
    }

    /// Strictly parse a whole string as a race time.
    pub fn parse(text: &str) -> Result<Self, TimeError> {
        let caps = STRICT_TIME_RE
            .captures(text)
            .ok_or_else(|| TimeError::Malformed(text.to_string()))?;

        // The regex guarantees ASCII digits of bounded width, so these parses
        // cannot overflow.
        let minutes_str = &caps[1];
        let minutes: u8 = minutes_str
            .parse()
            .map_err(|_| TimeError::Malformed(text.to_string()))?;
        let seconds: u8 = caps[2]
            .parse()
            .map_err(|_| TimeError::Malformed(text.to_string()))?;
        let millis: u16 = caps[3]
            .parse()
            .map_err(|_| TimeError::Malformed(text.to_string()))?;

        if seconds > 59 {
            return Err(TimeError::SecondsOutOfRange(text.to_string()));
        }

        Ok(Self {
            minutes,
            seconds,
            millis,
            wide_minutes: minutes_str.len() == 2,
        })
    }

    /// Total duration in milliseconds.
    pub fn total_millis(&self) -> u64 {
        u64::from(self.minutes) * 60_000 + u64::from(self.seconds) * 1_000 + u64::from(self.millis)
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    pub fn millis(&self) -> u16 {
        self.millis
    }
}

/// Millisecond sort key for a time string; [`INVALID_MILLIS`] when malformed.
pub fn time_to_millis(text: &str) -> u64 {
    RaceTime::parse(text)
        .map(|t| t.total_millis())
        .unwrap_or(INVALID_MILLIS)
}

impl fmt::Display for RaceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.wide_minutes {
            write!(f, "{:02}:{:02}.{:03}", self.minutes, self.seconds, self.millis)
        } else {
            write!(f, "{}:{:02}.{:03}", self.minutes, self.seconds, self.millis)
        }
    }
}

impl FromStr for RaceTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq for RaceTime {
    fn eq(&self, other: &Self) -> bool {
        self.total_millis() == other.total_millis()
    }
}

impl Eq for RaceTime {}

impl PartialOrd for RaceTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RaceTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_millis().cmp(&other.total_millis())
    }
}

/// Errors from strict time parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeError {
    #[error("Malformed race time: {0:?}")]
    Malformed(String),

    #[error("Seconds out of range in race time: {0:?}")]
    SecondsOutOfRange(String),
}
