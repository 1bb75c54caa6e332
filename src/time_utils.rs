// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Challenge window and local-time helpers.
//!
//! Challenges close at 19:00 German time on the date encoded at the end of
//! the channel label (`...-DD-MM-YY`). All wall-clock logic lives here and
//! takes `now` as a parameter so it can be tested without a real clock.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::{Europe::Berlin, Tz};
use once_cell::sync::Lazy;
use regex::Regex;

/// Time zone the challenge schedule is defined in.
pub const CHALLENGE_TZ: Tz = Berlin;

/// Local time of day at which a challenge closes.
pub const CHALLENGE_END_HOUR: u32 = 19;

/// Header that replaces the "as of" line once a challenge is over.
pub const FINAL_HEADER: &str = "Endstand";

static LABEL_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{2}-\d{2}-\d{2})$").expect("static date regex is valid"));

/// Format the leaderboard's "as of" timestamp in German local time.
pub fn format_as_of(date: DateTime<Utc>) -> String {
    date.with_timezone(&CHALLENGE_TZ)
        .format("%d.%m.%y um %H:%M")
        .to_string()
}

/// Closing instant encoded in a channel label, if any.
///
/// A missing or unparsable date means the challenge never closes.
pub fn closing_instant(channel_label: &str) -> Option<DateTime<Tz>> {
    let caps = LABEL_DATE_RE.captures(channel_label)?;
    let date_str = &caps[1];

    let date = match NaiveDate::parse_from_str(date_str, "%d-%m-%y") {
        Ok(date) => date,
        Err(e) => {
            tracing::warn!(
                label = channel_label,
                date = date_str,
                error = %e,
                "Invalid date in channel label; treating challenge as open"
            );
            return None;
        }
    };

    let end_time = NaiveTime::from_hms_opt(CHALLENGE_END_HOUR, 0, 0)?;
    CHALLENGE_TZ
        .from_local_datetime(&date.and_time(end_time))
        .earliest()
}

/// Whether a challenge is still accepting results at `now`.
pub fn is_active_at(channel_label: &str, now: DateTime<Utc>) -> bool {
    match closing_instant(channel_label) {
        Some(end) => now < end.with_timezone(&Utc),
        None => true,
    }
}

/// Whether a challenge is still accepting results right now.
pub fn is_active(channel_label: &str) -> bool {
    is_active_at(channel_label, Utc::now())
}

/// Mark a rendered leaderboard as final by replacing its header line.
pub fn close_leaderboard(content: &str) -> String {
    let mut lines: Vec<&str> = content.split('\n').collect();
    // split always yields at least one element
    lines[0] = FINAL_HEADER;
    lines.join("\n")
}
