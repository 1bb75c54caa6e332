// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard text codec.
//!
//! The rendered leaderboard is the message body published in the challenge
//! channel, and it is also the only persisted copy of the standings: every
//! update parses the current message back into entries first.
//!
//! ```text
//! Stand: 18.10.26 um 14:05
//! 🥇 | 1:20.000 | 25 Punkte | Max (max#123)
//! 🥈 | 1:21.500 | 22 Punkte | Alex
//! 4. | 1:30.000 | 18 Punkte | Lena
//! ```

use crate::models::leaderboard::{identifier_from_display_name, single_line};
use crate::models::race_time::TIME_PATTERN;
use crate::models::{LeaderboardEntry, RaceTime};
use crate::time_utils::format_as_of;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Medals for ranks 1-3.
const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

/// Points by rank (1-indexed); every rank past the table scores 1.
const POINTS: [u32; 13] = [25, 22, 20, 18, 16, 14, 12, 10, 8, 6, 4, 2, 1];

/// Unit label after the points value.
pub const POINTS_LABEL: &str = "Punkte";

/// Prefix of the "as of" header line.
pub const HEADER_PREFIX: &str = "Stand:";

static ENTRY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?:🥇|🥈|🥉|\d+\.)\s*\|\s*({})\s*\|\s*\d+\s*{}\s*\|\s*(.+)",
        TIME_PATTERN, POINTS_LABEL
    ))
    .expect("static leaderboard regex is valid")
});

/// Points awarded for a 1-indexed rank.
pub fn points_for_rank(rank: usize) -> u32 {
    rank.checked_sub(1)
        .and_then(|i| POINTS.get(i))
        .copied()
        .unwrap_or(1)
}

/// Rank marker: a medal for the podium, `N.` otherwise.
fn rank_symbol(rank: usize) -> String {
    match rank {
        1..=3 => MEDALS[rank - 1].to_string(),
        _ => format!("{}.", rank),
    }
}

/// Parse rendered leaderboard text back into entries, in rendered order.
///
/// Lines that are not entry rows (the header, blank lines, anything a human
/// edited in) are ignored, as are rows whose time no longer parses.
pub fn parse_leaderboard(content: &str) -> Vec<LeaderboardEntry> {
    content.lines().filter_map(parse_entry_line).collect()
}

fn parse_entry_line(line: &str) -> Option<LeaderboardEntry> {
    let caps = ENTRY_RE.captures(line)?;
    let time = RaceTime::parse(&caps[1]).ok()?;
    let display_name = caps[2].trim().to_string();

    let identifier = identifier_from_display_name(&display_name);

    Some(LeaderboardEntry {
        identifier,
        display_name,
        time,
    })
}

/// Render ranked entries under an "as of" header.
///
/// Entries must already be sorted; rank is position in the slice. Display
/// names are flattened to one line so every entry stays one row.
pub fn render_leaderboard(entries: &[LeaderboardEntry], as_of: DateTime<Utc>) -> String {
    let mut content = format!("{} {}\n", HEADER_PREFIX, format_as_of(as_of));

    for (i, entry) in entries.iter().enumerate() {
        let rank = i + 1;
        content.push_str(&format!(
            "{} | {} | {} {} | {}\n",
            rank_symbol(rank),
            entry.time,
            points_for_rank(rank),
            POINTS_LABEL,
            single_line(&entry.display_name)
        ));
    }

    content
}

/// Build an entry the way a freshly rendered row would parse.
#[cfg(test)]
pub(crate) fn entry_for(driver_name: &str, account_handle: &str, time: RaceTime) -> LeaderboardEntry {
    LeaderboardEntry {
        identifier: crate::models::leaderboard::entry_identifier(driver_name, account_handle),
        display_name: crate::models::leaderboard::entry_display_name(driver_name, account_handle),
        time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn time(s: &str) -> RaceTime {
        RaceTime::parse(s).unwrap()
    }

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 5, 0).unwrap()
    }

    #[test]
    fn test_points_table() {
        assert_eq!(points_for_rank(1), 25);
        assert_eq!(points_for_rank(2), 22);
        assert_eq!(points_for_rank(13), 1);
        assert_eq!(points_for_rank(14), 1);
        assert_eq!(points_for_rank(100), 1);
    }

    #[test]
    fn test_render_layout() {
        let entries = vec![
            entry_for("Max", "max#123", time("1:20.000")),
            entry_for("Alex", "alex", time("1:21.500")),
            entry_for("Lena", "", time("1:22.000")),
            entry_for("Tom", "tommy", time("1:30.000")),
        ];

        let text = render_leaderboard(&entries, as_of());
        let lines: Vec<&str> = text.lines().collect();

        // 12:05 UTC is 14:05 in Berlin (CEST)
        assert_eq!(lines[0], "Stand: 18.10.26 um 14:05");
        assert_eq!(lines[1], "🥇 | 1:20.000 | 25 Punkte | Max (max#123)");
        assert_eq!(lines[2], "🥈 | 1:21.500 | 22 Punkte | Alex");
        assert_eq!(lines[3], "🥉 | 1:22.000 | 20 Punkte | Lena");
        assert_eq!(lines[4], "4. | 1:30.000 | 18 Punkte | Tom (tommy)");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_render_empty_board_is_header_only() {
        let text = render_leaderboard(&[], as_of());
        assert_eq!(text, "Stand: 18.10.26 um 14:05\n");
        assert!(parse_leaderboard(&text).is_empty());
    }

    #[test]
    fn test_parse_ignores_header_and_noise() {
        let text = "Stand: 01.01.26 um 10:00\n\
                    Welcome to the challenge!\n\
                    🥇 | 1:20.000 | 25 Punkte | Max (max#123)\n\
                    \n\
                    2. | 1:25.000 | 22 Punkte | Alex\n";
        let entries = parse_leaderboard(text);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].identifier, "Max_max#123");
        assert_eq!(entries[0].display_name, "Max (max#123)");
        assert_eq!(entries[0].time, time("1:20.000"));
        assert_eq!(entries[1].identifier, "Alex");
    }

    #[test]
    fn test_parse_tolerates_spacing_changes() {
        let entries = parse_leaderboard("🥉|1:22.000|20 Punkte|  Lena (lena_k)  ");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].display_name, "Lena (lena_k)");
        assert_eq!(entries[0].identifier, "Lena_lena_k");
    }

    #[test]
    fn test_parse_skips_rows_with_invalid_time() {
        assert!(parse_leaderboard("4. | 1:61.000 | 18 Punkte | Tom").is_empty());
    }

    #[test]
    fn test_round_trip_preserves_entries() {
        let entries = vec![
            entry_for("Max", "max#123", time("1:20.000")),
            entry_for("alex", "Alex", time("1:20.000")),
            entry_for("Lena van Berg", "lvb", time("01:21.000")),
            entry_for("Solo", "", time("1:40.250")),
        ];
        let mut long = entries.clone();
        for i in 0..12 {
            long.push(entry_for(&format!("Driver{}", i), "", time("2:00.000")));
        }

        for list in [entries, long] {
            let parsed = parse_leaderboard(&render_leaderboard(&list, as_of()));
            assert_eq!(parsed, list);
        }
    }

    #[test]
    fn test_round_trip_with_punctuated_names() {
        let entries = vec![
            entry_for("Max (Pro)", "", time("1:20.000")),
            entry_for("Max (Pro)", "max#1", time("1:21.000")),
            entry_for("A | B", "ab", time("1:22.000")),
            entry_for("(x)", "", time("1:23.000")),
            entry_for("Tom)", "t(o)m", time("1:24.000")),
            entry_for("Kim", "1. | 0:00.001 | 25 Punkte | K", time("1:25.000")),
        ];

        let parsed = parse_leaderboard(&render_leaderboard(&entries, as_of()));
        assert_eq!(parsed, entries);
    }

    #[test]
    fn test_render_flattens_multiline_display_names() {
        let entries = vec![LeaderboardEntry {
            identifier: "Max".to_string(),
            display_name: "Max\n🥇 | 0:00.001 | 25 Punkte | Forged".to_string(),
            time: time("1:23.456"),
        }];

        let text = render_leaderboard(&entries, as_of());
        assert_eq!(text.lines().count(), 2);

        let parsed = parse_leaderboard(&text);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].time, time("1:23.456"));
        assert_eq!(
            parsed[0].display_name,
            "Max 🥇 | 0:00.001 | 25 Punkte | Forged"
        );
    }
}
