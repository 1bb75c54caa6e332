// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Result extraction from recognized screenshot text.
//!
//! Each line is handled on its own:
//! 1. Find the first time-shaped substring (`M:SS.mmm`)
//! 2. Take every whitespace-separated token before the token holding it as
//!    the driver name
//! 3. Drop the line if there is no name or the time fails strict parsing
//!
//! OCR output is unreliable, so nothing here is an error: unusable lines are
//! skipped and empty input simply yields no results.

use crate::models::race_time::TIME_PATTERN;
use crate::models::{ExtractedResult, RaceTime};
use once_cell::sync::Lazy;
use regex::Regex;

static TIME_SEARCH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(TIME_PATTERN).expect("static time regex is valid"));

/// Extract every (driver, time) pair from a block of recognized text.
pub fn extract_results(text: &str) -> Vec<ExtractedResult> {
    let results: Vec<ExtractedResult> = text.lines().filter_map(extract_line).collect();

    if results.is_empty() {
        tracing::debug!(chars = text.len(), "No race results found in recognized text");
    }

    results
}

/// Extract a single result from one line, if it has one.
fn extract_line(line: &str) -> Option<ExtractedResult> {
    let found = TIME_SEARCH_RE.find(line)?;

    // Everything before the match, minus the partial token the time is glued
    // to (e.g. the "abc" of "abc1:23.456").
    let prefix = &line[..found.start()];
    let mut name_tokens: Vec<&str> = prefix.split_whitespace().collect();
    if prefix.ends_with(|c: char| !c.is_whitespace()) {
        name_tokens.pop();
    }

    let driver_name = name_tokens.join(" ").trim().to_string();
    if driver_name.is_empty() {
        return None;
    }

    let time = match RaceTime::parse(found.as_str()) {
        Ok(time) => time,
        Err(e) => {
            tracing::debug!(line, error = %e, "Skipping line with malformed time");
            return None;
        }
    };

    tracing::debug!(driver = %driver_name, time = %time, "Extracted race result");
    Some(ExtractedResult { driver_name, time })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(text: &str) -> Vec<(String, String)> {
        extract_results(text)
            .into_iter()
            .map(|r| (r.driver_name, r.time.to_string()))
            .collect()
    }

    #[test]
    fn test_extracts_name_and_time_per_line() {
        let text = "Max 1:23.456\ngarbage line\nAlex 1:30.000";
        assert_eq!(
            pairs(text),
            vec![
                ("Max".to_string(), "1:23.456".to_string()),
                ("Alex".to_string(), "1:30.000".to_string()),
            ]
        );
    }

    #[test]
    fn test_multi_word_names_are_joined_with_single_spaces() {
        assert_eq!(
            pairs("  Lena   van  Berg    0:58.100  3 laps"),
            vec![("Lena van Berg".to_string(), "0:58.100".to_string())]
        );
    }

    #[test]
    fn test_line_with_only_a_time_is_dropped() {
        assert!(extract_results("1:23.456").is_empty());
        assert!(extract_results("   1:23.456   best").is_empty());
    }

    #[test]
    fn test_token_glued_to_time_is_not_part_of_the_name() {
        assert_eq!(
            pairs("Max P1:23.456"),
            vec![("Max".to_string(), "1:23.456".to_string())]
        );
        assert!(extract_results("P1:23.456").is_empty());
    }

    #[test]
    fn test_only_first_time_on_a_line_is_used() {
        assert_eq!(
            pairs("Max 1:23.456 1:20.000"),
            vec![("Max".to_string(), "1:23.456".to_string())]
        );
    }

    #[test]
    fn test_out_of_range_seconds_drop_only_that_line() {
        let text = "A 1:01.000\nB 1:75.000\nC 1:02.000\nD 1:03.000\nE 1:04.000";
        let names: Vec<String> = extract_results(text)
            .into_iter()
            .map(|r| r.driver_name)
            .collect();
        assert_eq!(names, vec!["A", "C", "D", "E"]);
    }

    #[test]
    fn test_empty_and_garbled_input_yield_nothing() {
        assert!(extract_results("").is_empty());
        assert!(extract_results("\n\n  \n").is_empty());
        assert!(extract_results("|||| ::: .... 12:3.45").is_empty());
    }

    #[test]
    fn test_no_dedup_and_order_preserved() {
        let text = "Max 1:30.000\r\nAlex 1:25.000\r\nMax 1:20.000";
        assert_eq!(
            pairs(text),
            vec![
                ("Max".to_string(), "1:30.000".to_string()),
                ("Alex".to_string(), "1:25.000".to_string()),
                ("Max".to_string(), "1:20.000".to_string()),
            ]
        );
    }

    #[test]
    fn test_umlauts_in_names() {
        assert_eq!(
            pairs("Jürgen Öz 2:01.009"),
            vec![("Jürgen Öz".to_string(), "2:01.009".to_string())]
        );
    }
}
