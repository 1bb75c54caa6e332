// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Driver identity resolution against a channel's driver mapping.

use crate::models::{DriverMapping, ExtractedResult, ResolvedResult};

/// Resolve recognized driver names to canonical drivers and account handles.
///
/// With an empty mapping, the first batch defines the channel's drivers:
/// every name is accepted and recorded against `fallback_handle` (the author
/// of the screenshot). Once any driver is known, names that do not match an
/// existing driver (case-insensitively) are dropped, which keeps OCR noise
/// and other players' rows in a shared screenshot off the board.
pub fn resolve_identities(
    results: &[ExtractedResult],
    mapping: &mut DriverMapping,
    fallback_handle: &str,
) -> Vec<ResolvedResult> {
    if mapping.is_empty() {
        return register_first_batch(results, mapping, fallback_handle);
    }

    results
        .iter()
        .filter_map(|result| match mapping.find(&result.driver_name) {
            Some((canonical, handle)) => {
                Some(ResolvedResult::new(canonical, handle, result.time))
            }
            None => {
                tracing::debug!(
                    driver = %result.driver_name,
                    "Ignoring result for unknown driver"
                );
                None
            }
        })
        .collect()
}

fn register_first_batch(
    results: &[ExtractedResult],
    mapping: &mut DriverMapping,
    fallback_handle: &str,
) -> Vec<ResolvedResult> {
    let mut resolved = Vec::with_capacity(results.len());

    for result in results {
        // Same name in another case within this batch maps to the first spelling.
        let canonical = match mapping.find(&result.driver_name) {
            Some((canonical, _)) => canonical.to_string(),
            None => {
                mapping.insert(result.driver_name.clone(), fallback_handle);
                tracing::info!(
                    driver = %result.driver_name,
                    handle = fallback_handle,
                    "Registered new driver"
                );
                result.driver_name.clone()
            }
        };

        resolved.push(ResolvedResult::new(canonical, fallback_handle, result.time));
    }

    resolved
}
