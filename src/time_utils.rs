// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for parsing activity timestamps.

use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// Accepted layouts for timestamps without a UTC offset.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an activity start date.
///
/// RFC 3339 timestamps keep their offset, so the calendar date is the
/// athlete's local date. Timestamps without an offset are taken as UTC.
pub fn parse_start_date(raw: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TimestampError::Empty);
    }

    let rfc3339_err = match DateTime::parse_from_rfc3339(trimmed) {
        Ok(date) => return Ok(date),
        Err(e) => e,
    };

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc().fixed_offset())
        .ok_or_else(|| TimestampError::Invalid {
            raw: trimmed.to_string(),
            reason: rfc3339_err.to_string(),
        })
}

/// Timestamp parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    #[error("Missing start date")]
    Empty,

    #[error("Invalid start date '{raw}': {reason}")]
    Invalid { raw: String, reason: String },
}
