// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! ISO-8601 week resolution.

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, TimeZone};

use crate::models::WeekKey;

/// Resolve the ISO week of a calendar date.
///
/// Shifts the date to the Thursday of its Monday-to-Sunday week; that
/// Thursday's year is the ISO year and its ordinal day gives the week.
pub fn week_key_for_date(date: NaiveDate) -> WeekKey {
    let weekday = i64::from(date.weekday().number_from_monday());
    let thursday = date + TimeDelta::days(4 - weekday);
    WeekKey {
        iso_year: thursday.year(),
        iso_week: thursday.ordinal().div_ceil(7),
    }
}

/// Resolve the ISO week of a timestamp, using its local calendar date.
pub fn resolve_week_key<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> WeekKey {
    week_key_for_date(timestamp.date_naive())
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_since_monday = i64::from(date.weekday().num_days_from_monday());
    date - TimeDelta::days(days_since_monday)
}
