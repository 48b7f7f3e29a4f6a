// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity record as supplied by the data source.

use serde::{Deserialize, Serialize};

/// Immutable activity snapshot consumed by the aggregation engine.
///
/// Field names follow the Strava activity list payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Strava activity ID
    pub id: u64,
    /// Activity name/title
    #[serde(default)]
    pub name: String,
    /// Distance in the caller's unit system (km or mi)
    pub distance: f64,
    /// Moving time in seconds
    pub moving_time: u64,
    /// Elapsed time in seconds
    pub elapsed_time: u64,
    /// Raw activity type label (Ride, VirtualRide, Run, ...)
    #[serde(rename = "type")]
    pub activity_type: String,
    /// Start date/time (ISO 8601, with or without offset)
    pub start_date: String,
}
