// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly time-spent table and chart data.

use crate::error::Result;
use crate::models::{ActivityRecord, ActivityType, TypeTotals, WeekRow};
use crate::services::{hide_types, sort_rows, SortDirection, SortKey, SortMetric, SortSpec};
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use super::{aggregate_snapshot, check_activity_limit, normalizer_for, report_rejected, RejectedRecord};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/weekly", post(weekly_summary))
}

#[derive(Deserialize)]
struct WeeklyRequest {
    #[serde(default)]
    activities: Vec<ActivityRecord>,
    #[serde(default)]
    combine_rides: bool,
    #[serde(default)]
    combine_runs: bool,
    /// "week" or a canonical type label
    sort_by: Option<String>,
    #[serde(default)]
    direction: SortDirection,
    #[serde(default)]
    metric: SortMetric,
    /// Canonical type columns to leave out of the rows
    #[serde(default)]
    hidden_types: Vec<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeeklyResponse {
    /// Every canonical type seen in the input, including hidden ones
    pub types: Vec<String>,
    pub weeks: Vec<WeekRowResponse>,
    pub rejected: Vec<RejectedRecord>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeekRowResponse {
    pub iso_year: i32,
    pub week: u32,
    /// Monday of the week (YYYY-MM-DD)
    pub week_start: String,
    #[cfg_attr(
        feature = "binding-generation",
        ts(type = "Record<string, { distance: number; moving_time: number; elapsed_time: number; count: number }>")
    )]
    pub totals: BTreeMap<String, TypeTotals>,
}

impl From<WeekRow> for WeekRowResponse {
    fn from(row: WeekRow) -> Self {
        Self {
            iso_year: row.week.iso_year,
            week: row.week.iso_week,
            week_start: row.week_start.format("%Y-%m-%d").to_string(),
            totals: row
                .totals
                .into_iter()
                .map(|(activity_type, totals)| (activity_type.to_string(), totals))
                .collect(),
        }
    }
}

/// Aggregate a snapshot of activities into sorted weekly rows.
async fn weekly_summary(
    State(state): State<Arc<AppState>>,
    Json(request): Json<WeeklyRequest>,
) -> Result<Json<WeeklyResponse>> {
    check_activity_limit(&state, &request.activities)?;

    tracing::debug!(
        activities = request.activities.len(),
        combine_rides = request.combine_rides,
        combine_runs = request.combine_runs,
        sort_by = ?request.sort_by,
        "Aggregating weekly summary"
    );

    let normalizer = normalizer_for(request.combine_rides, request.combine_runs);
    let aggregation = aggregate_snapshot(request.activities, normalizer).await?;

    let spec = SortSpec {
        key: request
            .sort_by
            .as_deref()
            .map(SortKey::parse)
            .unwrap_or(SortKey::Week),
        direction: request.direction,
        metric: request.metric,
    };
    // Labels name output columns, so no alias resolution here
    let hidden: BTreeSet<ActivityType> = request
        .hidden_types
        .iter()
        .map(|label| ActivityType::from_label(label))
        .collect();

    let rows = sort_rows(&aggregation.summary.rows(), &spec);
    let rows = hide_types(&rows, &hidden);

    Ok(Json(WeeklyResponse {
        types: aggregation
            .summary
            .types()
            .iter()
            .map(ToString::to_string)
            .collect(),
        weeks: rows.into_iter().map(WeekRowResponse::from).collect(),
        rejected: report_rejected(&aggregation.rejected),
    }))
}
