// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ordered and filtered projections of weekly rows for display.
//!
//! Every function returns a new vector, so several views can be built
//! from one aggregation.

use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::models::{ActivityType, WeekRow};

/// Column to sort by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    Week,
    Type(ActivityType),
}

impl SortKey {
    /// `"week"` sorts by week; anything else names a canonical type.
    pub fn parse(key: &str) -> Self {
        match key {
            "week" | "weekNumber" => Self::Week,
            label => Self::Type(ActivityType::from_label(label)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Value compared when sorting by a type column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMetric {
    #[default]
    MovingMinutes,
    Distance,
    Count,
}

impl SortMetric {
    pub fn value(self, row: &WeekRow, activity_type: &ActivityType) -> f64 {
        let totals = row.totals_for(activity_type);
        match self {
            Self::MovingMinutes => totals.moving_minutes(),
            Self::Distance => totals.distance(),
            Self::Count => f64::from(totals.count),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
    pub metric: SortMetric,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::Week,
            direction: SortDirection::Desc,
            metric: SortMetric::MovingMinutes,
        }
    }
}

/// Stable sort of rows. Type columns missing from a row count as zero;
/// ties fall back to week ascending.
pub fn sort_rows(rows: &[WeekRow], spec: &SortSpec) -> Vec<WeekRow> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| compare_rows(a, b, spec));
    sorted
}

fn compare_rows(a: &WeekRow, b: &WeekRow, spec: &SortSpec) -> Ordering {
    let primary = match &spec.key {
        SortKey::Week => a.week.cmp(&b.week),
        SortKey::Type(activity_type) => spec
            .metric
            .value(a, activity_type)
            .total_cmp(&spec.metric.value(b, activity_type)),
    };
    let primary = match spec.direction {
        SortDirection::Asc => primary,
        SortDirection::Desc => primary.reverse(),
    };
    primary.then_with(|| a.week.cmp(&b.week))
}

/// Drop hidden type columns from every row.
pub fn hide_types(rows: &[WeekRow], hidden: &BTreeSet<ActivityType>) -> Vec<WeekRow> {
    rows.iter()
        .map(|row| WeekRow {
            totals: row
                .totals
                .iter()
                .filter(|(activity_type, _)| !hidden.contains(*activity_type))
                .map(|(activity_type, totals)| (activity_type.clone(), *totals))
                .collect(),
            ..row.clone()
        })
        .collect()
}
