//! Weekly per-type aggregates produced by the aggregation engine.
//!
//! A `WeeklySummary` is always rebuilt from scratch for a given set of
//! records and alias configuration. Only the aggregator inserts into it,
//! after the raw type has gone through the normalizer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::models::{ActivityRecord, ActivityType, WeekKey};
use crate::time_utils::TimestampError;

/// Distances are accumulated in millionths of a unit.
const DISTANCE_SCALE: f64 = 1_000_000.0;

/// Totals for one (week, canonical type) bucket.
///
/// Distance is held in fixed point so that summing is exact and the
/// result does not depend on record order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "TypeTotalsRepr", from = "TypeTotalsRepr")]
pub struct TypeTotals {
    distance_micros: i64,
    pub moving_time: u64,
    pub elapsed_time: u64,
    pub count: u32,
}

#[derive(Serialize, Deserialize)]
struct TypeTotalsRepr {
    distance: f64,
    moving_time: u64,
    elapsed_time: u64,
    count: u32,
}

impl From<TypeTotals> for TypeTotalsRepr {
    fn from(totals: TypeTotals) -> Self {
        Self {
            distance: totals.distance(),
            moving_time: totals.moving_time,
            elapsed_time: totals.elapsed_time,
            count: totals.count,
        }
    }
}

impl From<TypeTotalsRepr> for TypeTotals {
    fn from(repr: TypeTotalsRepr) -> Self {
        Self {
            distance_micros: to_micros(repr.distance),
            moving_time: repr.moving_time,
            elapsed_time: repr.elapsed_time,
            count: repr.count,
        }
    }
}

fn to_micros(distance: f64) -> i64 {
    (distance * DISTANCE_SCALE).round() as i64
}

impl TypeTotals {
    /// Totals for a single activity.
    pub fn from_record(record: &ActivityRecord) -> Self {
        Self {
            distance_micros: to_micros(record.distance),
            moving_time: record.moving_time,
            elapsed_time: record.elapsed_time,
            count: 1,
        }
    }

    /// Total distance, in the unit the records were supplied in.
    pub fn distance(&self) -> f64 {
        self.distance_micros as f64 / DISTANCE_SCALE
    }

    pub fn moving_minutes(&self) -> f64 {
        self.moving_time as f64 / 60.0
    }

    pub fn add(&mut self, other: &TypeTotals) {
        self.distance_micros = self.distance_micros.saturating_add(other.distance_micros);
        self.moving_time = self.moving_time.saturating_add(other.moving_time);
        self.elapsed_time = self.elapsed_time.saturating_add(other.elapsed_time);
        self.count = self.count.saturating_add(other.count);
    }
}

/// All buckets for one ISO week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekBucket {
    /// Monday of the week
    pub week_start: NaiveDate,
    pub totals: BTreeMap<ActivityType, TypeTotals>,
}

/// Mapping WeekKey -> canonical type -> totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklySummary {
    weeks: BTreeMap<WeekKey, WeekBucket>,
    types: BTreeSet<ActivityType>,
}

impl WeeklySummary {
    pub(crate) fn insert(
        &mut self,
        week: WeekKey,
        week_start: NaiveDate,
        activity_type: ActivityType,
        totals: &TypeTotals,
    ) {
        let bucket = self.weeks.entry(week).or_insert_with(|| WeekBucket {
            week_start,
            totals: BTreeMap::new(),
        });
        self.types.insert(activity_type.clone());
        bucket.totals.entry(activity_type).or_default().add(totals);
    }

    /// Combine two partial aggregations built with the same alias configuration.
    pub fn merge(mut self, other: WeeklySummary) -> WeeklySummary {
        for (week, bucket) in other.weeks {
            for (activity_type, totals) in bucket.totals {
                self.insert(week, bucket.week_start, activity_type, &totals);
            }
        }
        self
    }

    pub fn get(&self, week: &WeekKey, activity_type: &ActivityType) -> Option<&TypeTotals> {
        self.weeks
            .get(week)
            .and_then(|bucket| bucket.totals.get(activity_type))
    }

    pub fn week(&self, week: &WeekKey) -> Option<&WeekBucket> {
        self.weeks.get(week)
    }

    /// Weeks in chronological order.
    pub fn weeks(&self) -> impl Iterator<Item = (&WeekKey, &WeekBucket)> {
        self.weeks.iter()
    }

    /// Every canonical type observed in any week.
    pub fn types(&self) -> &BTreeSet<ActivityType> {
        &self.types
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    /// Most recent week carrying the given ISO week number.
    pub fn latest_with_week_number(&self, iso_week: u32) -> Option<WeekKey> {
        self.weeks
            .keys()
            .rev()
            .find(|key| key.iso_week == iso_week)
            .copied()
    }

    /// Chronological rows with a zero entry for every observed type.
    pub fn rows(&self) -> Vec<WeekRow> {
        self.weeks
            .iter()
            .map(|(week, bucket)| WeekRow {
                week: *week,
                week_start: bucket.week_start,
                totals: self
                    .types
                    .iter()
                    .map(|t| (t.clone(), bucket.totals.get(t).copied().unwrap_or_default()))
                    .collect(),
            })
            .collect()
    }
}

/// One display row: a week and its per-type totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekRow {
    pub week: WeekKey,
    pub week_start: NaiveDate,
    pub totals: BTreeMap<ActivityType, TypeTotals>,
}

impl WeekRow {
    /// Totals for a type, zero if the row has no entry for it.
    pub fn totals_for(&self, activity_type: &ActivityType) -> TypeTotals {
        self.totals.get(activity_type).copied().unwrap_or_default()
    }
}

/// A record that could not be aggregated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Activity {activity_id}: {error}")]
pub struct RecordError {
    pub activity_id: u64,
    #[source]
    pub error: TimestampError,
}

/// Result of an aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    pub summary: WeeklySummary,
    /// Records skipped because their start date could not be parsed
    pub rejected: Vec<RecordError>,
}
