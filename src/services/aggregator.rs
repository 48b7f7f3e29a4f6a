// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly aggregation of activity records.
//!
//! Folds records into per-week, per-canonical-type totals:
//! 1. Parse the start date (bad records are skipped and reported)
//! 2. Resolve the ISO week from the local calendar date
//! 3. Normalize the raw type through the shared normalizer
//! 4. Add the record's totals to its bucket
//!
//! The fold is order independent, and aggregating two halves then merging
//! gives the same summary as aggregating everything at once.

use crate::models::{ActivityRecord, Aggregation, RecordError, TypeTotals, WeeklySummary};
use crate::services::normalizer::TypeNormalizer;
use crate::services::week::{resolve_week_key, week_start};
use crate::time_utils::parse_start_date;

/// Aggregate records into a weekly summary.
pub fn aggregate(records: &[ActivityRecord], normalizer: &TypeNormalizer) -> Aggregation {
    let mut summary = WeeklySummary::default();
    let mut rejected = Vec::new();

    for record in records {
        if let Err(e) = fold_record(&mut summary, record, normalizer) {
            rejected.push(e);
        }
    }

    Aggregation { summary, rejected }
}

fn fold_record(
    summary: &mut WeeklySummary,
    record: &ActivityRecord,
    normalizer: &TypeNormalizer,
) -> Result<(), RecordError> {
    let start = parse_start_date(&record.start_date).map_err(|error| RecordError {
        activity_id: record.id,
        error,
    })?;

    let week = resolve_week_key(&start);
    let activity_type = normalizer.normalize(&record.activity_type);
    summary.insert(
        week,
        week_start(start.date_naive()),
        activity_type,
        &TypeTotals::from_record(record),
    );
    Ok(())
}
