// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Goal progress evaluation against a weekly summary.

use crate::models::goal::validate_target;
use crate::models::{
    DistanceUnit, Goal, GoalError, GoalKind, GoalProgress, GoalUnit, TypeTotals, WeekKey,
    WeeklySummary,
};
use crate::services::normalizer::TypeNormalizer;

/// Evaluates goals using the same normalizer the summary was built with.
pub struct GoalEvaluator<'a> {
    normalizer: &'a TypeNormalizer,
    /// Unit the summarized distances are expressed in
    distance_unit: DistanceUnit,
}

impl<'a> GoalEvaluator<'a> {
    pub fn new(normalizer: &'a TypeNormalizer, distance_unit: DistanceUnit) -> Self {
        Self {
            normalizer,
            distance_unit,
        }
    }

    /// Compute a goal's progress.
    ///
    /// Missing data for the goal's week and type is not an error: the
    /// achieved value and percent are both zero.
    pub fn evaluate(&self, goal: &Goal, summary: &WeeklySummary) -> Result<GoalProgress, GoalError> {
        validate_target(goal.target)?;
        if let Some(goal_unit) = goal.unit.distance_unit() {
            if goal_unit != self.distance_unit {
                return Err(GoalError::DistanceUnitMismatch {
                    goal: goal_unit,
                    activities: self.distance_unit,
                });
            }
        }

        let activity_type = self.normalizer.normalize_type(&goal.activity_type);
        let totals = goal_week(goal, summary)
            .and_then(|week| summary.get(&week, &activity_type))
            .copied()
            .unwrap_or_default();

        let achieved = achieved_value(goal, &totals);
        let has_activity = totals.count > 0;
        let percent = if has_activity {
            achieved / goal.target * 100.0
        } else {
            0.0
        };

        Ok(GoalProgress {
            goal_id: goal.id,
            achieved,
            percent,
            has_activity,
            display: format_progress(goal, achieved),
        })
    }
}

/// The summary week a goal refers to.
fn goal_week(goal: &Goal, summary: &WeeklySummary) -> Option<WeekKey> {
    match goal.year {
        Some(year) => Some(WeekKey::new(year, goal.week)),
        None => summary.latest_with_week_number(goal.week),
    }
}

fn achieved_value(goal: &Goal, totals: &TypeTotals) -> f64 {
    match goal.kind {
        GoalKind::Distance => totals.distance(),
        GoalKind::Time => {
            let minutes = totals.moving_minutes();
            if goal.unit == GoalUnit::Hours {
                minutes / 60.0
            } else {
                minutes
            }
        }
        GoalKind::Sessions => f64::from(totals.count),
    }
}

/// "achieved/target unit", one decimal for distance and hours.
pub fn format_progress(goal: &Goal, achieved: f64) -> String {
    match goal.unit {
        GoalUnit::Km | GoalUnit::Mi | GoalUnit::Hours => {
            format!("{:.1}/{} {}", achieved, goal.target, goal.unit)
        }
        GoalUnit::Minutes | GoalUnit::Sessions => {
            format!("{:.0}/{} {}", achieved.round(), goal.target, goal.unit)
        }
    }
}
