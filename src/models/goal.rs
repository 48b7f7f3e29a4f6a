// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Weekly goal model, validation, and progress.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use crate::models::ActivityType;

pub const KM_TO_MI: f64 = 0.621371;
pub const MI_TO_KM: f64 = 1.60934;

/// Highest ISO week number.
pub const MAX_ISO_WEEK: u32 = 53;

/// Dimension a goal measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum GoalKind {
    Distance,
    Time,
    Sessions,
}

impl fmt::Display for GoalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Distance => "distance",
            Self::Time => "time",
            Self::Sessions => "sessions",
        })
    }
}

/// Unit system for distances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Km,
    Mi,
}

impl DistanceUnit {
    /// Convert a distance from `self` into `to`.
    pub fn convert(self, value: f64, to: DistanceUnit) -> f64 {
        match (self, to) {
            (Self::Km, Self::Mi) => value * KM_TO_MI,
            (Self::Mi, Self::Km) => value * MI_TO_KM,
            _ => value,
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Km => "km",
            Self::Mi => "mi",
        })
    }
}

impl FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "km" => Ok(Self::Km),
            "mi" => Ok(Self::Mi),
            other => Err(format!("unknown distance unit '{other}' (expected km or mi)")),
        }
    }
}

/// Unit attached to a goal target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum GoalUnit {
    Km,
    Mi,
    Hours,
    Minutes,
    Sessions,
}

impl GoalUnit {
    /// The goal kind this unit belongs to.
    pub fn kind(self) -> GoalKind {
        match self {
            Self::Km | Self::Mi => GoalKind::Distance,
            Self::Hours | Self::Minutes => GoalKind::Time,
            Self::Sessions => GoalKind::Sessions,
        }
    }

    pub fn distance_unit(self) -> Option<DistanceUnit> {
        match self {
            Self::Km => Some(DistanceUnit::Km),
            Self::Mi => Some(DistanceUnit::Mi),
            _ => None,
        }
    }
}

impl From<DistanceUnit> for GoalUnit {
    fn from(unit: DistanceUnit) -> Self {
        match unit {
            DistanceUnit::Km => Self::Km,
            DistanceUnit::Mi => Self::Mi,
        }
    }
}

impl fmt::Display for GoalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Km => "km",
            Self::Mi => "mi",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Sessions => "sessions",
        })
    }
}

/// Goal creation payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewGoal {
    #[validate(range(min = 1, max = 53))]
    pub week: u32,
    /// ISO year; `None` means the most recent year with this week number
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 64))]
    pub activity_type: String,
    #[serde(rename = "goal_type")]
    pub kind: GoalKind,
    pub target: f64,
    pub unit: GoalUnit,
}

/// Partial goal update. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct GoalPatch {
    #[validate(range(min = 1, max = 53))]
    pub week: Option<u32>,
    pub year: Option<i32>,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 64))]
    pub activity_type: Option<String>,
    #[serde(rename = "goal_type")]
    pub kind: Option<GoalKind>,
    pub target: Option<f64>,
    pub unit: Option<GoalUnit>,
}

/// A validated weekly goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Goal {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub week: u32,
    pub year: Option<i32>,
    #[serde(rename = "type")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub activity_type: ActivityType,
    #[serde(rename = "goal_type")]
    pub kind: GoalKind,
    pub target: f64,
    pub unit: GoalUnit,
}

impl Goal {
    /// Validate a creation payload into a goal.
    pub fn new(id: u64, new: NewGoal) -> Result<Self, GoalError> {
        validate_target(new.target)?;
        if new.week == 0 || new.week > MAX_ISO_WEEK {
            return Err(GoalError::WeekOutOfRange(new.week));
        }
        if new.unit.kind() != new.kind {
            return Err(GoalError::UnitMismatch {
                kind: new.kind,
                unit: new.unit,
            });
        }

        Ok(Self {
            id,
            week: new.week,
            year: new.year,
            activity_type: ActivityType::from_label(&new.activity_type),
            kind: new.kind,
            target: new.target,
            unit: new.unit,
        })
    }

    /// Apply a partial update, re-validating the result.
    pub fn apply(&self, patch: GoalPatch) -> Result<Self, GoalError> {
        let merged = NewGoal {
            week: patch.week.unwrap_or(self.week),
            year: patch.year.or(self.year),
            activity_type: patch
                .activity_type
                .unwrap_or_else(|| self.activity_type.to_string()),
            kind: patch.kind.unwrap_or(self.kind),
            target: patch.target.unwrap_or(self.target),
            unit: patch.unit.unwrap_or(self.unit),
        };
        Self::new(self.id, merged)
    }

    /// Express a distance goal in another unit. Other kinds are returned as-is.
    ///
    /// Targets are rounded to two decimals unless that would drop them to zero.
    pub fn in_distance_unit(&self, unit: DistanceUnit) -> Self {
        let Some(current) = self.unit.distance_unit() else {
            return self.clone();
        };
        if current == unit {
            return self.clone();
        }

        let converted = current.convert(self.target, unit);
        let rounded = (converted * 100.0).round() / 100.0;
        Self {
            target: if rounded > 0.0 { rounded } else { converted },
            unit: unit.into(),
            ..self.clone()
        }
    }
}

pub(crate) fn validate_target(target: f64) -> Result<(), GoalError> {
    if target.is_finite() && target > 0.0 {
        Ok(())
    } else {
        Err(GoalError::InvalidTarget(target))
    }
}

/// Progress of one goal against the current weekly summary. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GoalProgress {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub goal_id: u64,
    /// Achieved value in the goal's unit
    pub achieved: f64,
    /// Percent of target; not clamped, may exceed 100
    pub percent: f64,
    /// Whether any activity matched the goal's week and type
    pub has_activity: bool,
    pub display: String,
}

/// Invalid goal definitions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GoalError {
    #[error("Goal target must be a positive number (got {0})")]
    InvalidTarget(f64),

    #[error("Week {0} is outside 1..=53")]
    WeekOutOfRange(u32),

    #[error("Unit '{unit}' is not valid for a {kind} goal")]
    UnitMismatch { kind: GoalKind, unit: GoalUnit },

    #[error("Goal is in {goal} but activities are in {activities}")]
    DistanceUnitMismatch {
        goal: DistanceUnit,
        activities: DistanceUnit,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_goal(kind: GoalKind, target: f64, unit: GoalUnit) -> NewGoal {
        NewGoal {
            week: 10,
            year: None,
            activity_type: "Ride".to_string(),
            kind,
            target,
            unit,
        }
    }

    #[test]
    fn test_zero_target_rejected() {
        let err = Goal::new(1, new_goal(GoalKind::Distance, 0.0, GoalUnit::Km)).unwrap_err();
        assert_eq!(err, GoalError::InvalidTarget(0.0));
    }

    #[test]
    fn test_negative_and_nan_targets_rejected() {
        assert!(Goal::new(1, new_goal(GoalKind::Time, -1.0, GoalUnit::Hours)).is_err());
        assert!(Goal::new(1, new_goal(GoalKind::Time, f64::NAN, GoalUnit::Hours)).is_err());
        assert!(Goal::new(1, new_goal(GoalKind::Time, f64::INFINITY, GoalUnit::Hours)).is_err());
    }

    #[test]
    fn test_unit_must_match_kind() {
        let err = Goal::new(1, new_goal(GoalKind::Sessions, 3.0, GoalUnit::Km)).unwrap_err();
        assert_eq!(
            err,
            GoalError::UnitMismatch {
                kind: GoalKind::Sessions,
                unit: GoalUnit::Km
            }
        );
    }

    #[test]
    fn test_week_range() {
        let mut goal = new_goal(GoalKind::Sessions, 3.0, GoalUnit::Sessions);
        goal.week = 54;
        assert_eq!(Goal::new(1, goal).unwrap_err(), GoalError::WeekOutOfRange(54));
    }

    #[test]
    fn test_apply_patch_revalidates() {
        let goal = Goal::new(7, new_goal(GoalKind::Distance, 50.0, GoalUnit::Km)).unwrap();

        let updated = goal
            .apply(GoalPatch {
                target: Some(60.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(updated.id, 7);
        assert_eq!(updated.target, 60.0);

        // Changing the kind without the unit leaves a km time goal
        let err = goal
            .apply(GoalPatch {
                kind: Some(GoalKind::Time),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, GoalError::UnitMismatch { .. }));
    }

    #[test]
    fn test_in_distance_unit() {
        let goal = Goal::new(1, new_goal(GoalKind::Distance, 10.0, GoalUnit::Km)).unwrap();
        let miles = goal.in_distance_unit(DistanceUnit::Mi);
        assert_eq!(miles.unit, GoalUnit::Mi);
        assert_eq!(miles.target, 6.21);

        let back = miles.in_distance_unit(DistanceUnit::Km);
        assert_eq!(back.target, 9.99);

        let time = Goal::new(2, new_goal(GoalKind::Time, 5.0, GoalUnit::Hours)).unwrap();
        assert_eq!(time.in_distance_unit(DistanceUnit::Mi), time);
    }

    #[test]
    fn test_tiny_target_stays_positive_after_conversion() {
        let goal = Goal::new(1, new_goal(GoalKind::Distance, 0.001, GoalUnit::Km)).unwrap();
        let miles = goal.in_distance_unit(DistanceUnit::Mi);
        assert!(miles.target > 0.0);
    }

    #[test]
    fn test_goal_json_shape() {
        let goal = Goal::new(3, new_goal(GoalKind::Time, 2.5, GoalUnit::Hours)).unwrap();
        let json = serde_json::to_value(&goal).unwrap();
        assert_eq!(json["type"], "Ride");
        assert_eq!(json["goal_type"], "time");
        assert_eq!(json["unit"], "hours");
        assert_eq!(json["target"], 2.5);
    }
}
