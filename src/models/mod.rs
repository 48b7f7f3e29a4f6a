// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod activity_type;
pub mod goal;
pub mod summary;
pub mod week;

pub use activity::ActivityRecord;
pub use activity_type::{ActivityType, AliasRule, TypeAliasConfig};
pub use goal::{
    DistanceUnit, Goal, GoalError, GoalKind, GoalPatch, GoalProgress, GoalUnit, NewGoal,
};
pub use summary::{Aggregation, RecordError, TypeTotals, WeekBucket, WeekRow, WeeklySummary};
pub use week::WeekKey;
