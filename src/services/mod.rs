// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - aggregation engine and goal storage.

pub mod aggregator;
pub mod goal_store;
pub mod goals;
pub mod normalizer;
pub mod view;
pub mod week;

pub use aggregator::aggregate;
pub use goal_store::GoalStore;
pub use goals::GoalEvaluator;
pub use normalizer::TypeNormalizer;
pub use view::{hide_types, sort_rows, SortDirection, SortKey, SortMetric, SortSpec};
pub use week::{resolve_week_key, week_key_for_date};
