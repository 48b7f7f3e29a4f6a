// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory goal storage.
//!
//! Goals live for the lifetime of the process. Writes that can place a
//! goal in a week take `week_lock`, so a week replacement never interleaves with a create or
//! update landing in the same week. IDs are handed out under the lock and
//! therefore follow write order.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::models::goal::MAX_ISO_WEEK;
use crate::models::{DistanceUnit, Goal, GoalError, GoalPatch, NewGoal};

/// Concurrent goal store keyed by goal ID.
#[derive(Debug, Default)]
pub struct GoalStore {
    goals: DashMap<u64, Goal>,
    last_id: AtomicU64,
    week_lock: Mutex<()>,
}

impl GoalStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.week_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_id(&self) -> u64 {
        self.last_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Validate and store a new goal.
    pub fn create(&self, new: NewGoal) -> Result<Goal, GoalError> {
        let goal = Goal::new(0, new)?;

        let _guard = self.lock_writes();
        let goal = Goal {
            id: self.next_id(),
            ..goal
        };
        self.goals.insert(goal.id, goal.clone());
        Ok(goal)
    }

    pub fn get(&self, id: u64) -> Option<Goal> {
        self.goals.get(&id).map(|entry| entry.clone())
    }

    /// Apply a partial update. Returns `Ok(None)` if the goal does not exist.
    pub fn update(&self, id: u64, patch: GoalPatch) -> Result<Option<Goal>, GoalError> {
        let _guard = self.lock_writes();
        let Some(mut entry) = self.goals.get_mut(&id) else {
            return Ok(None);
        };
        let updated = entry.apply(patch)?;
        *entry = updated.clone();
        Ok(Some(updated))
    }

    /// Returns `true` if a goal was removed.
    pub fn delete(&self, id: u64) -> bool {
        self.goals.remove(&id).is_some()
    }

    /// All goals, most recent week first, then by ID.
    pub fn list(&self) -> Vec<Goal> {
        let mut goals: Vec<Goal> = self.goals.iter().map(|entry| entry.clone()).collect();
        goals.sort_by(|a, b| b.week.cmp(&a.week).then_with(|| a.id.cmp(&b.id)));
        goals
    }

    /// All goals with distance targets expressed in `unit`.
    pub fn list_in_unit(&self, unit: DistanceUnit) -> Vec<Goal> {
        self.list()
            .into_iter()
            .map(|goal| goal.in_distance_unit(unit))
            .collect()
    }

    pub fn list_for_week(&self, week: u32) -> Vec<Goal> {
        self.list().into_iter().filter(|g| g.week == week).collect()
    }

    /// Replace every goal of a week with a new set.
    ///
    /// Entries with a zero or negative target are dropped, which is how a
    /// cleared field in the week editor removes that goal. The rest are
    /// validated before anything is removed; on error the week is left
    /// untouched.
    pub fn replace_week(&self, week: u32, goals: Vec<NewGoal>) -> Result<Vec<Goal>, GoalError> {
        if !(1..=MAX_ISO_WEEK).contains(&week) {
            return Err(GoalError::WeekOutOfRange(week));
        }
        let validated = goals
            .into_iter()
            // NaN is kept so that it fails validation
            .filter(|new| new.target.is_nan() || new.target > 0.0)
            .map(|new| Goal::new(0, NewGoal { week, ..new }))
            .collect::<Result<Vec<_>, _>>()?;

        let _guard = self.lock_writes();
        self.goals.retain(|_, goal| goal.week != week);

        let created: Vec<Goal> = validated
            .into_iter()
            .map(|goal| Goal {
                id: self.next_id(),
                ..goal
            })
            .collect();
        for goal in &created {
            self.goals.insert(goal.id, goal.clone());
        }
        Ok(created)
    }

    /// Remove every goal of a week. Returns how many were removed.
    pub fn delete_week(&self, week: u32) -> usize {
        let _guard = self.lock_writes();
        let before = self.goals.len();
        self.goals.retain(|_, goal| goal.week != week);
        before - self.goals.len()
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }
}
