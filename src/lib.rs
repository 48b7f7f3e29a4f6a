// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Weekly-Tracker: weekly workout aggregation and goal progress
//!
//! This crate groups activity records into ISO weeks, merges activity type
//! aliases, and evaluates weekly goals against the resulting summaries.
//! A small HTTP API exposes the engine to the dashboard frontend.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::GoalStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub goals: GoalStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            goals: GoalStore::new(),
        }
    }
}
