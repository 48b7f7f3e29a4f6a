// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly goal management and progress routes.

use crate::error::{AppError, Result};
use crate::models::goal::MAX_ISO_WEEK;
use crate::models::{ActivityRecord, DistanceUnit, Goal, GoalPatch, GoalProgress, NewGoal};
use crate::services::GoalEvaluator;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use super::{aggregate_snapshot, check_activity_limit, normalizer_for, report_rejected, RejectedRecord};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/goals", get(list_goals).post(create_goal))
        .route("/api/goals/progress", post(goal_progress))
        .route("/api/goals/{id}", put(update_goal).delete(delete_goal))
        .route(
            "/api/goals/week/{week}",
            put(replace_week_goals).delete(delete_week_goals),
        )
}

// ─── CRUD ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct UnitQuery {
    unit: Option<DistanceUnit>,
}

/// List goals with distance targets in the requested unit.
async fn list_goals(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UnitQuery>,
) -> Json<Vec<Goal>> {
    let unit = params.unit.unwrap_or(state.config.default_distance_unit);
    Json(state.goals.list_in_unit(unit))
}

async fn create_goal(
    State(state): State<Arc<AppState>>,
    Json(new_goal): Json<NewGoal>,
) -> Result<(StatusCode, Json<Goal>)> {
    new_goal.validate()?;
    let goal = state.goals.create(new_goal)?;

    tracing::info!(
        goal_id = goal.id,
        week = goal.week,
        activity_type = %goal.activity_type,
        kind = %goal.kind,
        "Goal created"
    );
    Ok((StatusCode::CREATED, Json(goal)))
}

async fn update_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(patch): Json<GoalPatch>,
) -> Result<Json<Goal>> {
    patch.validate()?;
    let goal = state
        .goals
        .update(id, patch)?
        .ok_or_else(|| AppError::NotFound(format!("Goal {} not found", id)))?;

    tracing::info!(goal_id = id, "Goal updated");
    Ok(Json(goal))
}

/// Response for goal deletion.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteGoalsResponse {
    pub deleted: u32,
    pub message: String,
}

async fn delete_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteGoalsResponse>> {
    if !state.goals.delete(id) {
        return Err(AppError::NotFound(format!("Goal {} not found", id)));
    }

    tracing::info!(goal_id = id, "Goal deleted");
    Ok(Json(DeleteGoalsResponse {
        deleted: 1,
        message: "Goal deleted successfully".to_string(),
    }))
}

// ─── Week-wide edits ─────────────────────────────────────────

/// Replace all goals of a week (the dashboard's "save week goals").
async fn replace_week_goals(
    State(state): State<Arc<AppState>>,
    Path(week): Path<u32>,
    Json(goals): Json<Vec<NewGoal>>,
) -> Result<Json<Vec<Goal>>> {
    if !(1..=MAX_ISO_WEEK).contains(&week) {
        return Err(AppError::BadRequest(format!(
            "Week {} out of range (1-{})",
            week, MAX_ISO_WEEK
        )));
    }
    // The path decides the week, whatever the body says
    let goals: Vec<NewGoal> = goals
        .into_iter()
        .map(|goal| NewGoal { week, ..goal })
        .collect();
    for goal in &goals {
        goal.validate()?;
    }
    let created = state.goals.replace_week(week, goals)?;

    tracing::info!(week, count = created.len(), "Week goals replaced");
    Ok(Json(created))
}

async fn delete_week_goals(
    State(state): State<Arc<AppState>>,
    Path(week): Path<u32>,
) -> Json<DeleteGoalsResponse> {
    let deleted = state.goals.delete_week(week);

    tracing::info!(week, deleted, "Week goals deleted");
    Json(DeleteGoalsResponse {
        deleted: deleted as u32,
        message: format!("Deleted {} goals for week {}", deleted, week),
    })
}

// ─── Progress ────────────────────────────────────────────────

#[derive(Deserialize)]
struct ProgressRequest {
    #[serde(default)]
    activities: Vec<ActivityRecord>,
    /// Unit the activity distances are expressed in
    unit: Option<DistanceUnit>,
    #[serde(default)]
    combine_rides: bool,
    #[serde(default)]
    combine_runs: bool,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GoalProgressEntry {
    pub goal: Goal,
    pub progress: Option<GoalProgress>,
    pub error: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressResponse {
    pub unit: DistanceUnit,
    pub goals: Vec<GoalProgressEntry>,
    pub rejected: Vec<RejectedRecord>,
}

/// Evaluate every stored goal against an activity snapshot.
async fn goal_progress(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProgressRequest>,
) -> Result<Json<ProgressResponse>> {
    check_activity_limit(&state, &request.activities)?;
    let unit = request.unit.unwrap_or(state.config.default_distance_unit);

    let activity_count = request.activities.len();
    let normalizer = normalizer_for(request.combine_rides, request.combine_runs);
    let aggregation = aggregate_snapshot(request.activities, normalizer.clone()).await?;
    let evaluator = GoalEvaluator::new(&normalizer, unit);

    let goals: Vec<GoalProgressEntry> = state
        .goals
        .list_in_unit(unit)
        .into_iter()
        .map(|goal| match evaluator.evaluate(&goal, &aggregation.summary) {
            Ok(progress) => GoalProgressEntry {
                goal,
                progress: Some(progress),
                error: None,
            },
            Err(e) => {
                tracing::warn!(goal_id = goal.id, error = %e, "Goal could not be evaluated");
                GoalProgressEntry {
                    goal,
                    progress: None,
                    error: Some(e.to_string()),
                }
            }
        })
        .collect();

    tracing::debug!(
        activities = activity_count,
        goals = goals.len(),
        %unit,
        "Evaluated goal progress"
    );

    Ok(Json(ProgressResponse {
        unit,
        goals,
        rejected: report_rejected(&aggregation.rejected),
    }))
}
