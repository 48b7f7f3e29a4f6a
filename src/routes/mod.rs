// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod goals;
pub mod weekly;

use crate::error::AppError;
use crate::models::{ActivityRecord, Aggregation, RecordError, TypeAliasConfig};
use crate::services::{aggregate, TypeNormalizer};
use crate::AppState;
use axum::http::{header, Method};
use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

/// A record skipped during aggregation.
#[derive(Serialize, Debug, Clone)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RejectedRecord {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub activity_id: u64,
    pub error: String,
}

impl From<&RecordError> for RejectedRecord {
    fn from(err: &RecordError) -> Self {
        Self {
            activity_id: err.activity_id,
            error: err.error.to_string(),
        }
    }
}

/// Reject oversized activity snapshots.
fn check_activity_limit(state: &AppState, activities: &[ActivityRecord]) -> crate::error::Result<()> {
    let max = state.config.max_activities_per_request;
    if activities.len() > max {
        return Err(AppError::BadRequest(format!(
            "Too many activities: {} (max {})",
            activities.len(),
            max
        )));
    }
    Ok(())
}

/// Normalizer for the dashboard's combine toggles.
fn normalizer_for(combine_rides: bool, combine_runs: bool) -> TypeNormalizer {
    TypeNormalizer::new(TypeAliasConfig::from_flags(combine_rides, combine_runs))
}

/// Aggregate a snapshot on the blocking pool so large requests do not
/// stall the async workers.
async fn aggregate_snapshot(
    activities: Vec<ActivityRecord>,
    normalizer: TypeNormalizer,
) -> crate::error::Result<Aggregation> {
    tokio::task::spawn_blocking(move || aggregate(&activities, &normalizer))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Aggregation task failed: {}", e)))
}

/// Log and convert rejected records.
fn report_rejected(rejected: &[RecordError]) -> Vec<RejectedRecord> {
    if !rejected.is_empty() {
        tracing::warn!(
            count = rejected.len(),
            first = %rejected[0],
            "Skipped activities with unparseable start dates"
        );
    }
    rejected.iter().map(RejectedRecord::from).collect()
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer - allow requests from frontend URL and localhost (for dev)
    let frontend_url = state.config.frontend_url.clone();
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            move |origin: &axum::http::HeaderValue, _request_parts: &axum::http::request::Parts| {
                let origin_str = origin.to_str().unwrap_or("");
                origin_str == frontend_url
                    || origin_str.starts_with("http://localhost")
                    || origin_str.starts_with("http://127.0.0.1")
            },
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(health_check))
        .merge(weekly::routes())
        .merge(goals::routes())
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
