// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Goal management and progress endpoint tests.

use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;
use common::{activity, body_json, create_test_app, empty_request, json_request};

fn distance_goal(week: u32, sport: &str, target: f64, unit: &str) -> Value {
    json!({
        "week": week,
        "type": sport,
        "goal_type": "distance",
        "target": target,
        "unit": unit
    })
}

#[tokio::test]
async fn test_create_and_list_goal() {
    let (app, _state) = create_test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/goals",
            &distance_goal(10, "Ride", 100.0, "km"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["type"], "Ride");

    let response = app
        .oneshot(empty_request("GET", "/api/goals?unit=mi"))
        .await
        .unwrap();
    let goals = body_json(response).await;
    assert_eq!(goals[0]["unit"], "mi");
    assert_eq!(goals[0]["target"], 62.14);
}

#[tokio::test]
async fn test_zero_target_rejected() {
    let (app, state) = create_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/goals",
            &distance_goal(10, "Ride", 0.0, "km"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_goal");
    assert!(state.goals.is_empty());
}

#[tokio::test]
async fn test_unit_must_match_goal_type() {
    let (app, _state) = create_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/goals",
            &json!({
                "week": 10,
                "type": "Run",
                "goal_type": "time",
                "target": 3.0,
                "unit": "km"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_week_out_of_range_is_bad_request() {
    let (app, _state) = create_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/goals",
            &distance_goal(60, "Ride", 10.0, "km"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_and_delete_goal() {
    let (app, state) = create_test_app();
    let goal = state
        .goals
        .create(serde_json::from_value(distance_goal(10, "Ride", 50.0, "km")).unwrap())
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/goals/{}", goal.id),
            &json!({ "target": 80.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["target"], 80.0);

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/api/goals/{}", goal.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(empty_request("DELETE", &format!("/api/goals/{}", goal.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_missing_goal() {
    let (app, _state) = create_test_app();

    let response = app
        .oneshot(json_request("PUT", "/api/goals/42", &json!({ "target": 5.0 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_replace_and_delete_week() {
    let (app, state) = create_test_app();
    state
        .goals
        .create(serde_json::from_value(distance_goal(10, "Ride", 50.0, "km")).unwrap())
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/goals/week/10",
            &json!([
                distance_goal(10, "Run", 20.0, "km"),
                {
                    "week": 10,
                    "type": "Swim",
                    "goal_type": "sessions",
                    "target": 2.0,
                    "unit": "sessions"
                }
            ]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
    assert_eq!(state.goals.list_for_week(10).len(), 2);

    let response = app
        .oneshot(empty_request("DELETE", "/api/goals/week/10"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["deleted"], 2);
    assert!(state.goals.is_empty());
}

#[tokio::test]
async fn test_replace_week_skips_cleared_targets() {
    let (app, state) = create_test_app();
    state
        .goals
        .create(serde_json::from_value(distance_goal(5, "Ride", 50.0, "km")).unwrap())
        .unwrap();

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/goals/week/5",
            &json!([
                distance_goal(5, "Run", 2.0, "km"),
                distance_goal(5, "Swim", 0.0, "km"),
                distance_goal(5, "Ride", 30.0, "km")
            ]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let created = body_json(response).await;
    let types: Vec<&str> = created
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, vec!["Run", "Ride"]);

    let week5 = state.goals.list_for_week(5);
    assert_eq!(week5.len(), 2);
    assert!(week5.iter().all(|g| g.target > 0.0));
}

#[tokio::test]
async fn test_replace_week_uses_path_week() {
    let (app, state) = create_test_app();

    // Body week is out of range but the path week wins
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/goals/week/7",
            &json!([distance_goal(60, "Run", 5.0, "km")]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.goals.list_for_week(7).len(), 1);

    for uri in ["/api/goals/week/99", "/api/goals/week/0"] {
        let response = app
            .clone()
            .oneshot(json_request("PUT", uri, &json!([])))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
    assert_eq!(state.goals.len(), 1);
}

#[tokio::test]
async fn test_progress_combines_rides_and_does_not_clamp() {
    let (app, state) = create_test_app();
    for goal in [
        distance_goal(10, "Ride", 50.0, "km"),
        json!({
            "week": 10,
            "type": "Run",
            "goal_type": "time",
            "target": 1.0,
            "unit": "hours"
        }),
        distance_goal(11, "Swim", 2.0, "km"),
    ] {
        state
            .goals
            .create(serde_json::from_value(goal).unwrap())
            .unwrap();
    }

    let activities = vec![
        activity(1, "Ride", "2024-03-04T07:00:00Z", 40.0, 5400),
        activity(2, "VirtualRide", "2024-03-06T18:00:00Z", 20.0, 3000),
        activity(3, "Run", "2024-03-07T08:00:00Z", 8.0, 2700),
    ];

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/goals/progress",
            &json!({
                "activities": activities,
                "unit": "km",
                "combine_rides": true
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let goals = body["goals"].as_array().unwrap();
    assert_eq!(goals.len(), 3);

    // Week 11 first (weeks descending)
    assert_eq!(goals[0]["goal"]["week"], 11);
    assert_eq!(goals[0]["progress"]["percent"], 0.0);
    assert_eq!(goals[0]["progress"]["has_activity"], false);

    let ride = &goals[1]["progress"];
    assert_eq!(ride["achieved"], 60.0);
    assert_eq!(ride["percent"], 120.0);
    assert_eq!(ride["display"], "60.0/50 km");

    let run = &goals[2]["progress"];
    assert_eq!(run["achieved"], 0.75);
    assert_eq!(run["percent"], 75.0);
}

#[tokio::test]
async fn test_progress_converts_goals_into_activity_unit() {
    let (app, state) = create_test_app();
    state
        .goals
        .create(serde_json::from_value(distance_goal(10, "Run", 10.0, "km")).unwrap())
        .unwrap();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/goals/progress",
            &json!({
                "activities": [activity(1, "Run", "2024-03-05T07:00:00Z", 3.1, 1800)],
                "unit": "mi"
            }),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;

    assert_eq!(body["unit"], "mi");
    let entry = &body["goals"][0];
    assert_eq!(entry["goal"]["unit"], "mi");
    assert_eq!(entry["goal"]["target"], 6.21);
    assert!(entry["error"].is_null());
    let percent = entry["progress"]["percent"].as_f64().unwrap();
    assert!((percent - 3.1 / 6.21 * 100.0).abs() < 1e-9);
}
