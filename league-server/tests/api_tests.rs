//! Integration tests for league-server API

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use league_core::LeagueFile;
use league_server::{create_router, ServerConfig, ServerState};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn test_app() -> axum::Router {
    let config = ServerConfig::default();
    let state = Arc::new(ServerState::new(config.search_timeout));
    create_router(&config, state)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_status_endpoint() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["running_searches"], 0);
}

#[tokio::test]
async fn test_generate_schedule() {
    let app = test_app();
    let league = LeagueFile::example(4, 3, 2);

    let response = app
        .oneshot(post_json(
            "/api/schedule",
            json!({ "request_id": "league-a", "league": league }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "league-a");

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    let weeks = json["schedule"].as_array().unwrap();
    assert_eq!(weeks.len(), 3);
    assert_eq!(weeks[0], json!([["Team 1", "Team 2"], ["Team 3", "Team 4"]]));
    assert_eq!(json["byes"], json!([[], [], []]));
}

#[tokio::test]
async fn test_generate_infeasible() {
    let app = test_app();
    let mut league = LeagueFile::example(4, 3, 1);
    for week in 0..league.config.weeks() {
        league = league.with_unavailable("Team 1", week);
    }

    let response = app
        .oneshot(post_json("/api/schedule", json!({ "league": league })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "no valid schedule exists under the given constraints");
    assert!(json.get("schedule").is_none());
    assert!(json.get("cancelled").is_none());
}

#[tokio::test]
async fn test_generate_invalid_config() {
    let app = test_app();
    let league = LeagueFile::example(5, 3, 2);

    let response = app
        .oneshot(post_json("/api/schedule", json!({ "league": league })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("odd"));
}

#[tokio::test]
async fn test_generate_unknown_team() {
    let app = test_app();
    let league = LeagueFile::example(4, 3, 2).with_unavailable("Nobody", 0);

    let response = app
        .oneshot(post_json("/api/schedule", json!({ "league": league })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Nobody"));
}

#[tokio::test]
async fn test_generate_times_out_as_cancelled() {
    let config = ServerConfig {
        search_timeout: Duration::ZERO,
        ..ServerConfig::default()
    };
    let state = Arc::new(ServerState::new(config.search_timeout));
    let app = create_router(&config, state.clone());
    let league = LeagueFile::example(40, 39, 20);

    let response = app
        .oneshot(post_json("/api/schedule", json!({ "league": league })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["cancelled"], true);
    assert_eq!(state.running(), 0, "finished searches leave the registry");
}

#[tokio::test]
async fn test_cancel_running_search() {
    let config = ServerConfig::default();
    let state = Arc::new(ServerState::new(config.search_timeout));
    let token = state.register("league-b").unwrap();
    let app = create_router(&config, state.clone());

    let response = app
        .oneshot(post_json("/api/schedule/league-b/cancel", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(token.is_cancelled());
    let json = body_json(response).await;
    assert_eq!(json["request_id"], "league-b");
}

#[tokio::test]
async fn test_cancel_unknown_search() {
    let app = test_app();

    let response = app
        .oneshot(post_json("/api/schedule/missing/cancel", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("missing"));
}

#[tokio::test]
async fn test_duplicate_request_id_conflicts() {
    let config = ServerConfig::default();
    let state = Arc::new(ServerState::new(config.search_timeout));
    let _running = state.register("busy").unwrap();
    let app = create_router(&config, state);

    let response = app
        .oneshot(post_json(
            "/api/schedule",
            json!({ "request_id": "busy", "league": LeagueFile::example(4, 3, 2) }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_availability_endpoint() {
    let app = test_app();
    let league = LeagueFile::example(6, 3, 3).with_unavailable("Team 2", 0);

    let response = app
        .oneshot(post_json("/api/availability", json!(league)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total_possible"], 8);
    assert_eq!(json["total_needed"], 9);
    assert_eq!(json["possible_games_per_week"], json!([2, 3, 3]));
    assert_eq!(json["warnings"][0]["kind"], "total_capacity_short");
    assert_eq!(json["warnings"][1]["kind"], "too_many_unavailable_weeks");
    assert_eq!(json["warnings"][1]["team"], "Team 2");
}

#[tokio::test]
async fn test_disconnected_client_releases_search() {
    let config = ServerConfig::default();
    let state = Arc::new(ServerState::new(config.search_timeout));
    let league = LeagueFile::example(40, 39, 20);

    // The client gives up before the search can finish
    let _ = tokio::time::timeout(
        Duration::from_millis(200),
        create_router(&config, state.clone())
            .oneshot(post_json("/api/schedule", json!({ "request_id": "r1", "league": league }))),
    )
    .await;
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(state.running(), 0, "dropped request leaves the registry");

    let response = create_router(&config, state.clone())
        .oneshot(post_json(
            "/api/schedule",
            json!({ "request_id": "r1", "league": LeagueFile::example(4, 3, 2) }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
}
