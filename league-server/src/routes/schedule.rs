//! Schedule API endpoints
//!
//! Generation runs on the blocking pool; each running search is registered
//! under a request id so it can be cancelled, either by a client or when the
//! server's search timeout elapses.

use super::error::ApiError;
use crate::state::{SearchGuard, ServerState};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use league_core::{generate_schedule, LeagueFile, Outcome, ScheduleReport};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Generate request
#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    /// Id to cancel the search by; generated when absent
    #[serde(default)]
    pub request_id: Option<String>,
    pub league: LeagueFile,
}

/// Generate a schedule. The request id is echoed in `x-request-id`.
pub async fn generate(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<ScheduleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let ScheduleRequest { request_id, league } = req;

    league.config.validate().map_err(ApiError::bad_request)?;
    let unavailable = league.resolve().map_err(ApiError::bad_request)?;
    let config = league.config;

    let id = request_id.unwrap_or_else(|| state.next_request_id());
    let token = state
        .register(&id)
        .ok_or_else(|| ApiError::conflict(format!("search {} is already running", id)))?;
    let _guard = SearchGuard::new(state.clone(), id.clone(), token.clone());

    tracing::info!(
        "Search {} started: {} teams, {} games each, {} per week",
        id,
        config.num_teams(),
        config.games_per_team,
        config.games_per_week
    );

    let worker_token = token.clone();
    let mut handle = tokio::task::spawn_blocking(move || {
        generate_schedule(&config, &unavailable, &worker_token)
    });

    let joined = match tokio::time::timeout(state.search_timeout, &mut handle).await {
        Ok(joined) => joined,
        Err(_) => {
            tracing::warn!("Search {} exceeded {:?}, cancelling", id, state.search_timeout);
            token.cancel();
            handle.await
        }
    };

    let outcome = joined
        .map_err(ApiError::internal)?
        .map_err(ApiError::bad_request)?;

    match &outcome {
        Outcome::Scheduled(generated) => tracing::info!(
            "Search {} found a schedule after {} candidates",
            id,
            generated.stats.candidates_examined
        ),
        Outcome::Infeasible(report) => tracing::info!(
            "Search {} proved infeasible after {} candidates",
            id,
            report.stats.candidates_examined
        ),
        Outcome::Cancelled => tracing::info!("Search {} cancelled", id),
    }

    let report: ScheduleReport = outcome.to_report();
    Ok(([("x-request-id", id)], Json(report)))
}

/// Cancel a running search
pub async fn cancel(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if !state.cancel(&id) {
        return Err(ApiError::not_found(format!("no running search with id {}", id)));
    }

    tracing::info!("Search {} cancellation requested", id);
    Ok(Json(json!({
        "success": true,
        "request_id": id
    })))
}
