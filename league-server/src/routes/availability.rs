//! Availability pre-check endpoint

use super::error::ApiError;
use axum::Json;
use league_core::{AvailabilityCheck, LeagueFile};

/// Evaluate an availability map without searching
pub async fn check(Json(league): Json<LeagueFile>) -> Result<Json<AvailabilityCheck>, ApiError> {
    league.config.validate().map_err(ApiError::bad_request)?;
    let unavailable = league.resolve().map_err(ApiError::bad_request)?;
    let check = AvailabilityCheck::evaluate(&league.config, &unavailable).map_err(ApiError::bad_request)?;

    if !check.is_clear() {
        tracing::debug!("Availability check raised {} warnings", check.warnings.len());
    }
    Ok(Json(check))
}
