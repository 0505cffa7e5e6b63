//! Statistics endpoint

use axum::{extract::State, Json};

use crate::{error::AppResult, services::stats::StatsResponse, AppState};

/// Catalog, member and loan counters
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Current statistics", body = StatsResponse)
    )
)]
pub async fn get_stats(State(state): State<AppState>) -> AppResult<Json<StatsResponse>> {
    let lending = state.services.lending.read().await;
    Ok(Json(state.services.stats.compute(&lending)))
}
