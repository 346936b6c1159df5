use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{error::AppResult, models::StatsSnapshot, routes::AppState, services::stats};

/// Handler for collection statistics endpoint
pub async fn get_stats(State(state): State<Arc<AppState>>) -> AppResult<Json<StatsSnapshot>> {
    let snapshot = stats::compute_stats(&state.store).await?;
    Ok(Json(snapshot))
}
