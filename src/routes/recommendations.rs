use axum::{extract::State, Extension, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::AppResult, middleware::request_id::RequestId, routes::AppState,
    services::recommendations,
};

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: String,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(
        request_id = %request_id,
        provider = state.recommender.name(),
        "Processing recommendation request"
    );

    let recommendations =
        recommendations::recommend(&state.store, state.recommender.as_ref()).await?;

    Ok(Json(RecommendationResponse { recommendations }))
}
