use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{error::AppResult, models::CatalogEntry, routes::AppState, services::collection};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    query: String,
}

/// Handler for catalog search endpoint
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<CatalogEntry>>> {
    let entries = collection::search_catalog(state.catalog.as_ref(), &params.query).await?;
    Ok(Json(entries))
}
