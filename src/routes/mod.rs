use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    db::MovieStore,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{CatalogClient, Recommender},
};

pub mod movies;
pub mod recommendations;
pub mod search;
pub mod stats;

/// Shared handles available to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: MovieStore,
    pub catalog: Arc<dyn CatalogClient>,
    pub recommender: Arc<dyn Recommender>,
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(Arc::new(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", get(movies::list).post(movies::add))
        .route("/movies/:id", get(movies::get).delete(movies::remove))
        .route("/movies/:id/rating", put(movies::update_rating))
        .route("/search", get(search::search))
        .route("/stats", get(stats::get_stats))
        .route("/recommendations", post(recommendations::recommend))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
