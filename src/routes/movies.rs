use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    db::StoreError,
    error::AppResult,
    middleware::request_id::RequestId,
    models::Movie,
    routes::AppState,
    services::collection,
};

#[derive(Debug, Deserialize)]
pub struct AddMovieRequest {
    pub movie_id: i64,
    pub rating: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRatingRequest {
    pub rating: i64,
}

/// Lists the whole collection
pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Movie>>> {
    let movies = state.store.get_all().await?;
    Ok(Json(movies))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i64>,
) -> AppResult<Json<Movie>> {
    let movie = state
        .store
        .get_by_id(movie_id)
        .await?
        .ok_or(StoreError::NotFound(movie_id))?;
    Ok(Json(movie))
}

/// Saves a catalog movie with the user's rating
pub async fn add(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<AddMovieRequest>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    let movie = collection::add_from_catalog(
        &state.store,
        state.catalog.as_ref(),
        request.movie_id,
        request.rating,
    )
    .await
    .inspect_err(|e| {
        tracing::warn!(
            request_id = %request_id,
            movie_id = request.movie_id,
            error = %e,
            "Failed to add movie"
        )
    })?;

    tracing::info!(
        request_id = %request_id,
        movie_id = movie.id,
        title = %movie.title,
        rating = movie.rating,
        "Movie added"
    );

    Ok((StatusCode::CREATED, Json(movie)))
}

/// Deletes a movie; unknown ids still succeed
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(movie_id): Path<i64>,
) -> AppResult<StatusCode> {
    let removed = state.store.remove(movie_id).await?;

    tracing::info!(
        request_id = %request_id,
        movie_id = movie_id,
        removed = removed,
        "Movie removed"
    );

    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_rating(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(movie_id): Path<i64>,
    Json(request): Json<UpdateRatingRequest>,
) -> AppResult<StatusCode> {
    if !state.store.update_rating(movie_id, request.rating).await? {
        return Err(StoreError::NotFound(movie_id).into());
    }

    tracing::info!(
        request_id = %request_id,
        movie_id = movie_id,
        rating = request.rating,
        "Movie rating updated"
    );

    Ok(StatusCode::NO_CONTENT)
}
