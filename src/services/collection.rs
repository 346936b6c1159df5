use crate::{
    db::{validate_movie, validate_rating, MovieStore, StoreError},
    error::{AppError, AppResult},
    models::{CatalogEntry, Movie},
    services::providers::CatalogClient,
};

/// Service function for catalog search
///
/// Delegates to the configured CatalogClient, keeping HTTP routing free of
/// provider details.
pub async fn search_catalog(catalog: &dyn CatalogClient, query: &str) -> AppResult<Vec<CatalogEntry>> {
    catalog.search(query).await
}

/// Resolves a catalog id to full metadata and saves it with the given rating
///
/// The rating is checked first so an invalid request never reaches the catalog.
/// Metadata the catalog returns that the store would reject is an upstream fault
/// and surfaces as [`AppError::ExternalApi`].
pub async fn add_from_catalog(
    store: &MovieStore,
    catalog: &dyn CatalogClient,
    movie_id: i64,
    rating: i64,
) -> AppResult<Movie> {
    validate_rating(rating)?;

    let entry = catalog.fetch(movie_id).await?;
    let movie = Movie {
        id: movie_id,
        title: entry.title,
        year: entry.year,
        poster_path: entry.poster_path,
        rating,
    };

    validate_movie(&movie).map_err(|e| match e {
        StoreError::Validation(reason) => AppError::ExternalApi(format!(
            "Catalog returned unusable metadata for movie {}: {}",
            movie_id, reason
        )),
        other => other.into(),
    })?;

    store.add(&movie).await?;
    Ok(movie)
}
