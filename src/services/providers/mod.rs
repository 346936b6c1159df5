/// External capability providers
///
/// The movie store and statistics never call these directly. Route handlers get
/// them from `AppState` as trait objects, so tests can swap in mocks.
use crate::{error::AppResult, models::CatalogEntry};

pub mod openai;
pub mod tmdb;

pub use openai::OpenAiRecommender;
pub use tmdb::TmdbCatalog;

/// Searches and resolves movies in the external catalog
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Search for movies by title; returns at most a handful of matches
    async fn search(&self, query: &str) -> AppResult<Vec<CatalogEntry>>;

    /// Fetch full metadata for a single catalog id
    ///
    /// Returns `AppError::NotFound` when the catalog has no such movie.
    async fn fetch(&self, movie_id: i64) -> AppResult<CatalogEntry>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Turns a text prompt into generated text
#[async_trait::async_trait]
pub trait Recommender: Send + Sync {
    async fn generate(&self, prompt: &str) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
