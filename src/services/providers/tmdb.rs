/// TMDb catalog provider
///
/// API Flow:
/// 1. Search: /search/movie → first page of matches, trimmed to `SEARCH_LIMIT`
/// 2. Resolve: /movie/{id} → metadata stored alongside the user's rating
use crate::{
    error::{AppError, AppResult},
    models::{CatalogEntry, TmdbMovie, TmdbSearchResponse},
    services::providers::CatalogClient,
};
use reqwest::{Client as HttpClient, StatusCode};
use std::time::Duration;

const SEARCH_LIMIT: usize = 5;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const LANGUAGE: &str = "en-US";

#[derive(Clone)]
pub struct TmdbCatalog {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_base_url: String,
}

impl TmdbCatalog {
    pub fn new(api_key: String, api_url: String, image_base_url: String) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
            image_base_url,
        })
    }

    async fn error_for_status(response: reqwest::Response) -> AppError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        AppError::ExternalApi(format!("TMDb API returned status {}: {}", status, body))
    }
}

#[async_trait::async_trait]
impl CatalogClient for TmdbCatalog {
    async fn search(&self, query: &str) -> AppResult<Vec<CatalogEntry>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let url = format!("{}/search/movie", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("language", LANGUAGE),
                ("page", "1"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        let body: TmdbSearchResponse = response.json().await?;
        let results = body.results.ok_or_else(|| {
            tracing::error!(query = %query, "TMDb search response has no results list");
            AppError::ExternalApi("Unexpected response format from TMDb".to_string())
        })?;

        let entries: Vec<CatalogEntry> = results
            .into_iter()
            .take(SEARCH_LIMIT)
            .map(|movie| movie.into_entry(&self.image_base_url))
            .collect();

        tracing::info!(
            query = %query,
            results = entries.len(),
            provider = self.name(),
            "Catalog search completed"
        );

        Ok(entries)
    }

    async fn fetch(&self, movie_id: i64) -> AppResult<CatalogEntry> {
        let url = format!("{}/movie/{}", self.api_url, movie_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", LANGUAGE)])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!(
                "Movie {} not found in catalog",
                movie_id
            )));
        }

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        let movie: TmdbMovie = response.json().await?;
        let entry = movie.into_entry(&self.image_base_url);

        tracing::debug!(
            movie_id = movie_id,
            title = %entry.title,
            provider = self.name(),
            "Catalog entry resolved"
        );

        Ok(entry)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
