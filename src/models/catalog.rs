use serde::{Deserialize, Serialize};

/// A movie as described by the external catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: i64,
    pub title: String,
    pub year: Option<String>,
    pub poster_path: Option<String>,
}

// ============================================================================
// TMDb API Types
// ============================================================================

/// Response from GET /search/movie
///
/// `results` is kept loose so a malformed payload can be reported instead of
/// failing deserialization outright.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Option<Vec<TmdbMovie>>,
}

/// Movie record shared by TMDb search results and GET /movie/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl TmdbMovie {
    /// Converts to a catalog entry, expanding the poster path with `image_base_url`
    pub fn into_entry(self, image_base_url: &str) -> CatalogEntry {
        let year = self
            .release_date
            .as_deref()
            .filter(|date| !date.is_empty())
            .map(|date| date.chars().take(4).collect());

        let poster_path = self
            .poster_path
            .filter(|path| !path.is_empty())
            .map(|path| format!("{}{}", image_base_url, path));

        CatalogEntry {
            id: self.id,
            title: self.title,
            year,
            poster_path,
        }
    }
}
