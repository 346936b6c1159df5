use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Ratings a user may give a saved movie
pub const RATING_RANGE: RangeInclusive<i64> = 1..=5;

/// A movie saved in the collection with the user's rating
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct Movie {
    /// Catalog (TMDb) identifier, also the primary key
    pub id: i64,
    pub title: String,
    /// Four-digit release year, when known
    pub year: Option<String>,
    /// Full poster URL
    pub poster_path: Option<String>,
    pub rating: i64,
}

impl Movie {
    /// Returns the release year when present and not blank
    pub fn usable_year(&self) -> Option<&str> {
        self.year
            .as_deref()
            .map(str::trim)
            .filter(|year| !year.is_empty())
    }
}
