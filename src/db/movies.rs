use sqlx::SqlitePool;

use super::sqlite::{create_pool, StoreConfig};
use crate::models::{Movie, RATING_RANGE};

/// Errors raised by the movie store
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Movie {0} is already in the collection")]
    DuplicateKey(i64),

    #[error("Movie {0} not found")]
    NotFound(i64),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// SQLite-backed collection of rated movies
///
/// Every operation is a single autocommitted statement, so a successful return
/// means the change is durable and visible to the next read.
#[derive(Clone)]
pub struct MovieStore {
    pool: SqlitePool,
}

impl MovieStore {
    /// Wraps an existing pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool described by `config`
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let pool = create_pool(config).await?;
        Ok(Self::new(pool))
    }

    /// Creates the `movies` table if it does not exist
    pub async fn initialize(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS movies (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                year TEXT,
                poster_path TEXT,
                rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Inserts a new movie
    ///
    /// Fails with [`StoreError::DuplicateKey`] if the id is already stored; the
    /// existing record is left untouched.
    pub async fn add(&self, movie: &Movie) -> StoreResult<()> {
        validate_movie(movie)?;

        sqlx::query(
            "INSERT INTO movies (id, title, year, poster_path, rating) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(movie.id)
        .bind(&movie.title)
        .bind(&movie.year)
        .bind(&movie.poster_path)
        .bind(movie.rating)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_duplicate_key(&e) {
                StoreError::DuplicateKey(movie.id)
            } else {
                StoreError::StorageUnavailable(e)
            }
        })?;

        Ok(())
    }

    /// Deletes a movie; returns whether anything was deleted
    ///
    /// Removing an unknown id is not an error.
    pub async fn remove(&self, movie_id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM movies WHERE id = ?")
            .bind(movie_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Overwrites the rating of a movie; returns whether a movie was updated
    ///
    /// Updating an unknown id is not an error.
    pub async fn update_rating(&self, movie_id: i64, rating: i64) -> StoreResult<bool> {
        validate_rating(rating)?;

        let result = sqlx::query("UPDATE movies SET rating = ? WHERE id = ?")
            .bind(rating)
            .bind(movie_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All stored movies, ordered by id
    pub async fn get_all(&self) -> StoreResult<Vec<Movie>> {
        let movies = sqlx::query_as::<_, Movie>(
            "SELECT id, title, year, poster_path, rating FROM movies ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(movies)
    }

    pub async fn get_by_id(&self, movie_id: i64) -> StoreResult<Option<Movie>> {
        let movie = sqlx::query_as::<_, Movie>(
            "SELECT id, title, year, poster_path, rating FROM movies WHERE id = ?",
        )
        .bind(movie_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(movie)
    }
}

pub fn validate_rating(rating: i64) -> StoreResult<()> {
    if RATING_RANGE.contains(&rating) {
        Ok(())
    } else {
        Err(StoreError::Validation(format!(
            "Rating must be between {} and {}, got {}",
            RATING_RANGE.start(),
            RATING_RANGE.end(),
            rating
        )))
    }
}

/// Checks every field of `movie` against the collection invariants
pub fn validate_movie(movie: &Movie) -> StoreResult<()> {
    validate_rating(movie.rating)?;

    if movie.title.trim().is_empty() {
        return Err(StoreError::Validation("Title must not be empty".to_string()));
    }

    // Blank years are allowed; anything else must be exactly four digits, unpadded
    if let Some(year) = movie.year.as_deref() {
        let well_formed = year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit());
        if !year.trim().is_empty() && !well_formed {
            return Err(StoreError::Validation(format!(
                "Year must be four digits, got {:?}",
                year
            )));
        }
    }

    Ok(())
}

/// SQLite reports primary key collisions as SQLITE_CONSTRAINT_PRIMARYKEY (1555)
/// and unique index collisions as SQLITE_CONSTRAINT_UNIQUE (2067).
fn is_duplicate_key(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation()
                || matches!(db_err.code().as_deref(), Some("1555") | Some("2067"))
        }
        _ => false,
    }
}
