pub mod movies;
pub mod sqlite;

pub use movies::{validate_movie, validate_rating, MovieStore, StoreError, StoreResult};
pub use sqlite::{create_pool, StoreConfig};
