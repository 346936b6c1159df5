pub mod catalog;
pub mod movie;
pub mod stats;

pub use catalog::{CatalogEntry, TmdbMovie, TmdbSearchResponse};
pub use movie::{Movie, RATING_RANGE};
pub use stats::StatsSnapshot;
