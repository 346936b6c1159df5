pub mod collection;
pub mod providers;
pub mod recommendations;
pub mod stats;

pub use providers::{CatalogClient, Recommender};
