use chrono::Utc;
use std::collections::BTreeMap;

use crate::{
    db::{MovieStore, StoreResult},
    models::{Movie, StatsSnapshot},
};

/// Computes a fresh snapshot from the store's current contents
pub async fn compute_stats(store: &MovieStore) -> StoreResult<StatsSnapshot> {
    let movies = store.get_all().await?;
    Ok(summarize(&movies))
}

/// Aggregates a set of movies
///
/// Blank years count as missing. `most_common_year` ties go to the smallest year.
pub fn summarize(movies: &[Movie]) -> StatsSnapshot {
    let total = movies.len();

    let avg_rating = (total > 0).then(|| {
        let sum: i64 = movies.iter().map(|m| m.rating).sum();
        round_to_hundredths(sum as f64 / total as f64)
    });

    let mut distribution = BTreeMap::new();
    for movie in movies {
        *distribution.entry(movie.rating).or_insert(0) += 1;
    }

    let parsed_years: Vec<i64> = movies
        .iter()
        .filter_map(Movie::usable_year)
        .filter_map(|year| year.parse().ok())
        .collect();
    let avg_year = (!parsed_years.is_empty())
        .then(|| parsed_years.iter().sum::<i64>() / parsed_years.len() as i64);

    let mut year_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for year in movies.iter().filter_map(Movie::usable_year) {
        *year_counts.entry(year).or_insert(0) += 1;
    }
    // Ascending iteration: a later year only wins with a strictly higher count
    let most_common_year = year_counts
        .into_iter()
        .fold(None::<(&str, usize)>, |best, (year, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((year, count)),
        })
        .map(|(year, _)| year.to_string());

    StatsSnapshot {
        total,
        avg_rating,
        distribution,
        avg_year,
        most_common_year,
        generated_at: Utc::now(),
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
