use std::fmt::Write;

use crate::{
    db::MovieStore,
    error::{AppError, AppResult},
    models::Movie,
    services::providers::Recommender,
};

const RECOMMENDATION_COUNT: usize = 5;

/// Generates recommendations from the saved collection
///
/// The collection is rendered into a prompt, highest rated first, and handed to
/// the recommender. An empty collection is rejected before any external call.
pub async fn recommend(store: &MovieStore, recommender: &dyn Recommender) -> AppResult<String> {
    let movies = store.get_all().await?;

    if movies.is_empty() {
        return Err(AppError::InvalidInput(
            "Add some movies before asking for recommendations".to_string(),
        ));
    }

    let prompt = build_prompt(movies);
    recommender.generate(&prompt).await
}

pub fn build_prompt(mut movies: Vec<Movie>) -> String {
    movies.sort_by(|a, b| b.rating.cmp(&a.rating).then(a.id.cmp(&b.id)));

    let mut prompt = String::from("Here are movies I have watched with my ratings:\n");
    for movie in &movies {
        match movie.usable_year() {
            Some(year) => {
                let _ = writeln!(prompt, "- {} ({}) rated {}/5", movie.title, year, movie.rating);
            }
            None => {
                let _ = writeln!(prompt, "- {} rated {}/5", movie.title, movie.rating);
            }
        }
    }
    let _ = write!(
        prompt,
        "\nRecommend {} movies I have not seen that match my taste. \
         Do not include any movie from the list above. \
         For each, give the title, release year, and one sentence on why I would like it.",
        RECOMMENDATION_COUNT
    );

    prompt
}
