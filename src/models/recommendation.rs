use serde::{Deserialize, Serialize};

use super::{CatalogEntry, MovieId, RatingAggregate};

/// Combined catalog, rating and tag view of one movie
///
/// Built per request and discarded after the response is written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationView {
    pub id: MovieId,
    pub title: String,
    pub genres: Vec<String>,
    /// `None` exactly when `rating_count == 0`
    pub average_rating: Option<f64>,
    pub rating_count: i64,
    /// Newest first, at most five
    pub tags: Vec<String>,
}

impl RecommendationView {
    /// Joins the three lookup results for one movie
    pub fn assemble(movie: CatalogEntry, rating: RatingAggregate, tags: Vec<String>) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            genres: movie.genres,
            average_rating: rating.average(),
            rating_count: rating.rating_count,
            tags,
        }
    }
}
