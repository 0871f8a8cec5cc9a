use serde::{Deserialize, Serialize};

pub mod recommendation;
pub mod tag;

pub use recommendation::RecommendationView;
pub use tag::Tag;

/// Identifier shared by the catalog, ratings and tag stores
pub type MovieId = i64;

/// A movie as known to the catalog service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    pub id: MovieId,
    pub title: String,
    /// Genres in catalog order
    pub genres: Vec<String>,
}

/// Aggregate rating of one movie
///
/// `rating_count == 0` is the ratings service's "no opinion yet" answer; the
/// accompanying `average_rating` is then meaningless (always `0.0`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RatingAggregate {
    pub movie_id: MovieId,
    pub average_rating: f64,
    pub rating_count: i64,
}

impl RatingAggregate {
    /// The "no ratings yet" aggregate
    pub fn empty(movie_id: MovieId) -> Self {
        Self {
            movie_id,
            average_rating: 0.0,
            rating_count: 0,
        }
    }

    /// Average rating, absent while nobody has rated the movie
    pub fn average(&self) -> Option<f64> {
        (self.rating_count > 0).then_some(self.average_rating)
    }
}

// ============================================================================
// Ratings Service HTTP Types
// ============================================================================

/// Response of GET /dev/ratings/movies/{movieId}/average
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRatingSummary {
    pub movie_id: MovieId,
    pub average_rating: f64,
    pub rating_count: i64,
}

impl From<ApiRatingSummary> for RatingAggregate {
    fn from(summary: ApiRatingSummary) -> Self {
        RatingAggregate {
            movie_id: summary.movie_id,
            average_rating: summary.average_rating,
            rating_count: summary.rating_count,
        }
    }
}
