use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    error::{AppError, AppResult},
    models::{MovieId, RecommendationView},
    services::{
        clients::{CatalogClient, RatingsClient},
        observer::{AggregationObserver, AggregationTimer, NoopObserver, Outcome},
        tags::{TagReader, RECENT_TAG_LIMIT},
    },
};

/// Builds recommendation views by joining catalog, ratings and tag lookups
///
/// The three lookups are independent and run concurrently; the view is only
/// produced when all three succeed. Any failure fails the whole request with
/// its kind preserved, and the remaining lookups are dropped.
pub struct Recommender {
    catalog: Arc<dyn CatalogClient>,
    ratings: Arc<dyn RatingsClient>,
    tags: Arc<dyn TagReader>,
    observer: Arc<dyn AggregationObserver>,
    lookup_timeout: Option<Duration>,
}

impl Recommender {
    pub fn new(
        catalog: Arc<dyn CatalogClient>,
        ratings: Arc<dyn RatingsClient>,
        tags: Arc<dyn TagReader>,
    ) -> Self {
        Self {
            catalog,
            ratings,
            tags,
            observer: Arc::new(NoopObserver),
            lookup_timeout: None,
        }
    }

    /// Report every aggregation's duration and outcome to `observer`
    pub fn with_observer(mut self, observer: Arc<dyn AggregationObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Bound each individual lookup; `None` waits indefinitely
    pub fn with_lookup_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Fetches catalog entry, rating aggregate and recent tags for a movie
    /// and joins them into one view
    ///
    /// Lookups are polled in catalog, ratings, tags order, so when several
    /// fail at once the catalog's error is the one reported.
    pub async fn get_movie_with_rating(&self, movie_id: MovieId) -> AppResult<RecommendationView> {
        tracing::info!(movie_id, "Building recommendation view");

        let timer = AggregationTimer::start(self.observer.clone(), movie_id);

        let joined = tokio::try_join!(
            self.bounded("catalog", self.catalog.get_movie(movie_id)),
            self.bounded("ratings", self.ratings.get_average_rating(movie_id)),
            self.bounded("tags", self.tags.top_recent_tags(movie_id, RECENT_TAG_LIMIT)),
        );

        let result = joined
            .map(|(movie, rating, tags)| RecommendationView::assemble(movie, rating, tags));

        let outcome = Outcome::from_result(&result);
        let elapsed = timer.finish(outcome);

        match &result {
            Ok(view) => tracing::info!(
                movie_id,
                rating_count = view.rating_count,
                tag_count = view.tags.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                "Recommendation view built"
            ),
            Err(e) => tracing::warn!(
                movie_id,
                kind = %e.kind(),
                error = %e,
                elapsed_ms = elapsed.as_millis() as u64,
                "Recommendation view failed"
            ),
        }

        result
    }

    async fn bounded<T>(
        &self,
        lookup: &'static str,
        call: impl Future<Output = AppResult<T>>,
    ) -> AppResult<T> {
        match self.lookup_timeout {
            None => call.await,
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                AppError::Unavailable(format!(
                    "{} lookup timed out after {}ms",
                    lookup,
                    limit.as_millis()
                ))
            })?,
        }
    }
}
