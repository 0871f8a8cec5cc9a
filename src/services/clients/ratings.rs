use reqwest::Client as HttpClient;
use tonic::{transport::Channel, Code};

use crate::{
    error::{AppError, AppResult},
    models::{ApiRatingSummary, MovieId, RatingAggregate},
    proto::ratings::v1::{
        ratings_service_client::RatingsServiceClient, GetAverageRatingRequest,
        GetAverageRatingResponse,
    },
};

/// Read access to aggregate movie ratings
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RatingsClient: Send + Sync {
    /// Fetch average rating and rating count for one movie
    ///
    /// A movie nobody has rated yields `rating_count == 0` and
    /// `average_rating == 0.0`; that is a regular answer, not an error.
    async fn get_average_rating(&self, movie_id: MovieId) -> AppResult<RatingAggregate>;

    /// Transport name for logging
    fn name(&self) -> &'static str;
}

/// Ratings client speaking `ratings.v1.RatingsService` over gRPC
#[derive(Clone)]
pub struct GrpcRatingsClient {
    client: RatingsServiceClient<Channel>,
}

impl GrpcRatingsClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            client: RatingsServiceClient::new(channel),
        }
    }
}

#[async_trait::async_trait]
impl RatingsClient for GrpcRatingsClient {
    async fn get_average_rating(&self, movie_id: MovieId) -> AppResult<RatingAggregate> {
        tracing::debug!(movie_id, "gRPC GetAverageRating");

        let mut client = self.client.clone();
        let response = client
            .get_average_rating(GetAverageRatingRequest { movie_id })
            .await
            .map_err(|status| match status.code() {
                // The ratings service answers empty aggregates instead of NOT_FOUND
                Code::NotFound => AppError::Internal(format!(
                    "Ratings service returned NOT_FOUND for movie {}: {}",
                    movie_id,
                    status.message()
                )),
                _ => AppError::from(status),
            })?
            .into_inner();

        Ok(aggregate_from_response(response))
    }

    fn name(&self) -> &'static str {
        "grpc"
    }
}

fn aggregate_from_response(response: GetAverageRatingResponse) -> RatingAggregate {
    RatingAggregate {
        movie_id: response.movie_id,
        average_rating: response.average_rating,
        rating_count: response.ratings_count,
    }
}

/// Ratings client using the ratings service's REST surface
///
/// Endpoint: GET {base_url}/dev/ratings/movies/{movieId}/average
#[derive(Clone)]
pub struct HttpRatingsClient {
    http_client: HttpClient,
    base_url: String,
}

impl HttpRatingsClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }

    fn average_url(&self, movie_id: MovieId) -> String {
        format!(
            "{}/dev/ratings/movies/{}/average",
            self.base_url.trim_end_matches('/'),
            movie_id
        )
    }
}

#[async_trait::async_trait]
impl RatingsClient for HttpRatingsClient {
    async fn get_average_rating(&self, movie_id: MovieId) -> AppResult<RatingAggregate> {
        let url = self.average_url(movie_id);
        tracing::debug!(movie_id, url = %url, "HTTP average rating lookup");

        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = format!("Ratings service returned status {}: {}", status, body);
            return Err(if status.is_server_error() {
                AppError::Unavailable(message)
            } else {
                AppError::Internal(message)
            });
        }

        let summary: ApiRatingSummary = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Invalid ratings response: {}", e)))?;

        Ok(summary.into())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
