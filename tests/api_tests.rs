use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use recommendation_service::{
    api::{create_router, AppState, RequestLimits},
    error::{AppError, AppResult},
    models::{CatalogEntry, MovieId, RatingAggregate},
    services::{CatalogClient, PrometheusObserver, RatingsClient, Recommender, TagReader},
};

struct FakeCatalog {
    movies: HashMap<MovieId, CatalogEntry>,
}

#[async_trait::async_trait]
impl CatalogClient for FakeCatalog {
    async fn get_movie(&self, movie_id: MovieId) -> AppResult<CatalogEntry> {
        self.movies
            .get(&movie_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Movie {} not found", movie_id)))
    }
}

struct FakeRatings {
    ratings: HashMap<MovieId, (f64, i64)>,
}

#[async_trait::async_trait]
impl RatingsClient for FakeRatings {
    async fn get_average_rating(&self, movie_id: MovieId) -> AppResult<RatingAggregate> {
        match movie_id {
            503 => Err(AppError::Unavailable("ratings service is down".to_string())),
            500 => Err(AppError::Internal("ratings decode failure".to_string())),
            _ => Ok(self
                .ratings
                .get(&movie_id)
                .map(|&(average_rating, rating_count)| RatingAggregate {
                    movie_id,
                    average_rating,
                    rating_count,
                })
                .unwrap_or_else(|| RatingAggregate::empty(movie_id))),
        }
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

struct FakeTags {
    tags: HashMap<MovieId, Vec<String>>,
}

#[async_trait::async_trait]
impl TagReader for FakeTags {
    async fn top_recent_tags(&self, movie_id: MovieId, limit: u32) -> AppResult<Vec<String>> {
        let mut tags = self.tags.get(&movie_id).cloned().unwrap_or_default();
        tags.truncate(limit as usize);
        Ok(tags)
    }
}

/// Catalog that never answers within a request deadline
struct SlowCatalog;

#[async_trait::async_trait]
impl CatalogClient for SlowCatalog {
    async fn get_movie(&self, movie_id: MovieId) -> AppResult<CatalogEntry> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Err(AppError::NotFound(format!("Movie {} not found", movie_id)))
    }
}

fn movie(id: MovieId, title: &str, genres: &[&str]) -> (MovieId, CatalogEntry) {
    (
        id,
        CatalogEntry {
            id,
            title: title.to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
        },
    )
}

fn create_test_server() -> TestServer {
    let catalog = FakeCatalog {
        movies: HashMap::from([
            movie(42, "Inception", &["Sci-Fi"]),
            movie(7, "Unrated Film", &["Drama"]),
            movie(503, "Ratings Down", &[]),
            movie(500, "Ratings Broken", &[]),
        ]),
    };
    let ratings = FakeRatings {
        ratings: HashMap::from([(42, (4.5, 2))]),
    };
    let tags = FakeTags {
        tags: HashMap::from([(
            42,
            ["dreams", "heist", "mind-bending", "nolan", "twist", "classic"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
        )]),
    };

    let metrics = Arc::new(PrometheusObserver::new().unwrap());
    let recommender = Recommender::new(Arc::new(catalog), Arc::new(ratings), Arc::new(tags))
        .with_observer(metrics.clone());

    let state = AppState::new(Arc::new(recommender), metrics);
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_recommendation_for_rated_movie() {
    let server = create_test_server();

    let response = server.get("/recommendations/movies/42").await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "id": 42,
        "title": "Inception",
        "genres": ["Sci-Fi"],
        "averageRating": 4.5,
        "ratingCount": 2,
        "tags": ["dreams", "heist", "mind-bending", "nolan", "twist"]
    }));
}

#[tokio::test]
async fn test_unrated_movie_has_null_average() {
    let server = create_test_server();

    let response = server.get("/recommendations/movies/7").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["averageRating"], Value::Null);
    assert_eq!(body["ratingCount"], 0);
    assert_eq!(body["tags"], json!([]));
}

#[tokio::test]
async fn test_unknown_movie_is_404() {
    let server = create_test_server();

    let response = server.get("/recommendations/movies/999999").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "Movie 999999 not found");
}

#[tokio::test]
async fn test_unavailable_dependency_is_503() {
    let server = create_test_server();

    let response = server.get("/recommendations/movies/503").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("ratings service is down"));
}

#[tokio::test]
async fn test_internal_dependency_failure_is_500() {
    let server = create_test_server();

    let response = server.get("/recommendations/movies/500").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_non_integer_movie_id_is_400() {
    let server = create_test_server();

    let response = server.get("/recommendations/movies/inception").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid movie id"));
}

#[tokio::test]
async fn test_dev_alias_serves_same_view() {
    let server = create_test_server();

    let primary: Value = server.get("/recommendations/movies/42").await.json();
    let alias = server.get("/dev/recommendations/movies/42").await;

    alias.assert_status_ok();
    assert_eq!(alias.json::<Value>(), primary);
}

#[tokio::test]
async fn test_request_id_generated_when_missing() {
    let server = create_test_server();

    let response = server.get("/recommendations/movies/999999").await;

    let header = response.header("x-request-id");
    assert!(!header.to_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_request_id_propagated_from_caller() {
    let server = create_test_server();

    let response = server
        .get("/recommendations/movies/42")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("gateway-1234"),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("x-request-id"), "gateway-1234");
}

#[tokio::test]
async fn test_metrics_count_every_outcome() {
    let server = create_test_server();

    server.get("/recommendations/movies/42").await.assert_status_ok();
    server
        .get("/recommendations/movies/999999")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let response = server.get("/metrics").await;
    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("recommendation_latency_seconds_count{outcome=\"success\"} 1"));
    assert!(text.contains("recommendation_latency_seconds_count{outcome=\"failure\"} 1"));
}

#[tokio::test]
async fn test_bad_path_does_not_reach_aggregator() {
    let server = create_test_server();

    server
        .get("/recommendations/movies/not-a-number")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let text = server.get("/metrics").await.text();
    assert!(!text.contains("outcome=\"failure\""));
}

#[tokio::test]
async fn test_request_deadline_is_503_with_error_body() {
    let metrics = Arc::new(PrometheusObserver::new().unwrap());
    let recommender = Recommender::new(
        Arc::new(SlowCatalog),
        Arc::new(FakeRatings {
            ratings: HashMap::new(),
        }),
        Arc::new(FakeTags {
            tags: HashMap::new(),
        }),
    )
    .with_observer(metrics.clone());

    let state = AppState::new(Arc::new(recommender), metrics.clone()).with_limits(RequestLimits {
        timeout: Duration::from_millis(100),
        max_concurrent: 8,
    });
    let server = TestServer::new(create_router(state)).unwrap();

    let response = server.get("/recommendations/movies/1").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["error"], "Service unavailable: Request timed out");
    assert!(!response.header("x-request-id").is_empty());
    assert_eq!(metrics.sample_count("cancelled"), 1);
}
