use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{header, StatusCode},
    Extension, Json,
};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{MovieId, RecommendationView},
};

use super::AppState;

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// GET /recommendations/movies/{movieId}
///
/// Path ids that are not integers are rejected with 400 before any lookup
/// runs. Everything else, including non-positive ids, goes to the catalog.
pub async fn get_movie_recommendation(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    movie_id: Result<Path<MovieId>, PathRejection>,
) -> AppResult<Json<RecommendationView>> {
    let Path(movie_id) = movie_id.map_err(|rejection| {
        tracing::debug!(%request_id, "Rejected movie id: {}", rejection.body_text());
        AppError::InvalidInput(format!("Invalid movie id: {}", rejection.body_text()))
    })?;

    tracing::info!(%request_id, movie_id, "Recommendation requested");

    let view = state.recommender.get_movie_with_rating(movie_id).await?;
    Ok(Json(view))
}

/// Prometheus scrape endpoint
pub async fn metrics(
    State(state): State<AppState>,
) -> AppResult<([(header::HeaderName, &'static str); 1], String)> {
    let body = state.metrics.render()?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    ))
}
