use axum::{error_handling::HandleErrorLayer, middleware, routing::get, BoxError, Router};
use tower::{limit::ConcurrencyLimitLayer, timeout::TimeoutLayer, ServiceBuilder};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;
use crate::error::AppError;
use crate::middleware::{make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    let limits = state.limits;

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        // Recommendations
        .route(
            "/recommendations/movies/:movie_id",
            get(handlers::get_movie_recommendation),
        )
        .route(
            "/dev/recommendations/movies/:movie_id",
            get(handlers::get_movie_recommendation),
        )
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(limits.timeout)),
        )
        .layer(ConcurrencyLimitLayer::new(limits.max_concurrent))
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        // Outermost, so every response carries the id
        .layer(middleware::from_fn(request_id_middleware))
}

/// Turns tower middleware failures into categorized application errors
async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<tower::timeout::error::Elapsed>() {
        AppError::Unavailable("Request timed out".to_string())
    } else {
        AppError::Internal(format!("Unhandled middleware error: {}", err))
    }
}
