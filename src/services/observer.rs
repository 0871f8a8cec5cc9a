//! Side channel for aggregation timing.
//!
//! The aggregator reports the wall-clock duration of every call to an
//! [`AggregationObserver`], whatever the outcome. Observers never influence
//! the result.

use prometheus::{Encoder, HistogramOpts, HistogramVec, Registry, TextEncoder};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::{
    error::{AppError, AppResult, ErrorKind},
    models::MovieId,
};

/// How an aggregation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure(ErrorKind),
    /// The caller went away before the join completed
    Cancelled,
}

impl Outcome {
    pub fn from_result<T>(result: &AppResult<T>) -> Self {
        match result {
            Ok(_) => Outcome::Success,
            Err(e) => Outcome::Failure(e.kind()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failure(_) => "failure",
            Outcome::Cancelled => "cancelled",
        }
    }
}

/// Receives one callback per aggregation
pub trait AggregationObserver: Send + Sync {
    fn record(&self, movie_id: MovieId, elapsed: Duration, outcome: Outcome);
}

/// Observer that discards every measurement
pub struct NoopObserver;

impl AggregationObserver for NoopObserver {
    fn record(&self, _movie_id: MovieId, _elapsed: Duration, _outcome: Outcome) {}
}

/// Records aggregation latency in a Prometheus histogram
///
/// Metric: `recommendation_latency_seconds{outcome}` in a registry owned by
/// this observer, rendered for `GET /metrics`.
pub struct PrometheusObserver {
    registry: Registry,
    latency: HistogramVec,
}

impl PrometheusObserver {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();
        let latency = HistogramVec::new(
            HistogramOpts::new(
                "recommendation_latency_seconds",
                "Time to compute movie recommendations",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(latency.clone()))?;

        Ok(Self { registry, latency })
    }

    /// Number of aggregations observed with the given outcome label
    pub fn sample_count(&self, outcome: &str) -> u64 {
        self.latency.with_label_values(&[outcome]).get_sample_count()
    }

    /// Renders all metrics in the Prometheus text exposition format
    pub fn render(&self) -> Result<String, AppError> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(|e| AppError::Internal(format!("Metrics encoding error: {}", e)))?;

        String::from_utf8(buffer)
            .map_err(|e| AppError::Internal(format!("Metrics encoding error: {}", e)))
    }
}

impl AggregationObserver for PrometheusObserver {
    fn record(&self, _movie_id: MovieId, elapsed: Duration, outcome: Outcome) {
        self.latency
            .with_label_values(&[outcome.label()])
            .observe(elapsed.as_secs_f64());
    }
}

/// Measures one aggregation and reports it exactly once
///
/// Dropping the timer without calling [`AggregationTimer::finish`] reports
/// [`Outcome::Cancelled`], which is what happens when the request future is
/// dropped mid-join.
pub(crate) struct AggregationTimer {
    observer: Arc<dyn AggregationObserver>,
    movie_id: MovieId,
    started: Instant,
    finished: bool,
}

impl AggregationTimer {
    pub(crate) fn start(observer: Arc<dyn AggregationObserver>, movie_id: MovieId) -> Self {
        Self {
            observer,
            movie_id,
            started: Instant::now(),
            finished: false,
        }
    }

    pub(crate) fn finish(mut self, outcome: Outcome) -> Duration {
        self.finished = true;
        let elapsed = self.started.elapsed();
        self.observer.record(self.movie_id, elapsed, outcome);
        elapsed
    }
}

impl Drop for AggregationTimer {
    fn drop(&mut self) {
        if !self.finished {
            let elapsed = self.started.elapsed();
            tracing::info!(
                movie_id = self.movie_id,
                elapsed_ms = elapsed.as_millis() as u64,
                "Recommendation request cancelled"
            );
            self.observer
                .record(self.movie_id, elapsed, Outcome::Cancelled);
        }
    }
}
