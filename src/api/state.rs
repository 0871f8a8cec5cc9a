use std::sync::Arc;
use std::time::Duration;

use crate::services::{PrometheusObserver, Recommender};

/// Bounds applied to every HTTP request
#[derive(Debug, Clone, Copy)]
pub struct RequestLimits {
    pub timeout: Duration,
    pub max_concurrent: usize,
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_concurrent: 256,
        }
    }
}

/// Shared application state
///
/// Holds only immutable, long-lived handles; nothing here changes per request.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub metrics: Arc<PrometheusObserver>,
    pub limits: RequestLimits,
}

impl AppState {
    pub fn new(recommender: Arc<Recommender>, metrics: Arc<PrometheusObserver>) -> Self {
        Self {
            recommender,
            metrics,
            limits: RequestLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: RequestLimits) -> Self {
        self.limits = limits;
        self
    }
}
