pub mod clients;
pub mod observer;
pub mod recommendations;
pub mod tags;

pub use clients::{CatalogClient, RatingsClient};
pub use observer::{AggregationObserver, NoopObserver, Outcome, PrometheusObserver};
pub use recommendations::Recommender;
pub use tags::{PgTagReader, TagReader, RECENT_TAG_LIMIT};
