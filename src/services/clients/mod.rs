//! Remote lookup clients used by the recommendation aggregator
//!
//! Each dependency sits behind a small async trait so the aggregator can be
//! wired with gRPC, HTTP or in-memory implementations. Implementations are
//! stateless apart from their long-lived connection handles and are shared
//! across requests.

use tonic::transport::{Channel, Endpoint};

pub mod catalog;
pub mod ratings;

pub use catalog::{CatalogClient, GrpcCatalogClient};
pub use ratings::{GrpcRatingsClient, HttpRatingsClient, RatingsClient};

/// Creates a gRPC channel that connects on first use
///
/// The service keeps starting when a dependency is down; calls made while it
/// is unreachable fail with `Unavailable` instead.
pub fn lazy_channel(url: &str) -> anyhow::Result<Channel> {
    let endpoint = Endpoint::from_shared(url.to_string())
        .map_err(|e| anyhow::anyhow!("Invalid gRPC endpoint {}: {}", url, e))?;
    Ok(endpoint.connect_lazy())
}
