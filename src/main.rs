use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use recommendation_service::{
    api::{create_router, AppState, RequestLimits},
    config::{Config, RatingsTransport},
    db,
    services::{
        clients::{lazy_channel, GrpcCatalogClient, GrpcRatingsClient, HttpRatingsClient},
        CatalogClient, PgTagReader, PrometheusObserver, RatingsClient, Recommender, TagReader,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("recommendation_service=info,tower_http=info")
        }))
        .init();

    let pool = db::create_pool(&config.database_url, config.db_max_connections)?;
    if config.run_migrations {
        db::run_migrations(&pool).await?;
    }

    let catalog: Arc<dyn CatalogClient> =
        Arc::new(GrpcCatalogClient::new(lazy_channel(&config.catalog_grpc_url)?));

    let ratings: Arc<dyn RatingsClient> = match config.ratings_transport {
        RatingsTransport::Grpc => {
            Arc::new(GrpcRatingsClient::new(lazy_channel(&config.ratings_grpc_url)?))
        }
        RatingsTransport::Http => Arc::new(HttpRatingsClient::new(config.ratings_http_url.clone())),
    };

    let tags: Arc<dyn TagReader> = Arc::new(PgTagReader::new(pool));

    let metrics = Arc::new(PrometheusObserver::new()?);

    tracing::info!(
        catalog = %config.catalog_grpc_url,
        ratings = ratings.name(),
        lookup_timeout_ms = config.lookup_timeout_ms,
        "Recommendation service configured"
    );

    let recommender = Recommender::new(catalog, ratings, tags)
        .with_observer(metrics.clone())
        .with_lookup_timeout(config.lookup_timeout());

    let state = AppState::new(Arc::new(recommender), metrics).with_limits(RequestLimits {
        timeout: config.request_timeout(),
        max_concurrent: config.max_concurrent_requests,
    });

    let app = create_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
