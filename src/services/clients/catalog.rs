use tonic::transport::Channel;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogEntry, MovieId},
    proto::catalog::v1::{catalog_service_client::CatalogServiceClient, GetMovieRequest, GetMovieResponse},
};

/// Read access to the movie catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch title and genres for one movie
    ///
    /// Fails with `NotFound` when the catalog has no such movie. The id is
    /// not validated locally; the catalog owns existence checks.
    async fn get_movie(&self, movie_id: MovieId) -> AppResult<CatalogEntry>;
}

/// Catalog client speaking `catalog.v1.CatalogService` over gRPC
#[derive(Clone)]
pub struct GrpcCatalogClient {
    client: CatalogServiceClient<Channel>,
}

impl GrpcCatalogClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            client: CatalogServiceClient::new(channel),
        }
    }
}

#[async_trait::async_trait]
impl CatalogClient for GrpcCatalogClient {
    async fn get_movie(&self, movie_id: MovieId) -> AppResult<CatalogEntry> {
        tracing::debug!(movie_id, "gRPC GetMovie");

        // Stubs need &mut self; clones share the underlying channel
        let mut client = self.client.clone();
        let response = client
            .get_movie(GetMovieRequest { id: movie_id })
            .await?
            .into_inner();

        entry_from_response(movie_id, response)
    }
}

fn entry_from_response(movie_id: MovieId, response: GetMovieResponse) -> AppResult<CatalogEntry> {
    let movie = response.movie.ok_or_else(|| {
        AppError::Internal(format!("Catalog response for movie {} has no movie", movie_id))
    })?;

    Ok(CatalogEntry {
        id: movie.id,
        title: movie.title,
        genres: movie.genres,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::catalog::v1::Movie;

    #[test]
    fn test_entry_from_response_keeps_genre_order() {
        let response = GetMovieResponse {
            movie: Some(Movie {
                id: 42,
                title: "Inception".to_string(),
                genres: vec!["Sci-Fi".to_string(), "Action".to_string(), "Thriller".to_string()],
            }),
        };

        let entry = entry_from_response(42, response).unwrap();

        assert_eq!(entry.id, 42);
        assert_eq!(entry.title, "Inception");
        assert_eq!(entry.genres, vec!["Sci-Fi", "Action", "Thriller"]);
    }

    #[test]
    fn test_entry_from_response_without_movie_is_internal() {
        let err = entry_from_response(42, GetMovieResponse { movie: None }).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn test_unreachable_catalog_is_unavailable() {
        let channel = crate::services::clients::lazy_channel("http://127.0.0.1:1").unwrap();
        let client = GrpcCatalogClient::new(channel);

        let err = client.get_movie(42).await.unwrap_err();
        assert!(matches!(err, AppError::Unavailable(_)), "{:?}", err);
    }
}
