use sqlx::PgPool;

use crate::{
    error::AppResult,
    models::{MovieId, Tag},
};

/// Number of tags shown alongside a recommendation
pub const RECENT_TAG_LIMIT: u32 = 5;

/// Read access to user tags
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TagReader: Send + Sync {
    /// Most recent tag strings for a movie, newest first
    ///
    /// Returns at most `limit` entries and an empty list when the movie has
    /// no tags. Implementations must not read more than `limit` rows.
    async fn top_recent_tags(&self, movie_id: MovieId, limit: u32) -> AppResult<Vec<String>>;
}

/// Tag reader backed by the Postgres `tags` table
#[derive(Clone)]
pub struct PgTagReader {
    db_pool: PgPool,
}

impl PgTagReader {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Loads the newest `limit` tag rows for a movie
    ///
    /// Rows with equal timestamps are ordered by id so the result is stable.
    pub async fn recent_tags(&self, movie_id: MovieId, limit: u32) -> AppResult<Vec<Tag>> {
        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT id, user_id, movie_id, tag, tagged_at
            FROM tags
            WHERE movie_id = $1
            ORDER BY tagged_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(movie_id)
        .bind(i64::from(limit))
        .fetch_all(&self.db_pool)
        .await?;

        Ok(tags)
    }
}

#[async_trait::async_trait]
impl TagReader for PgTagReader {
    async fn top_recent_tags(&self, movie_id: MovieId, limit: u32) -> AppResult<Vec<String>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let tags = self.recent_tags(movie_id, limit).await?;
        tracing::debug!(movie_id, count = tags.len(), "Loaded recent tags");

        Ok(tags.into_iter().map(|t| t.tag).collect())
    }
}
