use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::MovieId;

/// A user-supplied tag, one row of the `tags` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    pub user_id: i64,
    pub movie_id: MovieId,
    pub tag: String,
    pub tagged_at: NaiveDateTime,
}
