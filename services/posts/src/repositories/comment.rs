//! Comment repository for database operations

use anyhow::Result;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::{Comment, CreateCommentRequest};

fn map_comment_row(row: &PgRow) -> Comment {
    Comment {
        id: row.get("id"),
        content: row.get("content"),
        post_id: row.get("post_id"),
        user_id: row.get("user_id"),
        user_name: row.get("user_name"),
        created_at: row.get("created_at"),
    }
}

/// Comment repository
#[derive(Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    /// Create a new comment repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new comment with a server timestamp
    pub async fn create(&self, request: &CreateCommentRequest) -> Result<Comment> {
        info!("Creating new comment for post: {}", request.post_id);

        let row = sqlx::query(
            r#"
            INSERT INTO comments (content, post_id, user_id, user_name)
            VALUES ($1, $2, $3, $4)
            RETURNING id, content, post_id, user_id, user_name, created_at
            "#,
        )
        .bind(&request.content)
        .bind(request.post_id)
        .bind(request.user_id)
        .bind(&request.user_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(map_comment_row(&row))
    }

    /// Get the comments of a post, oldest-first
    pub async fn list_by_post(&self, post_id: i64) -> Result<Vec<Comment>> {
        let rows = sqlx::query(
            r#"
            SELECT id, content, post_id, user_id, user_name, created_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_comment_row).collect())
    }

    /// Delete a comment; returns false when it does not exist
    pub async fn delete(&self, id: i64) -> Result<bool> {
        info!("Deleting comment with id: {}", id);

        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every comment of a post; silently does nothing when there are
    /// none
    pub async fn delete_by_post(&self, post_id: i64) -> Result<u64> {
        info!("Deleting all comments for post: {}", post_id);

        let result = sqlx::query("DELETE FROM comments WHERE post_id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
