//! Post repository for database operations

use std::collections::HashMap;

use anyhow::Result;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::{CreatePostRequest, PostResponse};

const POST_COLUMNS: &str = "id, title, description, location, adventure_type, difficulty_level, \
                            estimated_duration, user_id, user_name, likes_count, comments_count, \
                            created_at, updated_at";

fn map_post_row(row: &PgRow, photos: Vec<String>) -> PostResponse {
    PostResponse {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        location: row.get("location"),
        adventure_type: row.get("adventure_type"),
        difficulty_level: row.get("difficulty_level"),
        estimated_duration: row.get("estimated_duration"),
        user_id: row.get("user_id"),
        user_name: row.get("user_name"),
        photos,
        likes_count: row.get("likes_count"),
        comments_count: row.get("comments_count"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Post repository
#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    /// Create a new post repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new post with its photo list; likes start at zero
    pub async fn create(&self, request: &CreatePostRequest) -> Result<PostResponse> {
        info!("Creating new post: {}", request.title);

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO posts (title, description, location, adventure_type,
                               difficulty_level, estimated_duration, user_id, user_name)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.location)
        .bind(&request.adventure_type)
        .bind(&request.difficulty_level)
        .bind(&request.estimated_duration)
        .bind(request.user_id)
        .bind(&request.user_name)
        .fetch_one(&mut *tx)
        .await?;

        let post_id: i64 = row.get("id");
        for (position, url) in request.photos.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO post_photos (post_id, position, photo_url)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(post_id)
            .bind(position as i32)
            .bind(url)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!("Post created successfully with id: {}", post_id);
        Ok(map_post_row(&row, request.photos.clone()))
    }

    /// Find a post by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<PostResponse>> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts
            WHERE id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let post_id: i64 = row.get("id");
                let mut photos = self.photos_by_post(&[post_id]).await?;
                let photos = photos.remove(&post_id).unwrap_or_default();
                Ok(Some(map_post_row(&row, photos)))
            }
            None => Ok(None),
        }
    }

    /// Get posts newest-first with pagination; returns the page and the
    /// total post count
    pub async fn list(&self, page: u32, size: u32) -> Result<(Vec<PostResponse>, i64)> {
        let offset = page as i64 * size as i64;

        let rows = sqlx::query(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(size as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;

        let posts = self.assemble(rows).await?;
        Ok((posts, total))
    }

    /// Get all posts of one user, newest-first
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<PostResponse>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        self.assemble(rows).await
    }

    /// Search posts by location and/or adventure-type substring
    ///
    /// Containment is case-sensitive. A post matching either present filter
    /// counts; with no filters every post matches.
    pub async fn search(
        &self,
        location: Option<&str>,
        adventure_type: Option<&str>,
        page: u32,
        size: u32,
    ) -> Result<(Vec<PostResponse>, i64)> {
        let offset = page as i64 * size as i64;

        let filter = r#"
            WHERE ($1::text IS NULL AND $2::text IS NULL)
               OR location LIKE '%' || $1 || '%'
               OR adventure_type LIKE '%' || $2 || '%'
        "#;

        let rows = sqlx::query(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts
            {filter}
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(location)
        .bind(adventure_type)
        .bind(size as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM posts {filter}"))
                .bind(location)
                .bind(adventure_type)
                .fetch_one(&self.pool)
                .await?;

        let posts = self.assemble(rows).await?;
        Ok((posts, total))
    }

    /// Get all posts owned by any of the given users, newest-first
    pub async fn list_by_users(&self, user_ids: &[i64]) -> Result<Vec<PostResponse>> {
        if user_ids.is_empty() {
            return Ok(vec![]);
        }

        let rows = sqlx::query(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts
            WHERE user_id = ANY($1)
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await?;

        self.assemble(rows).await
    }

    /// Overwrite the mutable fields of a post
    ///
    /// Owner id and like count are left untouched; the update timestamp is
    /// refreshed. Returns None when the post does not exist.
    pub async fn update(
        &self,
        id: i64,
        request: &CreatePostRequest,
    ) -> Result<Option<PostResponse>> {
        info!("Updating post with id: {}", id);

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!(
            r#"
            UPDATE posts
            SET title = $1, description = $2, location = $3, adventure_type = $4,
                difficulty_level = $5, estimated_duration = $6, updated_at = now()
            WHERE id = $7
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.location)
        .bind(&request.adventure_type)
        .bind(&request.difficulty_level)
        .bind(&request.estimated_duration)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM post_photos WHERE post_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for (position, url) in request.photos.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO post_photos (post_id, position, photo_url)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(id)
            .bind(position as i32)
            .bind(url)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(Some(map_post_row(&row, request.photos.clone())))
    }

    /// Delete a post; returns false when it does not exist
    ///
    /// Comments are not cascaded; removing them is the caller's business.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        info!("Deleting post with id: {}", id);

        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Increment the like counter by one
    ///
    /// Plain read-then-write: concurrent likes on the same post may
    /// interleave and lose updates. Returns false when the post does not
    /// exist.
    pub async fn like(&self, id: i64) -> Result<bool> {
        let row = sqlx::query("SELECT likes_count FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(false);
        };
        let likes: i32 = row.get("likes_count");

        sqlx::query("UPDATE posts SET likes_count = $1, updated_at = now() WHERE id = $2")
            .bind(likes + 1)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(true)
    }

    /// Decrement the like counter by one, floored at zero
    ///
    /// At zero the call is a no-op, not an error. Returns false when the
    /// post does not exist.
    pub async fn unlike(&self, id: i64) -> Result<bool> {
        let row = sqlx::query("SELECT likes_count FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(false);
        };
        let likes: i32 = row.get("likes_count");

        if likes > 0 {
            sqlx::query("UPDATE posts SET likes_count = $1, updated_at = now() WHERE id = $2")
                .bind(likes - 1)
                .bind(id)
                .execute(&self.pool)
                .await?;
        }

        Ok(true)
    }

    /// Attach photo lists to a batch of post rows
    async fn assemble(&self, rows: Vec<PgRow>) -> Result<Vec<PostResponse>> {
        let ids: Vec<i64> = rows.iter().map(|row| row.get("id")).collect();
        let mut photos = self.photos_by_post(&ids).await?;

        Ok(rows
            .iter()
            .map(|row| {
                let id: i64 = row.get("id");
                map_post_row(row, photos.remove(&id).unwrap_or_default())
            })
            .collect())
    }

    /// Photo URLs for the given posts, in stored order
    async fn photos_by_post(&self, post_ids: &[i64]) -> Result<HashMap<i64, Vec<String>>> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query(
            r#"
            SELECT post_id, photo_url
            FROM post_photos
            WHERE post_id = ANY($1)
            ORDER BY post_id, position
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut photos: HashMap<i64, Vec<String>> = HashMap::new();
        for row in rows {
            let post_id: i64 = row.get("post_id");
            photos.entry(post_id).or_default().push(row.get("photo_url"));
        }

        Ok(photos)
    }
}
