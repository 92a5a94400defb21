//! User repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::{RegisterRequest, User};

fn map_user_row(row: &sqlx::postgres::PgRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password: row.get("password"),
    }
}

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new user with the supplied (unhashed) password
    pub async fn create(&self, request: &RegisterRequest) -> Result<User> {
        info!("Creating new user: {}", request.username);

        let row = sqlx::query(
            r#"
            INSERT INTO users (username, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password
            "#,
        )
        .bind(&request.username)
        .bind(&request.email)
        .bind(&request.password)
        .fetch_one(&self.pool)
        .await?;

        Ok(map_user_row(&row))
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_user_row))
    }

    /// Find a user by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_user_row))
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_user_row))
    }

    /// Get all users
    pub async fn find_all(&self) -> Result<Vec<User>> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, email, password
            FROM users
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_user_row).collect())
    }

    /// Add `following_id` to the follower's following set
    ///
    /// The relation is a true set: following someone twice leaves a single
    /// row behind.
    pub async fn follow(&self, user_id: i64, following_id: i64) -> Result<()> {
        info!("User {} now follows user {}", user_id, following_id);

        sqlx::query(
            r#"
            INSERT INTO user_following (user_id, following_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, following_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(following_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Ids of the users the given user follows
    pub async fn following_ids(&self, user_id: i64) -> Result<Vec<i64>> {
        let rows = sqlx::query(
            r#"
            SELECT following_id
            FROM user_following
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(|row| row.get("following_id")).collect())
    }
}
