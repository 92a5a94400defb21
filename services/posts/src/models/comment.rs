//! Comment models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored comment, returned as-is by the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub post_id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
}

/// Request for creating a comment
///
/// `post_id` is taken on trust; nothing checks the post exists.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub content: String,
    pub post_id: i64,
    pub user_id: i64,
    pub user_name: String,
}
