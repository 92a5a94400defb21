//! Application state shared across handlers

use sqlx::PgPool;

use crate::events::EventPublisher;
use crate::repositories::{CommentRepository, PostRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub post_repository: PostRepository,
    pub comment_repository: CommentRepository,
    pub event_publisher: EventPublisher,
}
