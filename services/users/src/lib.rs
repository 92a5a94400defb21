//! Aventura user service
//!
//! Registration, login, and the follow relation between users. Exposed as a
//! library so the integration tests can drive the handlers directly.

pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod validation;

use sqlx::PgPool;

use crate::repositories::UserRepository;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub user_repository: UserRepository,
}
