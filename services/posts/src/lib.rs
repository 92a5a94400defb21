//! Aventura post service
//!
//! Posts with photos, likes, comments, search, and a following-based feed.
//! Creating a post additionally publishes a `post.created` event for other
//! services to consume. Exposed as a library so the integration tests can
//! drive the handlers directly.

pub mod error;
pub mod events;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;

pub use state::AppState;
