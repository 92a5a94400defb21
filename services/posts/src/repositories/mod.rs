//! Repositories for database operations

pub mod comment;
pub mod post;

pub use comment::CommentRepository;
pub use post::PostRepository;
