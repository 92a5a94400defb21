//! Post service routes

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde_json::json;
use tracing::{error, info};

use crate::{
    error::ApiError,
    events::PostCreatedEvent,
    models::{
        CreateCommentRequest, CreatePostRequest, FeedQuery, PageQuery, PostListResponse,
        SearchQuery,
    },
    state::AppState,
    validation,
};

/// Create the router for the post service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/posts", post(create_post))
        .route("/api/posts", get(list_posts))
        .route("/api/posts/search", get(search_posts))
        .route("/api/posts/feed", get(feed_posts))
        .route("/api/posts/user/:user_id", get(list_posts_by_user))
        .route("/api/posts/:id", get(get_post))
        .route("/api/posts/:id", put(update_post))
        .route("/api/posts/:id", delete(delete_post))
        .route("/api/posts/:id/like", post(like_post))
        .route("/api/posts/:id/like", delete(unlike_post))
        .route("/api/comments", post(create_comment))
        .route("/api/comments/post/:post_id", get(list_comments_by_post))
        .route("/api/comments/post/:post_id", delete(delete_comments_by_post))
        .route("/api/comments/:id", delete(delete_comment))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "post-service"
    }))
}

/// Create a new post and publish its creation event
///
/// The event publish runs after the write commits and before the response;
/// its failure never fails the request.
pub async fn create_post(
    State(state): State<AppState>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Received request to create post: {}", payload.title);

    validation::validate_post_request(&payload).map_err(ApiError::Validation)?;

    let created = state.post_repository.create(&payload).await.map_err(|e| {
        error!("Failed to create post: {}", e);
        ApiError::InternalServerError
    })?;

    let event = PostCreatedEvent::from_post(&created);
    state.event_publisher.publish_post_created(&event).await;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Get a post by ID
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state
        .post_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get post: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| ApiError::NotFound(format!("Post not found with id: {}", id)))?;

    Ok(Json(post))
}

/// Get all posts, newest-first, paginated
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (items, total) = state
        .post_repository
        .list(query.page(), query.size())
        .await
        .map_err(|e| {
            error!("Failed to list posts: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(PostListResponse {
        items,
        page: query.page(),
        size: query.size(),
        total,
    }))
}

/// Get all posts of one user, newest-first
pub async fn list_posts_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let posts = state
        .post_repository
        .list_by_user(user_id)
        .await
        .map_err(|e| {
            error!("Failed to list posts by user: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(posts))
}

/// Search posts by location or adventure-type substring
pub async fn search_posts(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = query.page.unwrap_or(0);
    let size = query.size.unwrap_or(10).max(1);

    let (items, total) = state
        .post_repository
        .search(
            query.location.as_deref(),
            query.adventure_type.as_deref(),
            page,
            size,
        )
        .await
        .map_err(|e| {
            error!("Failed to search posts: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(PostListResponse {
        items,
        page,
        size,
        total,
    }))
}

/// Get the posts of a set of users for a following-based feed
pub async fn feed_posts(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let user_ids = query.parse_user_ids().map_err(ApiError::Validation)?;

    let posts = state
        .post_repository
        .list_by_users(&user_ids)
        .await
        .map_err(|e| {
            error!("Failed to build feed: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(posts))
}

/// Update an existing post
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Received request to update post: {}", id);

    validation::validate_post_request(&payload).map_err(ApiError::Validation)?;

    let updated = state
        .post_repository
        .update(id, &payload)
        .await
        .map_err(|e| {
            error!("Failed to update post: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| ApiError::NotFound(format!("Post not found with id: {}", id)))?;

    Ok(Json(updated))
}

/// Delete a post
///
/// Comments are left behind; `DELETE /api/comments/post/:post_id` removes
/// them when the caller wants that.
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.post_repository.delete(id).await.map_err(|e| {
        error!("Failed to delete post: {}", e);
        ApiError::InternalServerError
    })?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Post not found with id: {}", id)))
    }
}

/// Increment the like counter of a post
pub async fn like_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let found = state.post_repository.like(id).await.map_err(|e| {
        error!("Failed to like post: {}", e);
        ApiError::InternalServerError
    })?;

    if found {
        Ok(StatusCode::OK)
    } else {
        Err(ApiError::NotFound(format!("Post not found with id: {}", id)))
    }
}

/// Decrement the like counter of a post, floored at zero
pub async fn unlike_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let found = state.post_repository.unlike(id).await.map_err(|e| {
        error!("Failed to unlike post: {}", e);
        ApiError::InternalServerError
    })?;

    if found {
        Ok(StatusCode::OK)
    } else {
        Err(ApiError::NotFound(format!("Post not found with id: {}", id)))
    }
}

/// Create a new comment on a post
pub async fn create_comment(
    State(state): State<AppState>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Received request to comment on post: {}", payload.post_id);

    validation::validate_comment_request(&payload).map_err(ApiError::Validation)?;

    let comment = state
        .comment_repository
        .create(&payload)
        .await
        .map_err(|e| {
            error!("Failed to create comment: {}", e);
            ApiError::InternalServerError
        })?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// Get the comments of a post, oldest-first
pub async fn list_comments_by_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let comments = state
        .comment_repository
        .list_by_post(post_id)
        .await
        .map_err(|e| {
            error!("Failed to list comments: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(comments))
}

/// Delete a comment
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.comment_repository.delete(id).await.map_err(|e| {
        error!("Failed to delete comment: {}", e);
        ApiError::InternalServerError
    })?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!(
            "Comment not found with id: {}",
            id
        )))
    }
}

/// Delete every comment of a post; succeeds even when there are none
pub async fn delete_comments_by_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .comment_repository
        .delete_by_post(post_id)
        .await
        .map_err(|e| {
            error!("Failed to delete comments for post: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(StatusCode::NO_CONTENT)
}
