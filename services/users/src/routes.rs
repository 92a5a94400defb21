//! User service routes

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tracing::{error, info};

use crate::{
    AppState,
    error::UserError,
    models::{AuthResponse, LoginRequest, RegisterRequest, UserSummary},
    validation,
};

/// Create the router for the user service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/users", get(list_users))
        .route("/api/users/register", post(register))
        .route("/api/users/login", post(login))
        .route("/api/users/:user_id/follow/:target_id", post(follow_user))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "user-service"
    }))
}

/// Register a new user
///
/// Fails when the email or the username is already taken. The response
/// carries the user summary, never the stored password.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, UserError> {
    info!("Registration attempt for username: {}", payload.username);

    validation::validate_register(&payload).map_err(UserError::Validation)?;

    let existing = state
        .user_repository
        .find_by_email(&payload.email)
        .await
        .map_err(|e| {
            error!("Failed to look up email: {}", e);
            UserError::InternalServerError
        })?;
    if existing.is_some() {
        return Err(UserError::Conflict(format!(
            "A user with email {} already exists",
            payload.email
        )));
    }

    let existing = state
        .user_repository
        .find_by_username(&payload.username)
        .await
        .map_err(|e| {
            error!("Failed to look up username: {}", e);
            UserError::InternalServerError
        })?;
    if existing.is_some() {
        return Err(UserError::Conflict(format!(
            "A user with username {} already exists",
            payload.username
        )));
    }

    let user = state.user_repository.create(&payload).await.map_err(|e| {
        error!("Failed to create user: {}", e);
        UserError::InternalServerError
    })?;

    Ok(Json(AuthResponse::with_user(
        format!("User registered successfully: {}", user.username),
        user.summary(),
    )))
}

/// Log a user in
///
/// The stored password must match the supplied one exactly; no token is
/// issued.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, UserError> {
    info!("Login attempt for email: {}", payload.email);

    let user = state
        .user_repository
        .find_by_email(&payload.email)
        .await
        .map_err(|e| {
            error!("Failed to look up email: {}", e);
            UserError::InternalServerError
        })?
        .ok_or_else(|| UserError::NotFound("User not found".to_string()))?;

    // Plain-text comparison; passwords are stored unhashed.
    if payload.password != user.password {
        return Err(UserError::InvalidPassword);
    }

    Ok(Json(AuthResponse::with_user(
        format!("Login successful for: {}", user.username),
        user.summary(),
    )))
}

/// Add the target user to the follower's following set
///
/// Idempotent: following an already-followed user changes nothing.
pub async fn follow_user(
    State(state): State<AppState>,
    Path((user_id, target_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, UserError> {
    info!("User {} requests to follow user {}", user_id, target_id);

    state
        .user_repository
        .find_by_id(user_id)
        .await
        .map_err(|e| {
            error!("Failed to look up follower: {}", e);
            UserError::InternalServerError
        })?
        .ok_or_else(|| UserError::NotFound(format!("User not found with id: {}", user_id)))?;

    let target = state
        .user_repository
        .find_by_id(target_id)
        .await
        .map_err(|e| {
            error!("Failed to look up follow target: {}", e);
            UserError::InternalServerError
        })?
        .ok_or_else(|| UserError::NotFound(format!("User not found with id: {}", target_id)))?;

    state
        .user_repository
        .follow(user_id, target_id)
        .await
        .map_err(|e| {
            error!("Failed to persist follow relation: {}", e);
            UserError::InternalServerError
        })?;

    Ok(format!("You are now following {}", target.username))
}

/// Get all users as summaries
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, UserError> {
    let users = state.user_repository.find_all().await.map_err(|e| {
        error!("Failed to list users: {}", e);
        UserError::InternalServerError
    })?;

    let summaries: Vec<UserSummary> = users.iter().map(|user| user.summary()).collect();

    Ok(Json(summaries))
}
