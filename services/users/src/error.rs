//! Custom error types for the user service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::AuthResponse;

/// Custom error type for the user service
///
/// Every user-visible failure maps to 400 with an `AuthResponse`-shaped
/// body; only internal failures become 500.
#[derive(Error, Debug)]
pub enum UserError {
    /// Duplicate unique field on registration
    #[error("{0}")]
    Conflict(String),

    /// A referenced user id or email does not resolve
    #[error("{0}")]
    NotFound(String),

    /// Stored password does not match the supplied one
    #[error("Incorrect password")]
    InvalidPassword,

    /// Missing or blank required field
    #[error("{0}")]
    Validation(String),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let status = match self {
            UserError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };

        let body = Json(AuthResponse::message_only(self.to_string()));

        (status, body).into_response()
    }
}

/// Type alias for user service results
pub type UserResult<T> = Result<T, UserError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_errors_map_to_bad_request() {
        let response = UserError::Conflict("taken".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = UserError::InvalidPassword.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = UserError::InternalServerError.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
