//! User model and related payloads

use serde::{Deserialize, Serialize};

/// User entity as stored.
///
/// The password is kept in clear text. Known weakness; do not expose this
/// struct on the API surface, use [`UserSummary`] instead.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl User {
    /// The user-facing view: everything except the password.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// User-facing summary returned by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Request for user registration
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request for user login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for registration and login
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: Option<UserSummary>,
}

impl AuthResponse {
    pub fn with_user(message: String, user: UserSummary) -> Self {
        Self {
            message,
            user: Some(user),
        }
    }

    pub fn message_only(message: String) -> Self {
        Self {
            message,
            user: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_never_carries_the_password() {
        let user = User {
            id: 7,
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "hunter2".to_string(),
        };

        let json = serde_json::to_string(&user.summary()).unwrap();
        assert!(json.contains("\"username\":\"ana\""));
        assert!(!json.contains("hunter2"));
    }

    #[test]
    fn auth_response_serializes_null_user_on_failure() {
        let json =
            serde_json::to_string(&AuthResponse::message_only("Incorrect password".to_string()))
                .unwrap();
        assert_eq!(json, "{\"message\":\"Incorrect password\",\"user\":null}");
    }
}
