//! Input validation utilities

use crate::models::RegisterRequest;

/// Validate a registration payload: all three fields are required.
pub fn validate_register(request: &RegisterRequest) -> Result<(), String> {
    if request.username.trim().is_empty() {
        return Err("Username is required".to_string());
    }

    if request.email.trim().is_empty() {
        return Err("Email is required".to_string());
    }

    if request.password.trim().is_empty() {
        return Err("Password is required".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn accepts_a_complete_registration() {
        assert!(validate_register(&request("ana", "ana@example.com", "secret")).is_ok());
    }

    #[test]
    fn rejects_blank_fields() {
        assert_eq!(
            validate_register(&request("", "ana@example.com", "secret")),
            Err("Username is required".to_string())
        );
        assert_eq!(
            validate_register(&request("ana", "   ", "secret")),
            Err("Email is required".to_string())
        );
        assert_eq!(
            validate_register(&request("ana", "ana@example.com", "")),
            Err("Password is required".to_string())
        );
    }
}
