//! Input validation utilities

use crate::models::{CreateCommentRequest, CreatePostRequest};

/// Validate the required fields of a create/update post request.
pub fn validate_post_request(request: &CreatePostRequest) -> Result<(), String> {
    if request.title.trim().is_empty() {
        return Err("Title is required".to_string());
    }

    if request.location.trim().is_empty() {
        return Err("Location is required".to_string());
    }

    if request.user_name.trim().is_empty() {
        return Err("User name is required".to_string());
    }

    Ok(())
}

/// Validate a new comment: content must not be blank.
pub fn validate_comment_request(request: &CreateCommentRequest) -> Result<(), String> {
    if request.content.trim().is_empty() {
        return Err("Content is required".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_request(title: &str, location: &str, user_name: &str) -> CreatePostRequest {
        CreatePostRequest {
            title: title.to_string(),
            description: None,
            location: location.to_string(),
            adventure_type: None,
            difficulty_level: None,
            estimated_duration: None,
            user_id: 1,
            user_name: user_name.to_string(),
            photos: vec![],
        }
    }

    #[test]
    fn accepts_a_minimal_post() {
        assert!(validate_post_request(&post_request("Hike", "Acapulco", "ana")).is_ok());
    }

    #[test]
    fn rejects_blank_required_fields() {
        assert_eq!(
            validate_post_request(&post_request("", "Acapulco", "ana")),
            Err("Title is required".to_string())
        );
        assert_eq!(
            validate_post_request(&post_request("Hike", "  ", "ana")),
            Err("Location is required".to_string())
        );
        assert_eq!(
            validate_post_request(&post_request("Hike", "Acapulco", "")),
            Err("User name is required".to_string())
        );
    }

    #[test]
    fn rejects_blank_comment_content() {
        let request = CreateCommentRequest {
            content: "   ".to_string(),
            post_id: 1,
            user_id: 1,
            user_name: "ana".to_string(),
        };
        assert_eq!(
            validate_comment_request(&request),
            Err("Content is required".to_string())
        );
    }
}
