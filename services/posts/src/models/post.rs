//! Post models for request and response payloads
//!
//! The wire format is camelCase (`adventureType`, `likesCount`, ...),
//! matching what the web frontend already consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request for creating or updating a post
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub adventure_type: Option<String>,
    pub difficulty_level: Option<String>,
    pub estimated_duration: Option<String>,
    pub user_id: i64,
    pub user_name: String,
    #[serde(default)]
    pub photos: Vec<String>,
}

/// A stored post, photos included, as returned by every post endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub adventure_type: Option<String>,
    pub difficulty_level: Option<String>,
    pub estimated_duration: Option<String>,
    pub user_id: i64,
    pub user_name: String,
    pub photos: Vec<String>,
    pub likes_count: i32,
    pub comments_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response for paginated post listings
#[derive(Debug, Clone, Serialize)]
pub struct PostListResponse {
    pub items: Vec<PostResponse>,
    pub page: u32,
    pub size: u32,
    pub total: i64,
}

/// Pagination query parameters, zero-based
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl PageQuery {
    /// Page number, defaulting to the first page
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(0)
    }

    /// Page size, defaulting to 10
    pub fn size(&self) -> u32 {
        self.size.unwrap_or(10).max(1)
    }
}

/// Query parameters for post search
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub location: Option<String>,
    pub adventure_type: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// Query parameters for the following-based feed
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedQuery {
    /// Comma-separated list of user ids, e.g. `userIds=1,2,3`
    pub user_ids: String,
}

impl FeedQuery {
    /// Parse the comma-separated id list, rejecting non-numeric entries
    pub fn parse_user_ids(&self) -> Result<Vec<i64>, String> {
        self.user_ids
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<i64>()
                    .map_err(|_| format!("Invalid user id in userIds: {}", part))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_query_defaults() {
        let query = PageQuery {
            page: None,
            size: None,
        };
        assert_eq!(query.page(), 0);
        assert_eq!(query.size(), 10);
    }

    #[test]
    fn feed_query_parses_comma_separated_ids() {
        let query = FeedQuery {
            user_ids: "1, 2,3".to_string(),
        };
        assert_eq!(query.parse_user_ids().unwrap(), vec![1, 2, 3]);

        let query = FeedQuery {
            user_ids: "1,x".to_string(),
        };
        assert!(query.parse_user_ids().is_err());

        let query = FeedQuery {
            user_ids: "".to_string(),
        };
        assert_eq!(query.parse_user_ids().unwrap(), Vec::<i64>::new());
    }

    #[test]
    fn create_request_accepts_camel_case_and_defaults_photos() {
        let request: CreatePostRequest = serde_json::from_str(
            r#"{
                "title": "Hike",
                "location": "Acapulco",
                "adventureType": "Hiking",
                "userId": 1,
                "userName": "ana"
            }"#,
        )
        .unwrap();

        assert_eq!(request.adventure_type.as_deref(), Some("Hiking"));
        assert_eq!(request.user_id, 1);
        assert!(request.photos.is_empty());
    }

    #[test]
    fn post_response_serializes_camel_case() {
        let response = PostResponse {
            id: 1,
            title: "Hike".to_string(),
            description: None,
            location: "Acapulco".to_string(),
            adventure_type: Some("Hiking".to_string()),
            difficulty_level: None,
            estimated_duration: None,
            user_id: 1,
            user_name: "ana".to_string(),
            photos: vec![],
            likes_count: 0,
            comments_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"adventureType\":\"Hiking\""));
        assert!(json.contains("\"likesCount\":0"));
        assert!(json.contains("\"createdAt\":"));
    }
}
