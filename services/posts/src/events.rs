//! Post-created event publishing
//!
//! After a post is stored, a snapshot of it is published for other services
//! (notifications, feeds) to consume. Delivery is best-effort and at-most-once:
//! a transport failure is logged and dropped, never surfaced to the caller and
//! never retried.

use chrono::{DateTime, Utc};
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::info;

use crate::models::PostResponse;

/// Point-in-time snapshot of a freshly created post
///
/// Produced once per successful creation, transmitted, and discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCreatedEvent {
    pub post_id: i64,
    pub title: String,
    pub location: String,
    pub adventure_type: Option<String>,
    pub user_id: i64,
    pub user_name: String,
    pub photos: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl PostCreatedEvent {
    /// Snapshot the fields other services care about from a stored post
    pub fn from_post(post: &PostResponse) -> Self {
        Self {
            post_id: post.id,
            title: post.title.clone(),
            location: post.location.clone(),
            adventure_type: post.adventure_type.clone(),
            user_id: post.user_id,
            user_name: post.user_name.clone(),
            photos: post.photos.clone(),
            created_at: post.created_at,
        }
    }
}

/// Broker endpoints and the topic/routing-key pairs this service declares
#[derive(Debug, Clone)]
pub struct EventPublisherConfig {
    /// Broker bootstrap list
    pub brokers: String,
    pub post_created_topic: String,
    pub post_created_routing_key: String,
    /// Declared for follow notifications; nothing publishes to it yet.
    pub user_follow_topic: String,
    pub user_follow_routing_key: String,
}

impl EventPublisherConfig {
    /// Create a new EventPublisherConfig from environment variables
    ///
    /// # Environment Variables
    /// - `KAFKA_BROKERS`: bootstrap servers (default: "localhost:9092")
    /// - `POST_CREATED_TOPIC` / `POST_CREATED_ROUTING_KEY`
    /// - `USER_FOLLOW_TOPIC` / `USER_FOLLOW_ROUTING_KEY`
    pub fn from_env() -> Self {
        let brokers = env::var("KAFKA_BROKERS").unwrap_or_else(|_| "localhost:9092".to_string());
        let post_created_topic =
            env::var("POST_CREATED_TOPIC").unwrap_or_else(|_| "post.created.queue".to_string());
        let post_created_routing_key =
            env::var("POST_CREATED_ROUTING_KEY").unwrap_or_else(|_| "post.created".to_string());
        let user_follow_topic =
            env::var("USER_FOLLOW_TOPIC").unwrap_or_else(|_| "user.follow.queue".to_string());
        let user_follow_routing_key =
            env::var("USER_FOLLOW_ROUTING_KEY").unwrap_or_else(|_| "user.follow".to_string());

        Self {
            brokers,
            post_created_topic,
            post_created_routing_key,
            user_follow_topic,
            user_follow_routing_key,
        }
    }
}

/// Best-effort publisher for post lifecycle events
#[derive(Clone)]
pub struct EventPublisher {
    producer: FutureProducer,
    config: EventPublisherConfig,
}

impl EventPublisher {
    /// Create a new event publisher
    ///
    /// The broker is not contacted here; an unreachable broker only shows up
    /// as failed sends later.
    pub fn new(config: EventPublisherConfig) -> anyhow::Result<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("message.timeout.ms", "5000")
            .set("retries", "0")
            .create()?;

        info!(
            brokers = %config.brokers,
            topic = %config.post_created_topic,
            "Event publisher initialized"
        );

        Ok(Self { producer, config })
    }

    /// Publish a post-created event
    ///
    /// Runs on the request path: completion (success or failure) happens
    /// before the HTTP response goes out, but a failure never propagates —
    /// the notification is simply lost.
    pub async fn publish_post_created(&self, event: &PostCreatedEvent) {
        let payload = match serde_json::to_string(event) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    post_id = event.post_id,
                    "Failed to serialize post.created event"
                );
                return;
            }
        };

        let record = FutureRecord::to(&self.config.post_created_topic)
            .key(&self.config.post_created_routing_key)
            .payload(&payload);

        match self.producer.send(record, Duration::from_secs(5)).await {
            Ok((partition, offset)) => {
                tracing::debug!(
                    post_id = event.post_id,
                    partition = partition,
                    offset = offset,
                    "post.created event published"
                );
            }
            Err((e, _)) => {
                tracing::error!(
                    error = %e,
                    post_id = event.post_id,
                    "Failed to publish post.created event"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_post() -> PostResponse {
        PostResponse {
            id: 42,
            title: "Hike".to_string(),
            description: Some("Sunrise hike".to_string()),
            location: "Acapulco".to_string(),
            adventure_type: Some("Hiking".to_string()),
            difficulty_level: Some("Easy".to_string()),
            estimated_duration: None,
            user_id: 1,
            user_name: "ana".to_string(),
            photos: vec!["https://cdn.example.com/1.jpg".to_string()],
            likes_count: 0,
            comments_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn event_snapshots_the_post() {
        let post = sample_post();
        let event = PostCreatedEvent::from_post(&post);

        assert_eq!(event.post_id, post.id);
        assert_eq!(event.title, post.title);
        assert_eq!(event.location, post.location);
        assert_eq!(event.adventure_type, post.adventure_type);
        assert_eq!(event.user_id, post.user_id);
        assert_eq!(event.user_name, post.user_name);
        assert_eq!(event.photos, post.photos);
        assert_eq!(event.created_at, post.created_at);
    }

    #[test]
    fn event_serializes_camel_case() {
        let event = PostCreatedEvent::from_post(&sample_post());
        let json = serde_json::to_string(&event).unwrap();

        assert!(json.contains("\"postId\":42"));
        assert!(json.contains("\"adventureType\":\"Hiking\""));
        assert!(json.contains("\"userName\":\"ana\""));
        // The full stored post carries more than the snapshot does.
        assert!(!json.contains("likesCount"));
    }

    #[test]
    fn config_defaults_name_both_topic_pairs() {
        let config = EventPublisherConfig::from_env();

        if env::var("POST_CREATED_ROUTING_KEY").is_err() {
            assert_eq!(config.post_created_routing_key, "post.created");
        }
        if env::var("USER_FOLLOW_ROUTING_KEY").is_err() {
            assert_eq!(config.user_follow_routing_key, "user.follow");
        }
    }

    /// A dead broker must not surface an error to the caller.
    #[tokio::test]
    async fn publish_swallows_transport_errors() {
        let config = EventPublisherConfig {
            brokers: "127.0.0.1:1".to_string(),
            post_created_topic: "post.created.queue".to_string(),
            post_created_routing_key: "post.created".to_string(),
            user_follow_topic: "user.follow.queue".to_string(),
            user_follow_routing_key: "user.follow".to_string(),
        };

        let publisher = EventPublisher::new(config).expect("producer creation is local");
        let event = PostCreatedEvent::from_post(&sample_post());

        // Returns unit regardless of delivery outcome.
        publisher.publish_post_created(&event).await;
    }
}
