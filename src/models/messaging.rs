// rosterhub/src/models/messaging.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Addressed to exactly one player; delivery transport is external
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Notification {
    pub id: String,
    pub to_player_id: String,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(to_player_id: &str, title: &str, message: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            to_player_id: to_player_id.to_string(),
            title: title.to_string(),
            message: message.to_string(),
            read: false,
            created_at: Utc::now(),
        }
    }
}

// Team-global chat message; at least one payload field is expected
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChatMessage {
    pub id: String,
    pub sender_id: String,
    pub text: Option<String>,
    pub image: Option<String>,
    pub animated_image: Option<String>,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(
        sender_id: &str,
        text: Option<String>,
        image: Option<String>,
        animated_image: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender_id: sender_id.to_string(),
            text,
            image,
            animated_image,
            sent_at: Utc::now(),
        }
    }

    pub fn has_payload(&self) -> bool {
        self.text.as_deref().map_or(false, |t| !t.trim().is_empty())
            || self.image.is_some()
            || self.animated_image.is_some()
    }
}
