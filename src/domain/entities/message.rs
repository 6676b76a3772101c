use super::User;
use chrono::{DateTime, Utc};

/// One chat line as delivered by the chat client
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: String,
    pub channel: String,
    pub sender: User,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(channel: impl Into<String>, sender: User, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            channel: channel.into(),
            sender,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn from_text(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new("console", User::new(sender), text)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
