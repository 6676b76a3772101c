use std::sync::Arc;
use async_trait::async_trait;
use crate::domain::entities::ChatMessage;
use crate::application::errors::BotError;

/// Outbound half of a chat connection, cheap to clone into callbacks
#[async_trait]
pub trait ChatSender: Send + Sync {
    /// Send a line to the joined channel
    async fn say(&self, text: &str) -> Result<(), BotError>;
}

/// ChatClient trait - abstraction for chat platform adapters
#[async_trait]
pub trait ChatClient: Send {
    /// Connect and join the channel
    async fn connect(&mut self) -> Result<BotInfo, BotError>;

    /// Next inbound chat line, `None` once the stream has ended
    async fn next_message(&mut self) -> Option<ChatMessage>;

    /// Handle for replying from callbacks
    fn sender(&self) -> Arc<dyn ChatSender>;
}

/// Identity the client is logged in as
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub nick: String,
    pub channel: String,
}
