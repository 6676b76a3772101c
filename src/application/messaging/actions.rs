//! Built-in actions that talk back to the channel

use std::sync::Arc;
use async_trait::async_trait;
use crate::domain::entities::{ChatMessage, MatchKind};
use crate::domain::traits::{Action, ChatSender};
use crate::application::errors::CallbackError;
use super::bindings::SharedRegistry;

/// Says a fixed reply; `{sender}` and `{content}` are filled from the message
pub struct ReplyAction {
    sender: Arc<dyn ChatSender>,
    template: String,
}

impl ReplyAction {
    pub fn new(sender: Arc<dyn ChatSender>, template: impl Into<String>) -> Self {
        Self {
            sender,
            template: template.into(),
        }
    }

    pub fn render(&self, message: &ChatMessage) -> String {
        self.template
            .replace("{sender}", message.sender.name())
            .replace("{content}", &message.content)
    }
}

#[async_trait]
impl Action for ReplyAction {
    async fn call(&self, message: ChatMessage) -> Result<(), CallbackError> {
        let reply = self.render(&message);
        self.sender.say(&reply).await?;
        Ok(())
    }
}

/// Lists the registered rules of every kind
pub struct ListBindingsAction {
    registry: SharedRegistry,
    sender: Arc<dyn ChatSender>,
}

impl ListBindingsAction {
    pub fn new(registry: SharedRegistry, sender: Arc<dyn ChatSender>) -> Self {
        Self { registry, sender }
    }

    pub fn summary(&self) -> Result<String, CallbackError> {
        let mut parts = Vec::new();
        for kind in MatchKind::ALL {
            let rules = self.registry.rules(kind)?;
            if !rules.is_empty() {
                parts.push(format!("{}: {}", kind, rules.join(", ")));
            }
        }
        if parts.is_empty() {
            return Ok("no bindings".to_string());
        }
        Ok(parts.join(" | "))
    }
}

#[async_trait]
impl Action for ListBindingsAction {
    async fn call(&self, _message: ChatMessage) -> Result<(), CallbackError> {
        let summary = self.summary()?;
        self.sender.say(&summary).await?;
        Ok(())
    }
}
