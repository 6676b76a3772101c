use std::sync::Arc;
use crate::domain::entities::{ChatMessage, MatchKind};
use crate::domain::traits::{BotInfo, ChatClient, ChatSender, DisplayEntry, Render};
use crate::application::errors::{BotError, RegistryError};
use crate::application::messaging::{Dispatched, KeywordDispatcher, ListBindingsAction, ReplyAction, SharedRegistry};
use crate::infrastructure::config::KeywordConfig;
use crate::infrastructure::display::AnsiRenderer;

/// Result of processing one chat line
#[derive(Debug)]
pub struct Processed {
    pub line: String,
    pub dispatched: Dispatched,
}

/// Chat client, keyword dispatcher and console display wired together
pub struct KeywordBot<C: ChatClient> {
    client: C,
    dispatcher: KeywordDispatcher,
    renderer: Box<dyn Render>,
}

impl<C: ChatClient> KeywordBot<C> {
    pub fn new(client: C, registry: SharedRegistry) -> Self {
        Self {
            client,
            dispatcher: KeywordDispatcher::new(registry),
            renderer: Box::new(AnsiRenderer),
        }
    }

    pub fn with_renderer(mut self, renderer: Box<dyn Render>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn registry(&self) -> &SharedRegistry {
        self.dispatcher.registry()
    }

    /// Reply handle for callbacks
    pub fn sender(&self) -> Arc<dyn ChatSender> {
        self.client.sender()
    }

    /// Bind every configured canned reply; stops at the first invalid entry
    pub fn register_replies(&self, keywords: &[KeywordConfig]) -> Result<usize, RegistryError> {
        for keyword in keywords {
            let kind: MatchKind = keyword.kind.parse()?;
            let reply = ReplyAction::new(self.sender(), keyword.reply.clone());
            self.registry().set(kind, keyword.rule.clone(), Arc::new(reply))?;
            tracing::debug!(%kind, rule = %keyword.rule, "Registered reply");
        }
        Ok(keywords.len())
    }

    /// Bind `rule` (exact) to a listing of all current bindings
    pub fn register_listing(&self, rule: &str) -> Result<(), RegistryError> {
        let listing = ListBindingsAction::new(self.registry().clone(), self.sender());
        self.registry().add_keyword(rule, Arc::new(listing))
    }

    /// Connect and print the ready banner
    pub async fn start(&mut self) -> Result<BotInfo, BotError> {
        let info = self.client.connect().await?;
        tracing::info!(channel = %info.channel, "Connection successful, logged in as {}", info.nick);

        println!("Connection successful. | Logged in as {}", info.nick);
        println!("_________________________________________________");
        println!();

        Ok(info)
    }

    /// Dispatch one message and render its display line
    pub fn process(&self, message: &ChatMessage) -> Result<Processed, BotError> {
        let dispatched = self.dispatcher.dispatch(message)?;
        let entry = DisplayEntry {
            timestamp: message.timestamp,
            sender: message.sender.name().to_string(),
            content: message.content.clone(),
            matched: dispatched.matched,
        };

        Ok(Processed {
            line: self.renderer.render(&entry),
            dispatched,
        })
    }

    /// Process messages until the client's stream ends
    pub async fn run(&mut self) -> Result<(), BotError> {
        self.start().await?;
        tracing::info!("Starting message loop...");

        while let Some(message) = self.client.next_message().await {
            match self.process(&message) {
                Ok(processed) => println!("{}", processed.line),
                Err(e) => {
                    tracing::error!(sender = %message.sender.login, "Failed to dispatch message: {}", e);
                }
            }
        }

        tracing::info!("Message stream ended, stopping");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::Mutex;
    use crate::infrastructure::display::PlainRenderer;

    #[derive(Default)]
    struct RecordingSender {
        lines: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatSender for RecordingSender {
        async fn say(&self, text: &str) -> Result<(), BotError> {
            self.lines.lock().await.push(text.to_string());
            Ok(())
        }
    }

    struct ScriptedClient {
        messages: Vec<ChatMessage>,
        sender: Arc<RecordingSender>,
    }

    #[async_trait]
    impl ChatClient for ScriptedClient {
        async fn connect(&mut self) -> Result<BotInfo, BotError> {
            Ok(BotInfo { nick: "tester".to_string(), channel: "tester".to_string() })
        }

        async fn next_message(&mut self) -> Option<ChatMessage> {
            if self.messages.is_empty() {
                None
            } else {
                Some(self.messages.remove(0))
            }
        }

        fn sender(&self) -> Arc<dyn ChatSender> {
            self.sender.clone()
        }
    }

    fn bot(messages: Vec<ChatMessage>) -> (KeywordBot<ScriptedClient>, Arc<RecordingSender>) {
        let sender = Arc::new(RecordingSender::default());
        let client = ScriptedClient { messages, sender: sender.clone() };
        let bot = KeywordBot::new(client, SharedRegistry::new()).with_renderer(Box::new(PlainRenderer));
        (bot, sender)
    }

    fn keyword(kind: &str, rule: &str, reply: &str) -> KeywordConfig {
        KeywordConfig {
            kind: kind.to_string(),
            rule: rule.to_string(),
            reply: reply.to_string(),
        }
    }

    #[tokio::test]
    async fn test_process_marks_matched_lines() {
        let (bot, sender) = bot(Vec::new());
        bot.register_replies(&[keyword("exact", "!hi", "hi {sender}")]).unwrap();

        let processed = bot.process(&ChatMessage::from_text("ann", "!hi")).unwrap();
        assert!(processed.line.starts_with("* "));
        assert!(processed.line.ends_with("ann: !hi"));
        processed.dispatched.settle().await;

        let processed = bot.process(&ChatMessage::from_text("ann", "hello")).unwrap();
        assert!(!processed.line.starts_with("* "));
        processed.dispatched.settle().await;

        assert_eq!(*sender.lines.lock().await, vec!["hi ann".to_string()]);
    }

    #[test]
    fn test_invalid_reply_config_is_rejected() {
        let (bot, _) = bot(Vec::new());

        let err = bot.register_replies(&[keyword("regex", "x", "y")]).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidArgument(_)));

        assert_eq!(bot.registry().len().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_empty_prefix_reply_answers_everything() {
        let (bot, sender) = bot(Vec::new());
        let count = bot.register_replies(&[keyword("prefix", "", "seen {content}")]).unwrap();
        assert_eq!(count, 1);

        let processed = bot.process(&ChatMessage::from_text("ann", "whatever")).unwrap();
        assert!(processed.dispatched.matched);
        processed.dispatched.settle().await;

        assert_eq!(*sender.lines.lock().await, vec!["seen whatever".to_string()]);
    }

    #[tokio::test]
    async fn test_listing_reports_rules() {
        let (bot, sender) = bot(Vec::new());
        bot.register_replies(&[keyword("suffix", "?", "good question")]).unwrap();
        bot.register_listing("!bindings").unwrap();

        let processed = bot.process(&ChatMessage::from_text("ann", "!bindings")).unwrap();
        assert_eq!(processed.dispatched.fired_kinds(), vec![MatchKind::Exact]);
        processed.dispatched.settle().await;

        assert_eq!(
            *sender.lines.lock().await,
            vec!["exact: !bindings | suffix: ?".to_string()]
        );
    }

    #[tokio::test]
    async fn test_run_drains_client() {
        let messages = vec![
            ChatMessage::from_text("ann", "gg"),
            ChatMessage::from_text("bob", "nothing"),
        ];
        let (mut bot, sender) = bot(messages);
        bot.register_replies(&[keyword("contains", "gg", "GG!")]).unwrap();

        bot.run().await.unwrap();

        // Callbacks are fire-and-forget; give them a moment
        for _ in 0..50 {
            if !sender.lines.lock().await.is_empty() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert_eq!(*sender.lines.lock().await, vec!["GG!".to_string()]);
    }
}
