//! Console adapter for development/testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;
use crate::domain::entities::ChatMessage;
use crate::domain::traits::{BotInfo, ChatClient, ChatSender};
use crate::application::errors::BotError;
use crate::application::messaging::MessageParser;

/// Prints replies, or forwards them to an outbox when one is attached
#[derive(Clone, Default)]
pub struct ConsoleSender {
    outbox: Option<mpsc::UnboundedSender<String>>,
}

#[async_trait]
impl ChatSender for ConsoleSender {
    async fn say(&self, text: &str) -> Result<(), BotError> {
        match &self.outbox {
            Some(outbox) => outbox
                .send(text.to_string())
                .map_err(|_| BotError::Network("console outbox closed".to_string())),
            None => {
                println!("[BOT] {}", text);
                Ok(())
            }
        }
    }
}

/// Console chat adapter: each input line is one chat message
pub struct ConsoleAdapter<R> {
    lines: Lines<R>,
    parser: MessageParser,
    channel: String,
    sender: ConsoleSender,
}

impl ConsoleAdapter<BufReader<Stdin>> {
    pub fn stdin(channel: impl Into<String>) -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()), channel)
    }
}

impl<R: AsyncBufRead + Unpin + Send> ConsoleAdapter<R> {
    pub fn from_reader(reader: R, channel: impl Into<String>) -> Self {
        let channel = channel.into();
        Self {
            lines: reader.lines(),
            parser: MessageParser::new(channel.clone(), "you"),
            channel,
            sender: ConsoleSender::default(),
        }
    }

    pub fn with_outbox(mut self, outbox: mpsc::UnboundedSender<String>) -> Self {
        self.sender = ConsoleSender { outbox: Some(outbox) };
        self
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> ChatClient for ConsoleAdapter<R> {
    async fn connect(&mut self) -> Result<BotInfo, BotError> {
        tracing::info!("Starting console bot (dev mode)");
        Ok(BotInfo {
            nick: self.channel.clone(),
            channel: self.channel.clone(),
        })
    }

    async fn next_message(&mut self) -> Option<ChatMessage> {
        loop {
            match self.lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => continue,
                Ok(Some(line)) => return Some(self.parser.parse(&line)),
                Ok(None) => return None,
                Err(e) => {
                    tracing::error!("Failed to read console input: {}", e);
                    return None;
                }
            }
        }
    }

    fn sender(&self) -> Arc<dyn ChatSender> {
        Arc::new(self.sender.clone())
    }
}
