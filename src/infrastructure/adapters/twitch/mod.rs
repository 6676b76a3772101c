//! Twitch chat adapter over `twitch-irc`

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use twitch_irc::login::StaticLoginCredentials;
use twitch_irc::message::{PrivmsgMessage, ServerMessage};
use twitch_irc::{ClientConfig, SecureTCPTransport, TwitchIRCClient};

use crate::domain::entities::{ChatMessage, User};
use crate::domain::traits::{BotInfo, ChatClient, ChatSender};
use crate::application::errors::{BotError, ConfigError};
use crate::infrastructure::config::Credentials;

type IrcClient = TwitchIRCClient<SecureTCPTransport, StaticLoginCredentials>;

/// How long to wait for the server to confirm the channel join
const JOIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends lines to the joined channel
#[derive(Clone)]
pub struct TwitchSender {
    client: IrcClient,
    channel: String,
}

#[async_trait]
impl ChatSender for TwitchSender {
    async fn say(&self, text: &str) -> Result<(), BotError> {
        self.client
            .say(self.channel.clone(), text.to_string())
            .await
            .map_err(|e| BotError::Network(e.to_string()))
    }
}

/// Twitch adapter for a single channel
pub struct TwitchAdapter {
    credentials: Credentials,
    client: IrcClient,
    incoming: UnboundedReceiver<ServerMessage>,
    /// Chat lines that arrived while waiting for the join
    pending: VecDeque<PrivmsgMessage>,
}

impl TwitchAdapter {
    /// Must be called from within a tokio runtime; no connection is made yet
    pub fn new(credentials: Credentials) -> Self {
        let login = StaticLoginCredentials::new(
            credentials.login(),
            Some(credentials.bare_token().to_string()),
        );
        let (incoming, client) = IrcClient::new(ClientConfig::new_simple(login));

        Self {
            credentials,
            client,
            incoming,
            pending: VecDeque::new(),
        }
    }

    fn channel(&self) -> String {
        self.credentials.channel.to_lowercase()
    }

    async fn wait_for_join(&mut self) -> Result<(), BotError> {
        let channel = self.channel();
        let incoming = &mut self.incoming;
        let pending = &mut self.pending;

        let joined = async {
            while let Some(message) = incoming.recv().await {
                match message {
                    ServerMessage::Join(join) if join.channel_login == channel => return Ok(()),
                    ServerMessage::Notice(notice) => {
                        tracing::warn!("Server notice: {}", notice.message_text);
                        if notice.message_text.to_lowercase().contains("authentication failed") {
                            return Err(BotError::AuthConfiguration(notice.message_text));
                        }
                    }
                    ServerMessage::Privmsg(privmsg) => pending.push_back(privmsg),
                    _ => {}
                }
            }
            Err(BotError::Network("connection closed before join".to_string()))
        };

        tokio::time::timeout(JOIN_TIMEOUT, joined)
            .await
            .map_err(|_| BotError::Network(format!("timed out joining #{}", channel)))?
    }
}

fn to_chat_message(privmsg: PrivmsgMessage) -> ChatMessage {
    let sender = User::new(privmsg.sender.login).with_display_name(privmsg.sender.name);
    ChatMessage::new(privmsg.channel_login, sender, privmsg.message_text)
        .with_id(privmsg.message_id)
        .with_timestamp(privmsg.server_timestamp)
}

#[async_trait]
impl ChatClient for TwitchAdapter {
    async fn connect(&mut self) -> Result<BotInfo, BotError> {
        let channel = self.channel();
        tracing::info!(
            client_id = %self.credentials.client_id,
            "Joining #{} as {}",
            channel,
            self.credentials.login()
        );

        self.client
            .join(channel.clone())
            .map_err(|e| ConfigError::InvalidValue(format!("channel '{}': {:?}", channel, e)))?;
        self.wait_for_join().await?;

        Ok(BotInfo {
            nick: self.credentials.login(),
            channel,
        })
    }

    async fn next_message(&mut self) -> Option<ChatMessage> {
        if let Some(privmsg) = self.pending.pop_front() {
            return Some(to_chat_message(privmsg));
        }

        while let Some(message) = self.incoming.recv().await {
            match message {
                ServerMessage::Privmsg(privmsg) => return Some(to_chat_message(privmsg)),
                ServerMessage::Notice(notice) => {
                    tracing::warn!("Server notice: {}", notice.message_text);
                }
                ServerMessage::Reconnect(_) => {
                    tracing::info!("Server requested reconnect");
                }
                _ => {}
            }
        }

        tracing::info!("Twitch message stream closed");
        None
    }

    fn sender(&self) -> Arc<dyn ChatSender> {
        Arc::new(TwitchSender {
            client: self.client.clone(),
            channel: self.channel(),
        })
    }
}
