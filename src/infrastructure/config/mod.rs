//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::{BotError, ConfigError};

pub const TOKEN_VAR: &str = "TWITCH_OAUTH_PASS";
pub const CLIENT_ID_VAR: &str = "TWITCH_CLIENT_ID";
pub const CHANNEL_VAR: &str = "TWITCH_CHANNEL";

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub twitch: TwitchConfig,
    #[serde(default)]
    pub keywords: Vec<KeywordConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
    /// Color matched lines in the console output
    pub highlight: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "keyword-bot".to_string(),
            highlight: true,
        }
    }
}

/// Twitch login values; the environment takes precedence over the file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TwitchConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub client_id: Option<String>,
    pub channel: Option<String>,
}

/// Canned reply bound to a rule
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct KeywordConfig {
    /// exact, prefix, suffix or contains; case-insensitive, with `keyword`
    /// accepted for exact and `substring` for contains
    pub kind: String,
    /// Any string, including an empty one, which as a prefix, suffix or
    /// contains rule answers every message
    pub rule: String,
    pub reply: String,
}

/// Validated login values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub client_id: String,
    pub channel: String,
}

impl Credentials {
    /// The bot logs in under the channel's own name
    pub fn login(&self) -> String {
        self.channel.to_lowercase()
    }

    /// Token without the `oauth:` prefix chat passwords usually carry
    pub fn bare_token(&self) -> &str {
        self.token.strip_prefix("oauth:").unwrap_or(&self.token)
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    pub fn load_env() -> Self {
        Config::default().with_env()
    }

    /// Overlay `TWITCH_*` variables from the process environment
    pub fn with_env(self) -> Self {
        self.with_vars(|key| std::env::var(key).ok())
    }

    pub fn with_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(token) = lookup(TOKEN_VAR) {
            self.twitch.token = Some(token);
        }
        if let Some(client_id) = lookup(CLIENT_ID_VAR) {
            self.twitch.client_id = Some(client_id);
        }
        if let Some(channel) = lookup(CHANNEL_VAR) {
            self.twitch.channel = Some(channel);
        }
        self
    }

    /// All three login values, or an error naming the missing ones
    pub fn credentials(&self) -> Result<Credentials, BotError> {
        fn present(value: &Option<String>) -> Option<String> {
            value.as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        let token = present(&self.twitch.token);
        let client_id = present(&self.twitch.client_id);
        let channel = present(&self.twitch.channel);

        match (token, client_id, channel) {
            (Some(token), Some(client_id), Some(channel)) => Ok(Credentials {
                token,
                client_id,
                channel: channel.trim_start_matches('#').to_string(),
            }),
            (token, client_id, channel) => {
                let missing: Vec<&str> = [
                    (TOKEN_VAR, token.is_none()),
                    (CLIENT_ID_VAR, client_id.is_none()),
                    (CHANNEL_VAR, channel.is_none()),
                ]
                .into_iter()
                .filter(|(_, missing)| *missing)
                .map(|(name, _)| name)
                .collect();

                Err(BotError::AuthConfiguration(format!(
                    "{} not set; add them to .env or the environment",
                    missing.join(", ")
                )))
            }
        }
    }

    /// Starting point printed by `init-config`
    pub fn sample() -> Self {
        Self {
            bot: BotConfig::default(),
            twitch: TwitchConfig {
                token: None,
                client_id: Some("your-client-id".to_string()),
                channel: Some("your_channel".to_string()),
            },
            keywords: vec![
                KeywordConfig {
                    kind: "exact".to_string(),
                    rule: "!hello".to_string(),
                    reply: "Hello, {sender}!".to_string(),
                },
                KeywordConfig {
                    kind: "prefix".to_string(),
                    rule: "!echo ".to_string(),
                    reply: "{sender} said: {content}".to_string(),
                },
                KeywordConfig {
                    kind: "contains".to_string(),
                    rule: "gg".to_string(),
                    reply: "GG!".to_string(),
                },
            ],
        }
    }
}
