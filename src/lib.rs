//! keyword-bot - Twitch chat bot that fires callbacks on keyword rules
//!
//! Rules come in four kinds (exact, prefix, suffix, contains) and every
//! matching rule fires for a message, each on its own tokio task.

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use application::errors::{BotError, CallbackError, RegistryError};
pub use application::messaging::{KeywordDispatcher, SharedRegistry};
pub use application::services::KeywordBot;
pub use domain::entities::{ChatMessage, MatchKind, User};
pub use domain::traits::{action, Action, ActionHandle, ChatClient, ChatSender};
