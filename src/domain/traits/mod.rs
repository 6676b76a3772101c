//! Domain traits - Abstractions for infrastructure implementations

pub mod action;
pub mod chat;
pub mod render;

pub use action::{action, Action, ActionHandle};
pub use chat::{BotInfo, ChatClient, ChatSender};
pub use render::{DisplayEntry, Render};
