//! Chat platform adapters

pub mod console;
pub mod twitch;

pub use console::{ConsoleAdapter, ConsoleSender};
pub use twitch::{TwitchAdapter, TwitchSender};
