//! Application services - Bot loop orchestration

pub mod bot_service;

pub use bot_service::{KeywordBot, Processed};
