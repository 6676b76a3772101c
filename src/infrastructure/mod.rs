//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Adapters: Platform integrations (Twitch, console)
//! - Display: Console rendering of chat lines

pub mod config;
pub mod adapters;
pub mod display;
