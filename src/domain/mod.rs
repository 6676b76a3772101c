//! Domain layer - Core chat types with no infrastructure dependencies
//! 
//! This layer contains:
//! - Entities: Chat messages, senders and rule kinds
//! - Traits: Abstractions over the chat client, callbacks and rendering

pub mod entities;
pub mod traits;
