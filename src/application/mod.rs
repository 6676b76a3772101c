//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: The bot loop tying client, dispatcher and display together
//! - Errors: Domain-specific errors
//! - Messaging: Binding registry, dispatching, console line parsing

pub mod errors;
pub mod services;
pub mod messaging;
