//! Domain entities - Core chat objects with no external dependencies

pub mod user;
pub mod message;
pub mod rule;

pub use user::User;
pub use message::ChatMessage;
pub use rule::MatchKind;
