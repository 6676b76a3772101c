//! Message handling - Keyword bindings and dispatch

pub mod actions;
pub mod bindings;
pub mod dispatcher;
pub mod parser;

pub use actions::{ListBindingsAction, ReplyAction};
pub use bindings::{BindingRegistry, RuleMapping, SharedRegistry};
pub use dispatcher::{Dispatched, FiredRule, KeywordDispatcher};
pub use parser::MessageParser;
