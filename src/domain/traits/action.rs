use std::future::Future;
use std::sync::Arc;
use async_trait::async_trait;
use crate::domain::entities::ChatMessage;
use crate::application::errors::CallbackError;

/// Deferred work bound to a rule, invoked with the message that matched
#[async_trait]
pub trait Action: Send + Sync {
    async fn call(&self, message: ChatMessage) -> Result<(), CallbackError>;
}

/// Shared handle stored in the binding registry
pub type ActionHandle = Arc<dyn Action>;

#[async_trait]
impl<F, Fut> Action for F
where
    F: Fn(ChatMessage) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), CallbackError>> + Send + 'static,
{
    async fn call(&self, message: ChatMessage) -> Result<(), CallbackError> {
        (self)(message).await
    }
}

/// Wrap a closure or action into a registry handle
pub fn action<A: Action + 'static>(action: A) -> ActionHandle {
    Arc::new(action)
}
