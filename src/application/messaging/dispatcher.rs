//! Keyword dispatcher - Fires every callback whose rule matches a message

use tokio::task::JoinHandle;
use tracing::{debug, error, warn};
use crate::domain::entities::{ChatMessage, MatchKind};
use crate::domain::traits::ActionHandle;
use crate::application::errors::BotError;
use super::bindings::SharedRegistry;

/// A rule that fired during a dispatch cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredRule {
    pub kind: MatchKind,
    pub rule: String,
}

/// Outcome of one dispatch cycle
///
/// Callbacks keep running after this is dropped.
#[derive(Debug, Default)]
pub struct Dispatched {
    pub matched: bool,
    pub fired: Vec<FiredRule>,
    tasks: Vec<JoinHandle<()>>,
}

impl Dispatched {
    pub fn fired_count(&self) -> usize {
        self.fired.len()
    }

    pub fn fired_kinds(&self) -> Vec<MatchKind> {
        self.fired.iter().map(|f| f.kind).collect()
    }

    /// Wait until every callback of this cycle has finished or failed
    pub async fn settle(self) {
        for task in self.tasks {
            let _ = task.await;
        }
    }
}

/// Dispatcher - evaluates exact, prefix, suffix and contains rules in that order
#[derive(Clone)]
pub struct KeywordDispatcher {
    registry: SharedRegistry,
}

impl KeywordDispatcher {
    pub fn new(registry: SharedRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    /// Match `message` against a snapshot of the registry and spawn each hit.
    ///
    /// Must be called from within a tokio runtime. Bindings changed by a
    /// callback take effect from the next message on.
    pub fn dispatch(&self, message: &ChatMessage) -> Result<Dispatched, BotError> {
        let snapshot = self.registry.snapshot()?;
        let mut outcome = Dispatched::default();

        for kind in MatchKind::ALL {
            for (rule, action) in snapshot.mapping(kind).matching(&message.content) {
                debug!(%kind, rule, sender = %message.sender.login, "rule matched");
                outcome.tasks.push(spawn_callback(kind, rule, action.clone(), message.clone()));
                outcome.fired.push(FiredRule {
                    kind,
                    rule: rule.to_string(),
                });
            }
        }

        outcome.matched = !outcome.fired.is_empty();
        Ok(outcome)
    }
}

/// Run the callback on its own task and report how it ended
fn spawn_callback(kind: MatchKind, rule: &str, action: ActionHandle, message: ChatMessage) -> JoinHandle<()> {
    let rule = rule.to_string();
    let sender = message.sender.login.clone();
    let task = tokio::spawn(async move { action.call(message).await });

    tokio::spawn(async move {
        match task.await {
            Ok(Ok(())) => {
                debug!(%kind, rule = %rule, sender = %sender, "callback finished");
            }
            Ok(Err(e)) => {
                error!(%kind, rule = %rule, sender = %sender, error = %e, "callback failed");
            }
            Err(e) if e.is_panic() => {
                error!(%kind, rule = %rule, sender = %sender, "callback panicked");
            }
            Err(e) => {
                warn!(%kind, rule = %rule, sender = %sender, error = %e, "callback cancelled");
            }
        }
    })
}
