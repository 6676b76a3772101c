//! Binding registry - Rule strings bound to callbacks, one mapping per match kind

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use crate::domain::entities::MatchKind;
use crate::domain::traits::ActionHandle;
use crate::application::errors::RegistryError;

/// Rules of a single match kind
#[derive(Clone)]
pub struct RuleMapping {
    kind: MatchKind,
    entries: HashMap<String, ActionHandle>,
}

impl RuleMapping {
    pub fn new(kind: MatchKind) -> Self {
        Self {
            kind,
            entries: HashMap::new(),
        }
    }

    pub fn kind(&self) -> MatchKind {
        self.kind
    }

    /// Bind `name` to `action`, replacing any previous action for that rule.
    ///
    /// Any string is a rule; an empty prefix, suffix or contains rule fires
    /// on every message.
    pub fn set(&mut self, name: impl Into<String>, action: ActionHandle) {
        self.entries.insert(name.into(), action);
    }

    /// Returns whether a binding was removed
    pub fn remove(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    /// Swap in a whole new mapping in one step
    pub fn replace_all(&mut self, bindings: HashMap<String, ActionHandle>) {
        self.entries = bindings;
    }

    /// Owned copy of the current bindings
    pub fn get(&self) -> HashMap<String, ActionHandle> {
        self.entries.clone()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sorted rule strings
    pub fn rules(&self) -> Vec<String> {
        let mut rules: Vec<String> = self.entries.keys().cloned().collect();
        rules.sort();
        rules
    }

    /// Every binding whose rule matches `content`
    pub fn matching<'a>(&'a self, content: &'a str) -> Vec<(&'a str, &'a ActionHandle)> {
        if self.kind == MatchKind::Exact {
            return self.entries
                .get_key_value(content)
                .map(|(rule, action)| (rule.as_str(), action))
                .into_iter()
                .collect();
        }

        self.entries
            .iter()
            .filter(|(rule, _)| self.kind.matches(rule, content))
            .map(|(rule, action)| (rule.as_str(), action))
            .collect()
    }
}

impl fmt::Debug for RuleMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleMapping")
            .field("kind", &self.kind)
            .field("rules", &self.rules())
            .finish()
    }
}

/// The four rule mappings of a bot
#[derive(Clone, Debug)]
pub struct BindingRegistry {
    exact: RuleMapping,
    prefix: RuleMapping,
    suffix: RuleMapping,
    contains: RuleMapping,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self {
            exact: RuleMapping::new(MatchKind::Exact),
            prefix: RuleMapping::new(MatchKind::Prefix),
            suffix: RuleMapping::new(MatchKind::Suffix),
            contains: RuleMapping::new(MatchKind::Contains),
        }
    }

    pub fn mapping(&self, kind: MatchKind) -> &RuleMapping {
        match kind {
            MatchKind::Exact => &self.exact,
            MatchKind::Prefix => &self.prefix,
            MatchKind::Suffix => &self.suffix,
            MatchKind::Contains => &self.contains,
        }
    }

    pub fn mapping_mut(&mut self, kind: MatchKind) -> &mut RuleMapping {
        match kind {
            MatchKind::Exact => &mut self.exact,
            MatchKind::Prefix => &mut self.prefix,
            MatchKind::Suffix => &mut self.suffix,
            MatchKind::Contains => &mut self.contains,
        }
    }

    pub fn set(&mut self, kind: MatchKind, name: impl Into<String>, action: ActionHandle) {
        self.mapping_mut(kind).set(name, action)
    }

    pub fn remove(&mut self, kind: MatchKind, name: &str) -> bool {
        self.mapping_mut(kind).remove(name)
    }

    pub fn replace_all(&mut self, kind: MatchKind, bindings: HashMap<String, ActionHandle>) {
        self.mapping_mut(kind).replace_all(bindings)
    }

    pub fn get(&self, kind: MatchKind) -> HashMap<String, ActionHandle> {
        self.mapping(kind).get()
    }

    /// Total number of bindings across all kinds
    pub fn len(&self) -> usize {
        MatchKind::ALL.iter().map(|k| self.mapping(*k).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for BindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe handle to a [`BindingRegistry`], cloned into callbacks that edit bindings
#[derive(Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<BindingRegistry>>,
}

impl SharedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_registry(registry: BindingRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, BindingRegistry>, RegistryError> {
        self.inner.read().map_err(|_| RegistryError::Poisoned)
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, BindingRegistry>, RegistryError> {
        self.inner.write().map_err(|_| RegistryError::Poisoned)
    }

    pub fn set(&self, kind: MatchKind, name: impl Into<String>, action: ActionHandle) -> Result<(), RegistryError> {
        self.write()?.set(kind, name, action);
        Ok(())
    }

    /// Exact-match binding, the classic chat keyword
    pub fn add_keyword(&self, name: impl Into<String>, action: ActionHandle) -> Result<(), RegistryError> {
        self.set(MatchKind::Exact, name, action)
    }

    pub fn remove(&self, kind: MatchKind, name: &str) -> Result<bool, RegistryError> {
        Ok(self.write()?.remove(kind, name))
    }

    pub fn replace_all(&self, kind: MatchKind, bindings: HashMap<String, ActionHandle>) -> Result<(), RegistryError> {
        self.write()?.replace_all(kind, bindings);
        Ok(())
    }

    pub fn get(&self, kind: MatchKind) -> Result<HashMap<String, ActionHandle>, RegistryError> {
        Ok(self.read()?.get(kind))
    }

    pub fn rules(&self, kind: MatchKind) -> Result<Vec<String>, RegistryError> {
        Ok(self.read()?.mapping(kind).rules())
    }

    pub fn len(&self) -> Result<usize, RegistryError> {
        Ok(self.read()?.len())
    }

    /// Point-in-time copy of all four mappings; the lock is released on return
    pub fn snapshot(&self) -> Result<BindingRegistry, RegistryError> {
        Ok(self.read()?.clone())
    }
}
