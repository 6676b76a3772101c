//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Auth configuration error: {0}")]
    AuthConfiguration(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Binding registry errors, raised before any mapping is touched
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Lock poisoned")]
    Poisoned,
}

/// Failure inside a dispatched callback
#[derive(Error, Debug)]
pub enum CallbackError {
    #[error("Callback failed: {0}")]
    Failed(String),

    #[error(transparent)]
    Bot(#[from] BotError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
