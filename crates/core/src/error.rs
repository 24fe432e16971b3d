use thiserror::Error;

use crate::config::ConfigurationError;
use crate::connection::ClientError;

/// Errors returned by registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("application not registered on the registry and no application bound to the current scope")]
    NoApplication,
    #[error("Table not found: {0}")]
    TableNotFound(String),
    /// Raised by the client library, passed through untouched.
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
